//! The occlusion contract and its configurable dispatch.

use smokescreen_core::config::OcclusionStrategy;
use smokescreen_core::scenario::TargetCylinder;
use smokescreen_core::types::Vec3;

use crate::algebraic::AlgebraicTest;
use crate::cone::ShadowCone;
use crate::sampling::SamplingTest;

/// Does a smoke sphere fully hide the target from the missile at one instant?
///
/// Implementors only decide whether a tangent cone covers the target;
/// the proximity shortcut is shared.
pub trait OcclusionTest: Send + Sync {
    /// Whether the cone cast by the cloud covers the whole target.
    fn cone_covers_target(&self, cone: &ShadowCone) -> bool;

    /// A missile inside (or within `radius` of) the cloud sees nothing;
    /// otherwise the shadow cone must cover the entire target.
    fn occluded(&self, missile: Vec3, smoke_center: Vec3, radius: f64) -> bool {
        if missile.distance(smoke_center) < radius {
            return true;
        }
        match ShadowCone::new(missile, smoke_center, radius) {
            Some(cone) => self.cone_covers_target(&cone),
            None => true,
        }
    }
}

/// Occlusion test selected by configuration.
#[derive(Debug, Clone)]
pub enum Occluder {
    Sampling(SamplingTest),
    Algebraic(AlgebraicTest),
}

impl Occluder {
    /// Build the strategy named by `strategy` for `target`.
    pub fn from_strategy(strategy: OcclusionStrategy, target: TargetCylinder) -> Self {
        match strategy {
            OcclusionStrategy::Sampling { samples, seed } => {
                Occluder::Sampling(SamplingTest::new(target, samples, seed))
            }
            OcclusionStrategy::Algebraic {
                restarts,
                tolerance,
                max_iterations,
                seed,
            } => Occluder::Algebraic(AlgebraicTest::new(
                target,
                restarts,
                tolerance,
                max_iterations,
                seed,
            )),
        }
    }
}

impl OcclusionTest for Occluder {
    fn cone_covers_target(&self, cone: &ShadowCone) -> bool {
        match self {
            Occluder::Sampling(test) => test.cone_covers_target(cone),
            Occluder::Algebraic(test) => test.cone_covers_target(cone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategies() -> Vec<Occluder> {
        let target = TargetCylinder::default();
        vec![
            Occluder::from_strategy(OcclusionStrategy::default(), target),
            Occluder::from_strategy(OcclusionStrategy::algebraic(), target),
        ]
    }

    #[test]
    fn test_proximity_shortcut_any_strategy() {
        // Cloud nowhere near the target line, but the missile sits inside it.
        let smoke = Vec3::new(5_000.0, -3_000.0, 800.0);
        for occluder in strategies() {
            assert!(occluder.occluded(smoke, smoke, 10.0));
            assert!(occluder.occluded(smoke + Vec3::new(6.0, 0.0, 0.0), smoke, 10.0));
        }
    }

    #[test]
    fn test_far_cloud_never_occludes() {
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        let smoke = Vec3::new(500.0, -400.0, 5.0);
        for occluder in strategies() {
            assert!(!occluder.occluded(missile, smoke, 10.0));
        }
    }

    #[test]
    fn test_strategies_agree_on_clear_cover() {
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        let smoke = Vec3::new(20.0, 200.0, 5.0);
        for occluder in strategies() {
            assert!(occluder.occluded(missile, smoke, 10.0));
        }
    }

    #[test]
    fn test_from_strategy_selects_variant() {
        let target = TargetCylinder::default();
        assert!(matches!(
            Occluder::from_strategy(OcclusionStrategy::default(), target),
            Occluder::Sampling(_)
        ));
        assert!(matches!(
            Occluder::from_strategy(OcclusionStrategy::algebraic(), target),
            Occluder::Algebraic(_)
        ));
    }
}
