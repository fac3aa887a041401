//! Sampling occlusion test.
//!
//! Draws a fixed set of points on the target's lateral surface once, then
//! treats the target as hidden only if every one of them is shadowed.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use smokescreen_core::scenario::TargetCylinder;
use smokescreen_core::types::Vec3;

use crate::cone::ShadowCone;
use crate::strategy::OcclusionTest;

/// Lateral-surface points drawn uniformly in angle and height.
#[derive(Debug, Clone)]
pub struct SamplingTest {
    points: Vec<Vec3>,
}

impl SamplingTest {
    /// Draw `samples` surface points with a generator seeded by `seed`.
    pub fn new(target: TargetCylinder, samples: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(target, samples, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(target: TargetCylinder, samples: usize, rng: &mut R) -> Self {
        let points = (0..samples)
            .map(|_| {
                let theta = rng.gen_range(0.0..TAU);
                let h = rng.gen_range(0.0..=target.height);
                target.surface_point(theta, h)
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl OcclusionTest for SamplingTest {
    fn cone_covers_target(&self, cone: &ShadowCone) -> bool {
        self.points.iter().all(|p| cone.shadows(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_target() -> TargetCylinder {
        TargetCylinder::default()
    }

    #[test]
    fn test_points_on_lateral_surface() {
        let target = test_target();
        let test = SamplingTest::new(target, 500, 1);
        assert_eq!(test.points().len(), 500);
        for p in test.points() {
            let radial = (*p - target.base_center).truncate().length();
            assert!((radial - target.radius).abs() < 1e-9);
            let h = p.z - target.base_center.z;
            assert!((0.0..=target.height).contains(&h));
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = SamplingTest::new(test_target(), 50, 99);
        let b = SamplingTest::new(test_target(), 50, 99);
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_large_cloud_between_missile_and_target() {
        let test = SamplingTest::new(test_target(), 1000, 3);
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        assert!(test.occluded(missile, Vec3::new(20.0, 200.0, 5.0), 10.0));
    }

    #[test]
    fn test_small_cloud_only_partially_covers() {
        let test = SamplingTest::new(test_target(), 1000, 3);
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        assert!(!test.occluded(missile, Vec3::new(20.0, 200.0, 5.0), 3.0));
    }

    #[test]
    fn test_cloud_offset_from_sight_line() {
        let test = SamplingTest::new(test_target(), 1000, 3);
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        assert!(!test.occluded(missile, Vec3::new(20.0, 260.0, 5.0), 10.0));
    }

    #[test]
    fn test_cloud_behind_target_does_not_hide_it() {
        let test = SamplingTest::new(test_target(), 1000, 3);
        let missile = Vec3::new(1_000.0, 200.0, 5.0);
        assert!(!test.occluded(missile, Vec3::new(-50.0, 200.0, 5.0), 10.0));
    }
}
