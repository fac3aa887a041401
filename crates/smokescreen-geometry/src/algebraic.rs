//! Algebraic occlusion test.
//!
//! Looks for a point on the target's lateral surface that lies exactly on the
//! shadow-cone boundary. The surface is parameterized by angle `θ` and height
//! `h`, which keeps every candidate on the surface; the boundary equation
//! `g(θ, h) = cos∠(α, β) − cos θ_cone = 0` is then solved by a damped
//! minimum-norm Gauss-Newton iteration from several restart guesses.
//!
//! A root means the boundary crosses the surface, so part of the target is
//! visible. No root means the whole surface shares one status, which a single
//! probe point decides.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use smokescreen_core::scenario::TargetCylinder;

use crate::cone::ShadowCone;
use crate::strategy::OcclusionTest;

/// Central-difference step for the residual gradient.
const GRADIENT_STEP: f64 = 1e-6;

/// Gradients below this squared norm are treated as stationary.
const MIN_GRADIENT_NORM_SQ: f64 = 1e-24;

/// Step halvings tried before giving up on a restart.
const MAX_BACKTRACKS: usize = 12;

/// Boundary-crossing search over the lateral surface.
#[derive(Debug, Clone)]
pub struct AlgebraicTest {
    target: TargetCylinder,
    /// Restart guesses as (θ, h).
    guesses: Vec<(f64, f64)>,
    tolerance: f64,
    max_iterations: usize,
}

impl AlgebraicTest {
    pub fn new(
        target: TargetCylinder,
        restarts: usize,
        tolerance: f64,
        max_iterations: usize,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let guesses = (0..restarts)
            .map(|_| (rng.gen_range(0.0..TAU), rng.gen_range(0.0..=target.height)))
            .collect();
        Self {
            target,
            guesses,
            tolerance,
            max_iterations,
        }
    }

    pub fn guesses(&self) -> &[(f64, f64)] {
        &self.guesses
    }

    fn residual(&self, cone: &ShadowCone, theta: f64, h: f64) -> f64 {
        cone.boundary_residual(self.target.surface_point(theta, h))
    }

    /// Find a surface point on the cone boundary, if the search reaches one.
    pub fn find_boundary_crossing(&self, cone: &ShadowCone) -> Option<(f64, f64)> {
        // The lateral surface is connected, so residuals of opposite sign at
        // two guesses already prove a crossing.
        let mut has_inside = false;
        let mut has_outside = false;
        for &(theta, h) in &self.guesses {
            let g = self.residual(cone, theta, h);
            if g.abs() < self.tolerance {
                return Some((theta, h));
            }
            has_inside |= g > 0.0;
            has_outside |= g < 0.0;
            if has_inside && has_outside {
                return Some((theta, h));
            }
        }

        self.guesses
            .iter()
            .find_map(|&(theta, h)| self.solve_from(cone, theta, h))
    }

    /// Gauss-Newton from one guess. Non-convergence yields `None`.
    fn solve_from(&self, cone: &ShadowCone, theta0: f64, h0: f64) -> Option<(f64, f64)> {
        let height = self.target.height;
        let (mut theta, mut h) = (theta0, h0);
        let mut g = self.residual(cone, theta, h);

        for _ in 0..self.max_iterations {
            if g.abs() < self.tolerance {
                return Some((theta, h));
            }

            let dg_dtheta = (self.residual(cone, theta + GRADIENT_STEP, h)
                - self.residual(cone, theta - GRADIENT_STEP, h))
                / (2.0 * GRADIENT_STEP);
            let dg_dh = (self.residual(cone, theta, h + GRADIENT_STEP)
                - self.residual(cone, theta, h - GRADIENT_STEP))
                / (2.0 * GRADIENT_STEP);
            let norm_sq = dg_dtheta * dg_dtheta + dg_dh * dg_dh;
            if norm_sq < MIN_GRADIENT_NORM_SQ {
                return None;
            }

            // Minimum-norm step for one equation in two unknowns.
            let step_theta = -g * dg_dtheta / norm_sq;
            let step_h = -g * dg_dh / norm_sq;

            let mut scale = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let next_theta = (theta + scale * step_theta).rem_euclid(TAU);
                let next_h = (h + scale * step_h).clamp(0.0, height);
                let next_g = self.residual(cone, next_theta, next_h);
                if next_g.abs() < g.abs() {
                    accepted = Some((next_theta, next_h, next_g));
                    break;
                }
                scale *= 0.5;
            }

            let (next_theta, next_h, next_g) = accepted?;
            theta = next_theta;
            h = next_h;
            g = next_g;
        }

        (g.abs() < self.tolerance).then_some((theta, h))
    }
}

impl OcclusionTest for AlgebraicTest {
    fn cone_covers_target(&self, cone: &ShadowCone) -> bool {
        if self.find_boundary_crossing(cone).is_some() {
            return false;
        }
        // Uniform status: one probe decides.
        let probe = self.target.surface_point(0.0, 0.5 * self.target.height);
        cone.shadows(probe)
    }
}
