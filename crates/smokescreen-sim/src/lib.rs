//! Coverage simulation for SMOKESCREEN.
//!
//! Closed-form drone, canister, cloud and missile kinematics, and the
//! coverage evaluator that integrates occluded time over a sampled window.
//! The evaluator is the optimizer's fitness function.

pub mod coverage;
pub mod motion;

pub use smokescreen_core as core;
pub use coverage::{CoverageEvaluator, CoverageInterval, CoverageReport};
pub use motion::{BallisticMotion, DroneFix, MotionModel};

#[cfg(test)]
mod tests;
