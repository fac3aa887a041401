//! Occlusion geometry for SMOKESCREEN.
//!
//! Decides, for a single instant, whether a spherical smoke cloud hides the
//! whole target cylinder from the missile. Two interchangeable strategies sit
//! behind the [`OcclusionTest`] trait and are picked with
//! [`Occluder::from_strategy`].

pub use smokescreen_core as core;

pub mod algebraic;
pub mod cone;
pub mod sampling;
pub mod strategy;

// Re-export key types for convenience.
pub use algebraic::AlgebraicTest;
pub use cone::ShadowCone;
pub use sampling::SamplingTest;
pub use strategy::{Occluder, OcclusionTest};
