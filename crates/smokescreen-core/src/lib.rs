//! Core types and definitions for the SMOKESCREEN planner.
//!
//! This crate defines the vocabulary shared across all other crates:
//! scenario constants, deployment parameters, search bounds, configuration,
//! and the error taxonomy. It has no dependency on any solver.

pub mod config;
pub mod constants;
pub mod error;
pub mod scenario;
pub mod types;

pub use config::{OcclusionStrategy, OptimizerConfig, SmokescreenConfig};
pub use error::{ConfigError, EvalError};
pub use scenario::{EvaluationWindow, Scenario, TargetCylinder};
pub use types::{Deployment, ParamRange, ParameterLayout, SearchBounds, Vec3};
