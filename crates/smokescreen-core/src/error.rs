//! Error taxonomy.
//!
//! `ConfigError` is the only caller-visible failure: it rejects a run before
//! it starts. `EvalError` stays inside the fitness path, where it is
//! recovered as a zero fitness.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("search bounds must contain at least one dimension")]
    EmptyBounds,
    #[error("bound {dimension} is not finite")]
    NonFiniteBound { dimension: usize },
    #[error("bound {dimension} is inverted: min {min} > max {max}")]
    InvertedBound { dimension: usize, min: f64, max: f64 },
    #[error("swarm size must be positive")]
    EmptySwarm,
    #[error("iteration budget must be positive")]
    NoIterations,
    #[error("cooling rate {0} must lie in (0, 1]")]
    CoolingRate(f64),
    #[error("temperatures must be positive and finite (initial {initial}, floor {floor})")]
    Temperature { initial: f64, floor: f64 },
    #[error("optimizer coefficient {name} = {value} is out of range")]
    Coefficient { name: &'static str, value: f64 },
    #[error("seed candidate {index} has {found} coordinates, bounds have {expected}")]
    SeedDimension {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("layout expects {expected} dimensions, bounds have {found}")]
    LayoutDimension { expected: usize, found: usize },
    #[error("evaluation window [{start}, {end}] with {samples} samples is degenerate")]
    Window { start: f64, end: f64, samples: usize },
    #[error("occlusion test needs at least one sample")]
    NoOcclusionSamples,
    #[error("scenario field {name} = {value} is invalid")]
    Scenario { name: &'static str, value: f64 },
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("expected {expected} coordinates, got {found}")]
    WrongDimension { expected: usize, found: usize },
    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },
    #[error("{name} = {value} is out of its physical domain")]
    OutOfDomain { name: &'static str, value: f64 },
}
