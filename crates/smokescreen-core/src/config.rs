//! Run configuration, loadable from JSON.
//!
//! Every section has `#[serde(default)]`, so a config file only needs to name
//! the fields it overrides. Defaults reproduce the single-drone,
//! single-missile problem the planner was built for.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::scenario::{EvaluationWindow, Scenario};
use crate::types::{ParameterLayout, SearchBounds};

/// Which occlusion test the coverage evaluator runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OcclusionStrategy {
    /// Every sampled lateral-surface point must lie in the shadow cone.
    Sampling {
        #[serde(default = "default_surface_samples")]
        samples: usize,
        #[serde(default = "default_geometry_seed")]
        seed: u64,
    },
    /// Search for a point where the cone boundary crosses the lateral surface.
    Algebraic {
        #[serde(default = "default_restarts")]
        restarts: usize,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
        #[serde(default = "default_solver_iterations")]
        max_iterations: usize,
        #[serde(default = "default_geometry_seed")]
        seed: u64,
    },
}

fn default_surface_samples() -> usize {
    OCCLUSION_SURFACE_SAMPLES
}

fn default_restarts() -> usize {
    ALGEBRAIC_RESTARTS
}

fn default_tolerance() -> f64 {
    ALGEBRAIC_TOLERANCE
}

fn default_solver_iterations() -> usize {
    ALGEBRAIC_MAX_ITERATIONS
}

fn default_geometry_seed() -> u64 {
    GEOMETRY_SEED
}

impl Default for OcclusionStrategy {
    fn default() -> Self {
        OcclusionStrategy::Sampling {
            samples: OCCLUSION_SURFACE_SAMPLES,
            seed: GEOMETRY_SEED,
        }
    }
}

impl OcclusionStrategy {
    pub fn algebraic() -> Self {
        OcclusionStrategy::Algebraic {
            restarts: ALGEBRAIC_RESTARTS,
            tolerance: ALGEBRAIC_TOLERANCE,
            max_iterations: ALGEBRAIC_MAX_ITERATIONS,
            seed: GEOMETRY_SEED,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            OcclusionStrategy::Sampling { samples, .. } if samples == 0 => {
                Err(ConfigError::NoOcclusionSamples)
            }
            OcclusionStrategy::Algebraic { restarts, .. } if restarts == 0 => {
                Err(ConfigError::NoOcclusionSamples)
            }
            _ => Ok(()),
        }
    }
}

/// Hyperparameters of the hybrid swarm/annealing search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub swarm_size: usize,
    pub max_iterations: usize,
    pub initial_temperature: f64,
    /// Annealing perturbation is skipped at or below this temperature.
    pub min_temperature: f64,
    pub cooling_rate: f64,
    /// Perturbation half-width as a fraction of each dimension's range.
    pub sa_step_fraction: f64,
    /// Velocity clamp as a fraction of each dimension's range.
    pub velocity_clamp_fraction: f64,
    /// (start, end) of the linear inertia schedule.
    pub inertia: (f64, f64),
    /// (start, end) of the linear cognitive-coefficient schedule.
    pub cognitive: (f64, f64),
    /// (start, end) of the linear social-coefficient schedule.
    pub social: (f64, f64),
    /// RNG seed for determinism. Same seed = same run.
    pub seed: u64,
    /// Evaluate particle fitness across threads.
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            swarm_size: SWARM_SIZE,
            max_iterations: MAX_ITERATIONS,
            initial_temperature: INITIAL_TEMPERATURE,
            min_temperature: MIN_TEMPERATURE,
            cooling_rate: COOLING_RATE,
            sa_step_fraction: SA_STEP_FRACTION,
            velocity_clamp_fraction: VELOCITY_CLAMP_FRACTION,
            inertia: INERTIA_SCHEDULE,
            cognitive: COGNITIVE_SCHEDULE,
            social: SOCIAL_SCHEDULE,
            seed: OPTIMIZER_SEED,
            parallel: false,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm_size == 0 {
            return Err(ConfigError::EmptySwarm);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(ConfigError::CoolingRate(self.cooling_rate));
        }
        let temps_ok = self.initial_temperature.is_finite()
            && self.min_temperature.is_finite()
            && self.initial_temperature > 0.0
            && self.min_temperature > 0.0;
        if !temps_ok {
            return Err(ConfigError::Temperature {
                initial: self.initial_temperature,
                floor: self.min_temperature,
            });
        }

        let fractions = [
            ("sa_step_fraction", self.sa_step_fraction),
            ("velocity_clamp_fraction", self.velocity_clamp_fraction),
        ];
        for (name, value) in fractions {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ConfigError::Coefficient { name, value });
            }
        }
        let schedules = [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ];
        for (name, (start, end)) in schedules {
            if let Some(value) = [start, end].into_iter().find(|v| !v.is_finite()) {
                return Err(ConfigError::Coefficient { name, value });
            }
        }
        Ok(())
    }
}

/// Everything a planning run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokescreenConfig {
    pub scenario: Scenario,
    pub window: EvaluationWindow,
    pub occlusion: OcclusionStrategy,
    pub layout: ParameterLayout,
    pub bounds: SearchBounds,
    pub optimizer: OptimizerConfig,
    /// Known-good starting points, one coordinate vector per entry.
    pub seeds: Vec<Vec<f64>>,
}

impl Default for SmokescreenConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            window: EvaluationWindow::default(),
            occlusion: OcclusionStrategy::default(),
            layout: ParameterLayout::HeadingAngle,
            bounds: SearchBounds::default(),
            optimizer: OptimizerConfig::default(),
            seeds: vec![
                vec![120.0, 1.5, 3.6, 180.0],
                vec![115.0, 0.5, 2.0, 179.0],
                vec![114.0, 0.3, 0.0, 181.0],
            ],
        }
    }
}

impl SmokescreenConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every section. Called before any run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scenario.validate()?;
        self.window.validate()?;
        self.occlusion.validate()?;
        self.optimizer.validate()?;

        let expected = self.layout.dimensions();
        let found = self.bounds.dimensions();
        if expected != found {
            return Err(ConfigError::LayoutDimension { expected, found });
        }
        for (index, seed) in self.seeds.iter().enumerate() {
            if seed.len() != found {
                return Err(ConfigError::SeedDimension {
                    index,
                    expected: found,
                    found: seed.len(),
                });
            }
        }
        Ok(())
    }
}
