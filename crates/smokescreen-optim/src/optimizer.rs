//! Run driver: validate, build the swarm, spend the iteration budget.

use serde::{Deserialize, Serialize};
use tracing::info;

use smokescreen_core::config::OptimizerConfig;
use smokescreen_core::error::ConfigError;
use smokescreen_core::types::SearchBounds;

use crate::fitness::Fitness;
use crate::leaderboard::SolutionRecord;
use crate::swarm::Swarm;

/// What survives an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub best_params: Vec<f64>,
    pub best_fitness: f64,
    /// Up to ten best distinct solutions, best first.
    pub leaderboard: Vec<SolutionRecord>,
    pub iterations: usize,
    pub final_temperature: f64,
    pub evaluations: usize,
}

/// Particle swarm search annealed by Metropolis perturbation.
#[derive(Debug, Clone)]
pub struct HybridOptimizer {
    config: OptimizerConfig,
}

impl HybridOptimizer {
    pub fn new(config: OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Maximize `fitness` over `bounds`, starting some particles at `seeds`.
    ///
    /// Always spends the full iteration budget.
    pub fn optimize<F: Fitness>(
        &self,
        fitness: &F,
        bounds: &SearchBounds,
        seeds: &[Vec<f64>],
    ) -> Result<OptimizationOutcome, ConfigError> {
        self.optimize_with(fitness, bounds, seeds, |_| {})
    }

    /// Like [`Self::optimize`], calling `observer` after every iteration.
    pub fn optimize_with<F, O>(
        &self,
        fitness: &F,
        bounds: &SearchBounds,
        seeds: &[Vec<f64>],
        mut observer: O,
    ) -> Result<OptimizationOutcome, ConfigError>
    where
        F: Fitness,
        O: FnMut(&Swarm),
    {
        info!(
            swarm_size = self.config.swarm_size,
            max_iterations = self.config.max_iterations,
            dimensions = bounds.dimensions(),
            seeds = seeds.len(),
            parallel = self.config.parallel,
            "starting hybrid optimization"
        );

        let mut swarm = Swarm::new(self.config, bounds.clone(), fitness, seeds)?;
        while !swarm.is_finished() {
            swarm.step(fitness);
            observer(&swarm);
        }

        let (best_params, best_fitness, leaderboard, final_temperature, iterations, evaluations) =
            swarm.into_parts();
        info!(best_fitness, evaluations, "hybrid optimization finished");

        Ok(OptimizationOutcome {
            best_params,
            best_fitness,
            leaderboard: leaderboard.into_entries(),
            iterations,
            final_temperature,
            evaluations,
        })
    }
}
