//! Hybrid particle-swarm / simulated-annealing search for SMOKESCREEN.
//!
//! A particle swarm with linearly scheduled coefficients, where every
//! iteration also perturbs each particle's personal best under a
//! geometrically cooled Metropolis rule. Fitness is maximized.

pub mod fitness;
pub mod leaderboard;
pub mod optimizer;
pub mod schedule;
pub mod swarm;

pub use smokescreen_core as core;
pub use fitness::Fitness;
pub use leaderboard::{Leaderboard, SolutionRecord};
pub use optimizer::{HybridOptimizer, OptimizationOutcome};
pub use swarm::{Particle, Swarm};
