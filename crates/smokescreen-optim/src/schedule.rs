//! Coefficient and temperature schedules.

use smokescreen_core::config::OptimizerConfig;

/// PSO weights for one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

/// Linear interpolation of every schedule at `iteration / max_iterations`.
pub fn coefficients_at(config: &OptimizerConfig, iteration: usize) -> Coefficients {
    let progress = iteration as f64 / config.max_iterations.max(1) as f64;
    Coefficients {
        inertia: lerp(config.inertia, progress),
        cognitive: lerp(config.cognitive, progress),
        social: lerp(config.social, progress),
    }
}

/// One cooling step, never dropping below the floor.
pub fn cool(config: &OptimizerConfig, temperature: f64) -> f64 {
    (temperature * config.cooling_rate).max(config.min_temperature)
}

/// Metropolis acceptance probability for a move from `current` to `candidate`.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate > current {
        1.0
    } else {
        ((candidate - current) / temperature).exp()
    }
}

fn lerp((start, end): (f64, f64), t: f64) -> f64 {
    start + (end - start) * t
}
