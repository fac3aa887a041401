//! Swarm state and the per-iteration update.
//!
//! `Swarm` owns every particle, the global best, the leaderboard, the
//! temperature and the run's RNG. It is advanced one iteration at a time with
//! [`Swarm::step`], so callers can observe the state between iterations.
//!
//! All random draws come from one `ChaCha8Rng` in a fixed order, and fitness
//! is only ever evaluated in batches whose results are consumed in particle
//! order. Serial and parallel runs with the same seed are therefore identical.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use smokescreen_core::config::OptimizerConfig;
use smokescreen_core::constants::INITIAL_VELOCITY_FRACTION;
use smokescreen_core::error::ConfigError;
use smokescreen_core::types::SearchBounds;

use crate::fitness::{sanitize, Fitness};
use crate::leaderboard::Leaderboard;
use crate::schedule;

/// One candidate moving through the search space.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub best_position: Vec<f64>,
    pub best_fitness: f64,
}

/// The whole search state of one optimization run.
pub struct Swarm {
    config: OptimizerConfig,
    bounds: SearchBounds,
    particles: Vec<Particle>,
    global_best_position: Vec<f64>,
    global_best_fitness: f64,
    temperature: f64,
    iteration: usize,
    evaluations: usize,
    leaderboard: Leaderboard,
    rng: ChaCha8Rng,
}

impl Swarm {
    /// Place and score the initial swarm.
    ///
    /// The first particles start at the (clipped) `seeds`; the rest are
    /// uniform within `bounds`. Seeds beyond the swarm size are ignored.
    pub fn new<F: Fitness>(
        config: OptimizerConfig,
        bounds: SearchBounds,
        fitness: &F,
        seeds: &[Vec<f64>],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dims = bounds.dimensions();
        for (index, seed) in seeds.iter().enumerate() {
            if seed.len() != dims {
                return Err(ConfigError::SeedDimension {
                    index,
                    expected: dims,
                    found: seed.len(),
                });
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut positions = Vec::with_capacity(config.swarm_size);
        let mut velocities = Vec::with_capacity(config.swarm_size);

        for i in 0..config.swarm_size {
            let position = match seeds.get(i) {
                Some(seed) => {
                    let mut p = seed.clone();
                    bounds.clip(&mut p);
                    p
                }
                None => bounds
                    .iter()
                    .map(|r| uniform(&mut rng, r.min, r.max))
                    .collect(),
            };
            let velocity = bounds
                .iter()
                .map(|r| {
                    let half = INITIAL_VELOCITY_FRACTION * r.width();
                    let limit = config.velocity_clamp_fraction * r.width();
                    uniform(&mut rng, -half, half).clamp(-limit, limit)
                })
                .collect();
            positions.push(position);
            velocities.push(velocity);
        }

        let scores = evaluate_batch(fitness, &positions, config.parallel);

        let particles: Vec<Particle> = positions
            .into_iter()
            .zip(velocities)
            .zip(&scores)
            .map(|((position, velocity), &score)| Particle {
                best_position: position.clone(),
                position,
                velocity,
                best_fitness: score,
            })
            .collect();

        let mut swarm = Self {
            config,
            bounds,
            global_best_position: particles[0].position.clone(),
            global_best_fitness: f64::NEG_INFINITY,
            particles,
            temperature: config.initial_temperature,
            iteration: 0,
            evaluations: scores.len(),
            leaderboard: Leaderboard::default(),
            rng,
        };
        for i in 0..swarm.particles.len() {
            let score = swarm.particles[i].best_fitness;
            if score > swarm.global_best_fitness {
                swarm.global_best_fitness = score;
                swarm.global_best_position = swarm.particles[i].position.clone();
            }
        }
        let best = swarm.global_best_position.clone();
        swarm.leaderboard.offer(swarm.global_best_fitness, &best);
        Ok(swarm)
    }

    /// Run one full iteration: coefficients, move, rescore, anneal, cool.
    pub fn step<F: Fitness>(&mut self, fitness: &F) {
        let coeffs = schedule::coefficients_at(&self.config, self.iteration);
        self.move_particles(coeffs);
        self.rescore(fitness);
        if self.perturbation_active() {
            self.anneal(fitness);
        }
        self.temperature = schedule::cool(&self.config, self.temperature);
        self.iteration += 1;

        debug!(
            iteration = self.iteration,
            best_fitness = self.global_best_fitness,
            temperature = self.temperature,
            "swarm iteration complete"
        );
    }

    fn move_particles(&mut self, coeffs: schedule::Coefficients) {
        let clamp_fraction = self.config.velocity_clamp_fraction;
        for particle in &mut self.particles {
            for (d, range) in self.bounds.iter().enumerate() {
                let r1: f64 = self.rng.gen();
                let r2: f64 = self.rng.gen();
                let x = particle.position[d];
                let v = coeffs.inertia * particle.velocity[d]
                    + coeffs.cognitive * r1 * (particle.best_position[d] - x)
                    + coeffs.social * r2 * (self.global_best_position[d] - x);
                let limit = clamp_fraction * range.width();
                let v = v.clamp(-limit, limit);
                particle.velocity[d] = v;
                particle.position[d] = range.clamp(x + v);
            }
        }
    }

    fn rescore<F: Fitness>(&mut self, fitness: &F) {
        let positions: Vec<Vec<f64>> = self.particles.iter().map(|p| p.position.clone()).collect();
        let scores = evaluate_batch(fitness, &positions, self.config.parallel);
        self.evaluations += scores.len();

        for (particle, score) in self.particles.iter_mut().zip(scores) {
            if score > particle.best_fitness {
                particle.best_fitness = score;
                particle.best_position.clone_from(&particle.position);
            }
            if score > self.global_best_fitness {
                self.global_best_fitness = score;
                self.global_best_position.clone_from(&particle.position);
                self.leaderboard.offer(score, &particle.position);
            }
        }
    }

    /// Metropolis perturbation of every personal best.
    fn anneal<F: Fitness>(&mut self, fitness: &F) {
        let step_fraction = self.config.sa_step_fraction;
        let candidates: Vec<Vec<f64>> = self
            .particles
            .iter()
            .map(|particle| {
                particle
                    .best_position
                    .iter()
                    .zip(self.bounds.iter())
                    .map(|(&x, range)| {
                        let half = step_fraction * range.width();
                        range.clamp(x + uniform(&mut self.rng, -half, half))
                    })
                    .collect()
            })
            .collect();
        let scores = evaluate_batch(fitness, &candidates, self.config.parallel);
        self.evaluations += scores.len();

        let temperature = self.temperature;
        for (particle, (candidate, score)) in
            self.particles.iter_mut().zip(candidates.into_iter().zip(scores))
        {
            let current = particle.best_fitness;
            let accept = score > current
                || self.rng.gen::<f64>()
                    < schedule::acceptance_probability(current, score, temperature);
            if !accept {
                continue;
            }
            trace!(from = current, to = score, temperature, "annealing move accepted");
            particle.best_fitness = score;
            particle.best_position = candidate;
            if score > self.global_best_fitness {
                self.global_best_fitness = score;
                self.global_best_position.clone_from(&particle.best_position);
                self.leaderboard.offer(score, &particle.best_position);
            }
        }
    }

    /// Whether the annealing step still runs.
    pub fn perturbation_active(&self) -> bool {
        self.temperature > self.config.min_temperature
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.max_iterations
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn global_best(&self) -> (&[f64], f64) {
        (&self.global_best_position, self.global_best_fitness)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Total fitness evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, f64, Leaderboard, f64, usize, usize) {
        (
            self.global_best_position,
            self.global_best_fitness,
            self.leaderboard,
            self.temperature,
            self.iteration,
            self.evaluations,
        )
    }
}

/// Score every point. Results come back in input order either way.
fn evaluate_batch<F: Fitness>(fitness: &F, points: &[Vec<f64>], parallel: bool) -> Vec<f64> {
    if parallel {
        points
            .par_iter()
            .map(|p| sanitize(fitness.evaluate(p)))
            .collect()
    } else {
        points.iter().map(|p| sanitize(fitness.evaluate(p))).collect()
    }
}

/// Uniform draw on `[lo, hi]`; a degenerate interval yields `lo` without
/// consuming randomness.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}
