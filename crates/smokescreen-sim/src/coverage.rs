//! Coverage evaluator: integrates occluded time over the evaluation window.
//!
//! Pure function of its inputs: every call sees the same scenario, the same
//! fixed occlusion samples and the same time grid, so repeated or parallel
//! calls with equal parameters return equal durations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use smokescreen_core::config::SmokescreenConfig;
use smokescreen_core::error::{ConfigError, EvalError};
use smokescreen_core::scenario::{EvaluationWindow, Scenario};
use smokescreen_core::types::{Deployment, ParameterLayout};
use smokescreen_geometry::{Occluder, OcclusionTest};
use smokescreen_optim::Fitness;

use crate::motion::{BallisticMotion, MotionModel};

/// Contiguous run of occluded samples, by sample time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageInterval {
    pub start: f64,
    pub end: f64,
}

/// Full result of one coverage evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Occluded time in seconds.
    pub duration: f64,
    pub occluded_samples: usize,
    pub intervals: Vec<CoverageInterval>,
}

/// Fitness function: deployment in, seconds of occlusion out.
#[derive(Debug, Clone)]
pub struct CoverageEvaluator<M = BallisticMotion, O = Occluder> {
    scenario: Scenario,
    window: EvaluationWindow,
    layout: ParameterLayout,
    motion: M,
    occluder: O,
}

impl CoverageEvaluator {
    /// Build the default kinematics and configured occlusion test.
    pub fn from_config(config: &SmokescreenConfig) -> Result<Self, ConfigError> {
        config.scenario.validate()?;
        config.window.validate()?;
        config.occlusion.validate()?;
        let motion = BallisticMotion::new(&config.scenario)?;
        let occluder = Occluder::from_strategy(config.occlusion, config.scenario.target);
        Ok(Self::new(
            config.scenario,
            config.window,
            config.layout,
            motion,
            occluder,
        ))
    }
}

impl<M: MotionModel, O: OcclusionTest> CoverageEvaluator<M, O> {
    pub fn new(
        scenario: Scenario,
        window: EvaluationWindow,
        layout: ParameterLayout,
        motion: M,
        occluder: O,
    ) -> Self {
        Self {
            scenario,
            window,
            layout,
            motion,
            occluder,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn window(&self) -> &EvaluationWindow {
        &self.window
    }

    pub fn layout(&self) -> ParameterLayout {
        self.layout
    }

    /// Whether the target is hidden at time `t`.
    pub fn occluded_at(&self, deployment: &Deployment, t: f64) -> bool {
        let since = t - deployment.detonation_time();
        if since < 0.0 || since > self.scenario.smoke_lifetime {
            return false;
        }
        let Some(smoke) = self.motion.drone_trajectory(deployment, t).smoke_position else {
            return false;
        };
        let missile = self.motion.missile_position(t);
        self.occluder.occluded(missile, smoke, self.scenario.smoke_radius)
    }

    /// Scan the window and collect occluded runs.
    pub fn try_coverage_report(&self, deployment: &Deployment) -> Result<CoverageReport, EvalError> {
        deployment.check()?;

        let dt = self.window.dt();
        let mut report = CoverageReport::default();
        let mut open: Option<CoverageInterval> = None;

        for t in self.window.times() {
            if self.occluded_at(deployment, t) {
                report.occluded_samples += 1;
                match open.as_mut() {
                    Some(interval) => interval.end = t,
                    None => open = Some(CoverageInterval { start: t, end: t }),
                }
            } else if let Some(interval) = open.take() {
                report.intervals.push(interval);
            }
        }
        report.intervals.extend(open);
        report.duration = report.occluded_samples as f64 * dt;
        Ok(report)
    }

    /// Like [`Self::try_coverage_report`], recovering faults as an empty report.
    pub fn coverage_report(&self, deployment: &Deployment) -> CoverageReport {
        self.try_coverage_report(deployment).unwrap_or_else(|err| {
            debug!(%err, ?deployment, "coverage evaluation failed, scoring zero");
            CoverageReport::default()
        })
    }

    /// Seconds of occlusion for `deployment`; 0 if it cannot be evaluated.
    pub fn coverage_duration(&self, deployment: &Deployment) -> f64 {
        let duration = self.coverage_report(deployment).duration;
        if duration.is_finite() {
            duration
        } else {
            0.0
        }
    }

    /// Optimizer-facing fitness over raw coordinates in the configured layout.
    pub fn fitness(&self, coords: &[f64]) -> f64 {
        match Deployment::from_coordinates(self.layout, coords) {
            Ok(deployment) => self.coverage_duration(&deployment),
            Err(err) => {
                debug!(%err, ?coords, "undecodable candidate, scoring zero");
                0.0
            }
        }
    }
}

impl<M: MotionModel, O: OcclusionTest> Fitness for CoverageEvaluator<M, O> {
    fn evaluate(&self, params: &[f64]) -> f64 {
        self.fitness(params)
    }
}
