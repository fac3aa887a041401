//! Scenario constants: who starts where, the cloud, and the protected target.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Vec3;

/// Fixed physical setup of one engagement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub drone_start: Vec3,
    pub missile_start: Vec3,
    /// Missile closing speed (m/s).
    pub missile_speed: f64,
    /// Point the missile flies at in a straight line.
    pub missile_aim: Vec3,
    pub gravity: f64,
    pub smoke_radius: f64,
    /// Seconds the cloud stays effective after detonation.
    pub smoke_lifetime: f64,
    /// Sink rate of the cloud after detonation (m/s).
    pub smoke_sink_speed: f64,
    pub target: TargetCylinder,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            drone_start: Vec3::from_array(DRONE_START),
            missile_start: Vec3::from_array(MISSILE_START),
            missile_speed: MISSILE_SPEED,
            missile_aim: Vec3::from_array(MISSILE_AIM),
            gravity: GRAVITY,
            smoke_radius: SMOKE_RADIUS,
            smoke_lifetime: SMOKE_LIFETIME_SECS,
            smoke_sink_speed: SMOKE_SINK_SPEED,
            target: TargetCylinder::default(),
        }
    }
}

impl Scenario {
    /// Heading used when a candidate's heading is degenerate: horizontal
    /// direction from the drone start toward the missile's aim point.
    pub fn default_heading(&self) -> DVec2 {
        (self.missile_aim - self.drone_start)
            .truncate()
            .try_normalize()
            .unwrap_or(DVec2::NEG_X)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("missile_speed", self.missile_speed),
            ("smoke_radius", self.smoke_radius),
            ("smoke_lifetime", self.smoke_lifetime),
            ("target.radius", self.target.radius),
            ("target.height", self.target.height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Scenario { name, value });
            }
        }
        let non_negative = [
            ("gravity", self.gravity),
            ("smoke_sink_speed", self.smoke_sink_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Scenario { name, value });
            }
        }
        let path = self.missile_start.distance(self.missile_aim);
        if !path.is_finite() || path <= 0.0 {
            return Err(ConfigError::Scenario {
                name: "missile_start",
                value: path,
            });
        }
        Ok(())
    }
}

/// Vertical cylinder standing on its base disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetCylinder {
    pub base_center: Vec3,
    pub radius: f64,
    pub height: f64,
}

impl Default for TargetCylinder {
    fn default() -> Self {
        Self {
            base_center: Vec3::from_array(TARGET_BASE_CENTER),
            radius: TARGET_RADIUS,
            height: TARGET_HEIGHT,
        }
    }
}

impl TargetCylinder {
    /// Point on the lateral surface at angle `theta` (radians) and height `h`
    /// above the base.
    pub fn surface_point(&self, theta: f64, h: f64) -> Vec3 {
        self.base_center + Vec3::new(self.radius * theta.cos(), self.radius * theta.sin(), h)
    }
}

/// Evenly spaced sample times the coverage integral runs over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWindow {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for EvaluationWindow {
    fn default() -> Self {
        Self {
            start: WINDOW_START_SECS,
            end: WINDOW_END_SECS,
            samples: WINDOW_SAMPLES,
        }
    }
}

impl EvaluationWindow {
    /// Seconds credited for every occluded sample.
    pub fn dt(&self) -> f64 {
        (self.end - self.start) / self.samples as f64
    }

    /// Sample time `i`, spaced inclusively from `start` to `end`.
    pub fn time_at(&self, i: usize) -> f64 {
        if self.samples < 2 {
            return self.start;
        }
        self.start + (self.end - self.start) * i as f64 / (self.samples - 1) as f64
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(move |i| self.time_at(i))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.start.is_finite()
            && self.end.is_finite()
            && self.end > self.start
            && self.samples > 0;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::Window {
                start: self.start,
                end: self.end,
                samples: self.samples,
            })
        }
    }
}
