//! Motion model: drone, canister, cloud and missile positions at time `t`.
//!
//! The drone flies level at constant speed along its heading. The canister
//! keeps the drone's horizontal velocity after release and free-falls until
//! detonation; the cloud then sinks at a constant rate for its lifetime. The
//! missile flies a straight line toward its aim point at constant speed.

use glam::DVec2;

use smokescreen_core::error::ConfigError;
use smokescreen_core::scenario::Scenario;
use smokescreen_core::types::{Deployment, Vec3};

/// Where the canister is released and bursts, and where the cloud is now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneFix {
    pub drop_position: Vec3,
    pub explosion_position: Vec3,
    /// Cloud centre, absent before detonation and after dissipation.
    pub smoke_position: Option<Vec3>,
}

/// Kinematics consumed by the coverage evaluator.
pub trait MotionModel: Send + Sync {
    fn drone_trajectory(&self, deployment: &Deployment, t: f64) -> DroneFix;

    fn missile_position(&self, t: f64) -> Vec3;
}

/// Closed-form kinematics for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticMotion {
    drone_start: Vec3,
    missile_start: Vec3,
    missile_velocity: Vec3,
    default_heading: DVec2,
    gravity: f64,
    smoke_lifetime: f64,
    smoke_sink_speed: f64,
}

impl BallisticMotion {
    pub fn new(scenario: &Scenario) -> Result<Self, ConfigError> {
        let path = scenario.missile_aim - scenario.missile_start;
        let direction = path.try_normalize().ok_or(ConfigError::Scenario {
            name: "missile_start",
            value: path.length(),
        })?;
        Ok(Self {
            drone_start: scenario.drone_start,
            missile_start: scenario.missile_start,
            missile_velocity: direction * scenario.missile_speed,
            default_heading: scenario.default_heading(),
            gravity: scenario.gravity,
            smoke_lifetime: scenario.smoke_lifetime,
            smoke_sink_speed: scenario.smoke_sink_speed,
        })
    }

    /// Unit horizontal heading actually flown for `deployment`.
    pub fn heading_for(&self, deployment: &Deployment) -> DVec2 {
        deployment.unit_heading_or(self.default_heading)
    }

    /// Whether the cloud exists at time `t`.
    pub fn smoke_active(&self, deployment: &Deployment, t: f64) -> bool {
        let since = t - deployment.detonation_time();
        (0.0..=self.smoke_lifetime).contains(&since)
    }
}

impl MotionModel for BallisticMotion {
    fn drone_trajectory(&self, deployment: &Deployment, t: f64) -> DroneFix {
        let heading = self.heading_for(deployment).extend(0.0);
        let ground_velocity = heading * deployment.flight_speed;

        let drop_position = self.drone_start + ground_velocity * deployment.drop_time;

        // Horizontal drift at release speed, vertical free fall from rest.
        let delay = deployment.explosion_delay;
        let mut explosion_position = drop_position + ground_velocity * delay;
        explosion_position.z = drop_position.z - 0.5 * self.gravity * delay * delay;

        let smoke_position = self.smoke_active(deployment, t).then(|| {
            let since = t - deployment.detonation_time();
            explosion_position - Vec3::Z * (self.smoke_sink_speed * since)
        });

        DroneFix {
            drop_position,
            explosion_position,
            smoke_position,
        }
    }

    fn missile_position(&self, t: f64) -> Vec3 {
        self.missile_start + self.missile_velocity * t
    }
}
