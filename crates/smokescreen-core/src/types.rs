//! Fundamental geometric and parameter types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EvalError};

/// 3D position or direction in scenario space (meters, Cartesian).
/// x, y = horizontal plane, z = Up (altitude).
pub type Vec3 = glam::DVec3;

/// One decoded candidate deployment of the smoke decoy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    /// Drone release speed (m/s), held constant for the whole flight.
    pub flight_speed: f64,
    /// Seconds after mission start at which the canister is dropped.
    pub drop_time: f64,
    /// Seconds between drop and detonation.
    pub explosion_delay: f64,
    /// Horizontal flight direction. Need not be unit length.
    pub heading: DVec2,
}

impl Deployment {
    pub fn new(flight_speed: f64, drop_time: f64, explosion_delay: f64, heading: DVec2) -> Self {
        Self {
            flight_speed,
            drop_time,
            explosion_delay,
            heading,
        }
    }

    /// Build a deployment whose heading is an angle in degrees,
    /// counter-clockwise from +x.
    pub fn with_heading_degrees(
        flight_speed: f64,
        drop_time: f64,
        explosion_delay: f64,
        heading_deg: f64,
    ) -> Self {
        let rad = heading_deg.to_radians();
        Self::new(
            flight_speed,
            drop_time,
            explosion_delay,
            DVec2::new(rad.cos(), rad.sin()),
        )
    }

    /// Seconds after mission start at which the cloud forms.
    pub fn detonation_time(&self) -> f64 {
        self.drop_time + self.explosion_delay
    }

    /// Unit heading, or `fallback` when the heading is zero-length or non-finite.
    pub fn unit_heading_or(&self, fallback: DVec2) -> DVec2 {
        self.heading.try_normalize().unwrap_or(fallback)
    }

    /// Decode an optimizer coordinate vector.
    pub fn from_coordinates(layout: ParameterLayout, coords: &[f64]) -> Result<Self, EvalError> {
        if coords.len() != layout.dimensions() {
            return Err(EvalError::WrongDimension {
                expected: layout.dimensions(),
                found: coords.len(),
            });
        }
        // A degenerate direction vector is substituted later, not rejected.
        let scalar = match layout {
            ParameterLayout::HeadingAngle => coords,
            ParameterLayout::HeadingVector => &coords[..3],
        };
        if let Some(index) = scalar.iter().position(|v| !v.is_finite()) {
            return Err(EvalError::NonFinite { index });
        }

        let deployment = match layout {
            ParameterLayout::HeadingAngle => {
                Self::with_heading_degrees(coords[0], coords[1], coords[2], coords[3])
            }
            ParameterLayout::HeadingVector => Self::new(
                coords[0],
                coords[1],
                coords[2],
                DVec2::new(coords[3], coords[4]),
            ),
        };
        deployment.check()?;
        Ok(deployment)
    }

    /// Reject physically meaningless values.
    pub fn check(&self) -> Result<(), EvalError> {
        let fields = [
            ("flight_speed", self.flight_speed),
            ("drop_time", self.drop_time),
            ("explosion_delay", self.explosion_delay),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EvalError::OutOfDomain { name, value });
            }
        }
        Ok(())
    }
}

/// How an optimizer coordinate vector maps onto a [`Deployment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterLayout {
    /// `[flight_speed, drop_time, explosion_delay, heading_deg]`.
    #[default]
    HeadingAngle,
    /// `[flight_speed, drop_time, explosion_delay, dir_x, dir_y]`.
    HeadingVector,
}

impl ParameterLayout {
    pub fn dimensions(self) -> usize {
        match self {
            ParameterLayout::HeadingAngle => 4,
            ParameterLayout::HeadingVector => 5,
        }
    }
}

/// Closed interval for one search dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for ParamRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Validated per-dimension search bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParamRange>", into = "Vec<ParamRange>")]
pub struct SearchBounds(Vec<ParamRange>);

impl SearchBounds {
    pub fn new(ranges: Vec<ParamRange>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::EmptyBounds);
        }
        for (dimension, range) in ranges.iter().enumerate() {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(ConfigError::NonFiniteBound { dimension });
            }
            if range.min > range.max {
                return Err(ConfigError::InvertedBound {
                    dimension,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(Self(ranges))
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn ranges(&self) -> &[ParamRange] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamRange> {
        self.0.iter()
    }

    /// Clip every coordinate of `point` into its dimension's range.
    pub fn clip(&self, point: &mut [f64]) {
        for (value, range) in point.iter_mut().zip(&self.0) {
            *value = range.clamp(*value);
        }
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.0.len() && point.iter().zip(&self.0).all(|(v, r)| r.contains(*v))
    }

    /// Bounds for the single-drone decoy problem, in the
    /// [`ParameterLayout::HeadingAngle`] layout.
    pub fn default_heading_angle() -> Self {
        Self(vec![
            ParamRange::new(70.0, 140.0),
            ParamRange::new(0.0, 10.0),
            ParamRange::new(0.0, 10.0),
            ParamRange::new(175.0, 185.0),
        ])
    }
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self::default_heading_angle()
    }
}

impl TryFrom<Vec<ParamRange>> for SearchBounds {
    type Error = ConfigError;

    fn try_from(ranges: Vec<ParamRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<SearchBounds> for Vec<ParamRange> {
    fn from(bounds: SearchBounds) -> Self {
        bounds.0
    }
}
