//! Shadow cone cast by a spherical cloud.
//!
//! The cone has its apex at the missile and is tangent to the sphere.
//! Its half-angle satisfies `cos θ = √(d² − r²) / d`, where `d` is the
//! apex-to-centre distance and `r` the sphere radius.

use smokescreen_core::types::Vec3;

/// Tangent cone from a viewpoint outside (or on) a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCone {
    apex: Vec3,
    center: Vec3,
    radius: f64,
    /// Apex-to-centre vector (α).
    axis: Vec3,
    distance: f64,
    /// Distance from the apex to the tangent circle, `√(d² − r²)`.
    tangent_length: f64,
    cos_half_angle: f64,
}

impl ShadowCone {
    /// Build the cone. Returns `None` when the apex is strictly inside the
    /// sphere, where no tangent cone exists.
    pub fn new(apex: Vec3, center: Vec3, radius: f64) -> Option<Self> {
        let axis = center - apex;
        let distance = axis.length();
        if !(distance > 0.0) || distance < radius {
            return None;
        }
        let tangent_length = (distance * distance - radius * radius).sqrt();
        Some(Self {
            apex,
            center,
            radius,
            axis,
            distance,
            tangent_length,
            cos_half_angle: tangent_length / distance,
        })
    }

    pub fn cos_half_angle(&self) -> f64 {
        self.cos_half_angle
    }

    pub fn tangent_length(&self) -> f64 {
        self.tangent_length
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Cosine of the angle between the cone axis and the ray to `point`.
    /// A point at the apex itself has no direction and reports -1.
    pub fn cos_angle_to(&self, point: Vec3) -> f64 {
        let beta = point - self.apex;
        let beta_len = beta.length();
        if beta_len == 0.0 {
            return -1.0;
        }
        self.axis.dot(beta) / (self.distance * beta_len)
    }

    /// Signed boundary residual: positive inside the cone, zero on its
    /// surface, negative outside.
    pub fn boundary_residual(&self, point: Vec3) -> f64 {
        self.cos_angle_to(point) - self.cos_half_angle
    }

    /// Whether `point` is hidden from the apex by the sphere.
    ///
    /// The point must lie strictly inside the cone, on the forward side of
    /// the apex, and must not sit in front of the cloud: a point closer than
    /// the tangent length that is also outside the sphere is still visible.
    pub fn shadows(&self, point: Vec3) -> bool {
        let beta = point - self.apex;
        if self.axis.dot(beta) < 0.0 {
            return false;
        }
        if self.cos_angle_to(point) <= self.cos_half_angle {
            return false;
        }
        let in_front = beta.length() < self.tangent_length && point.distance(self.center) > self.radius;
        !in_front
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_angle_formula() {
        // d = 20, r = 10 → half-angle 30°.
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), 10.0).unwrap();
        let expected = (300.0_f64).sqrt() / 20.0;
        assert!((cone.cos_half_angle() - expected).abs() < 1e-12);
        assert!((cone.cos_half_angle() - 30.0_f64.to_radians().cos()).abs() < 1e-12);
        assert!((cone.tangent_length() - 300.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(cone.distance(), 20.0);
    }

    #[test]
    fn test_no_cone_from_inside_sphere() {
        assert!(ShadowCone::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 10.0).is_none());
        // On the surface the cone degenerates to a half-space.
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 10.0).unwrap();
        assert!(cone.cos_half_angle().abs() < 1e-12);
    }

    #[test]
    fn test_point_behind_sphere_is_shadowed() {
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0).unwrap();
        assert!(cone.shadows(Vec3::new(200.0, 1.0, 1.0)));
        assert!(cone.boundary_residual(Vec3::new(200.0, 1.0, 1.0)) > 0.0);
    }

    #[test]
    fn test_point_outside_cone_is_visible() {
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0).unwrap();
        assert!(!cone.shadows(Vec3::new(200.0, 50.0, 0.0)));
        assert!(cone.boundary_residual(Vec3::new(200.0, 50.0, 0.0)) < 0.0);
    }

    #[test]
    fn test_point_behind_apex_is_visible() {
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0).unwrap();
        assert!(!cone.shadows(Vec3::new(-200.0, 0.0, 0.0)));
    }

    #[test]
    fn test_point_in_front_of_cloud_is_visible() {
        let cone = ShadowCone::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0).unwrap();
        // On the axis, between the apex and the sphere.
        assert!(!cone.shadows(Vec3::new(50.0, 0.0, 0.0)));
        // Inside the sphere counts as hidden.
        assert!(cone.shadows(Vec3::new(95.0, 0.0, 0.0)));
    }
}
