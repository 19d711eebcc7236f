//! Rate-limited velocity driver
//!
//! Converts a per-tick pose delta into linear and angular velocity targets
//! and moves the body's velocities toward them by a bounded amount, so a
//! large jump of the hand never turns into one huge impulse.

use crate::foundation::math::{Vec3, Quat, utils};
use crate::physics::RigidBody;
use super::target::PoseDelta;

/// Shortest signed angle (degrees, in (-180, 180]) and axis of a rotation
pub fn effective_angle_axis(rotation: &Quat) -> (f32, Vec3) {
    let (angle, axis) = utils::to_angle_axis_degrees(rotation);
    (utils::normalize_angle_degrees(angle), axis)
}

/// Velocities that would cover a pose delta in exactly one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityTargets {
    /// Linear velocity target (m/s)
    pub linear: Vec3,
    /// Angular velocity target (rad/s)
    pub angular: Vec3,
}

impl Default for VelocityTargets {
    fn default() -> Self {
        Self {
            linear: Vec3::zeros(),
            angular: Vec3::zeros(),
        }
    }
}

impl VelocityTargets {
    /// Targets for `delta` over a tick of `dt` seconds
    ///
    /// Returns `None` for a zero, negative or non-finite `dt`.
    pub fn from_delta(delta: &PoseDelta, dt: f32) -> Option<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }

        let (angle, axis) = effective_angle_axis(&delta.rotation);
        Some(Self {
            linear: delta.position / dt,
            angular: axis * (utils::deg_to_rad(angle) / dt),
        })
    }

    /// Move the body's velocities toward these targets
    ///
    /// Each velocity changes by at most its limit (Euclidean distance).
    pub fn apply_rate_limited(
        &self,
        body: &mut impl RigidBody,
        max_velocity_change: f32,
        max_angular_velocity_change: f32,
    ) {
        body.set_velocity(utils::move_towards(body.velocity(), self.linear, max_velocity_change));
        body.set_angular_velocity(utils::move_towards(
            body.angular_velocity(),
            self.angular,
            max_angular_velocity_change,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils::deg_to_rad;
    use approx::assert_relative_eq;

    #[test]
    fn test_270_degrees_drives_minus_90() {
        let delta = PoseDelta {
            position: Vec3::zeros(),
            rotation: Quat::from_axis_angle(&Vec3::z_axis(), deg_to_rad(270.0)),
        };

        let (angle, axis) = effective_angle_axis(&delta.rotation);
        assert_relative_eq!(angle, -90.0, epsilon = 1e-3);
        assert_relative_eq!(axis, Vec3::z(), epsilon = 1e-5);

        let targets = VelocityTargets::from_delta(&delta, 0.5).unwrap();
        assert_relative_eq!(targets.angular, Vec3::new(0.0, 0.0, -deg_to_rad(90.0) / 0.5), epsilon = 1e-3);
    }

    #[test]
    fn test_effective_angle_always_in_half_open_range() {
        for degrees in (0..720).step_by(15) {
            let axis = nalgebra::Unit::new_normalize(Vec3::new(0.3, -1.0, 0.5));
            let rotation = Quat::from_axis_angle(&axis, deg_to_rad(degrees as f32));
            let (angle, _) = effective_angle_axis(&rotation);
            assert!(angle > -180.0 - 1e-3 && angle <= 180.0 + 1e-3, "{degrees} -> {angle}");
        }
    }

    #[test]
    fn test_linear_target_is_delta_over_dt() {
        let delta = PoseDelta {
            position: Vec3::new(0.1, 0.0, 0.0),
            rotation: Quat::identity(),
        };

        let targets = VelocityTargets::from_delta(&delta, 1.0 / 90.0).unwrap();
        assert_relative_eq!(targets.linear, Vec3::new(9.0, 0.0, 0.0), epsilon = 1e-4);
        assert_eq!(targets.angular, Vec3::zeros());
    }

    #[test]
    fn test_invalid_dt_yields_no_targets() {
        let delta = PoseDelta {
            position: Vec3::new(0.1, 0.0, 0.0),
            rotation: Quat::identity(),
        };

        assert!(VelocityTargets::from_delta(&delta, 0.0).is_none());
        assert!(VelocityTargets::from_delta(&delta, -0.01).is_none());
        assert!(VelocityTargets::from_delta(&delta, f32::NAN).is_none());
    }
}
