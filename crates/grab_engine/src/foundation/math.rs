//! Math utilities and types
//!
//! Provides the vector, rotation and pose types shared by the physics host
//! and the attachment controller, plus the small set of helpers the
//! controller needs every tick (angle/axis decomposition, rate limiting).

pub use nalgebra::{
    Vector3,
    Quaternion,
    UnitQuaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Rigid pose: position and rotation in a parent space (usually world space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create a new identity pose
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose with only rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    /// Apply this pose to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Combine this pose (parent) with a pose expressed in its local space
    pub fn combine(&self, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(local.position),
            rotation: self.rotation * local.rotation,
        }
    }

    /// Get the inverse pose
    pub fn inverse(&self) -> Pose {
        let inv_rotation = self.rotation.inverse();
        Pose {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }

    /// Express this pose in the local space of `parent`
    ///
    /// `parent.combine(&self.relative_to(parent))` yields `self` again.
    pub fn relative_to(&self, parent: &Pose) -> Pose {
        parent.inverse().combine(self)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Lengths below this are treated as zero when normalizing
    pub const LENGTH_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Wrap an angle in degrees into the half-open range (-180, 180]
    pub fn normalize_angle_degrees(angle: f32) -> f32 {
        let wrapped = angle % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped <= -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Decompose a rotation into an angle in degrees, in [0, 360], and a unit axis
    ///
    /// Unlike [`UnitQuaternion::axis_angle`], the angle is not folded into
    /// [0, 180]: a quaternion with a negative scalar part reports the long way
    /// around. Callers wanting the shortest rotation pass the angle through
    /// [`normalize_angle_degrees`]. An identity rotation yields `(0.0, +X)`.
    pub fn to_angle_axis_degrees(rotation: &Quat) -> (f32, Vec3) {
        let q = rotation.quaternion();
        let imag = q.imag();
        let sin_half = imag.magnitude();
        if sin_half < constants::LENGTH_EPSILON {
            return (0.0, Vec3::x());
        }

        let angle = 2.0 * sin_half.atan2(q.w);
        (rad_to_deg(angle), imag / sin_half)
    }

    /// Move `current` toward `target` by at most `max_delta` (Euclidean distance)
    ///
    /// Reaches `target` exactly when it is within `max_delta`.
    pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
        let diff = target - current;
        let distance = diff.magnitude();
        if distance <= max_delta || distance < constants::LENGTH_EPSILON {
            return target;
        }
        current + diff / distance * max_delta
    }

    /// Split a displacement into a unit direction and its length
    ///
    /// Returns `None` for a degenerate (near zero length or non-finite)
    /// displacement, whose direction is undefined.
    pub fn direction_and_distance(displacement: Vec3) -> Option<(Vec3, f32)> {
        let distance = displacement.magnitude();
        if !distance.is_finite() || distance < constants::LENGTH_EPSILON {
            return None;
        }
        Some((displacement / distance, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_normalize_angle_range() {
        assert_relative_eq!(normalize_angle_degrees(270.0), -90.0, epsilon = EPSILON);
        assert_relative_eq!(normalize_angle_degrees(180.0), 180.0, epsilon = EPSILON);
        assert_relative_eq!(normalize_angle_degrees(-180.0), 180.0, epsilon = EPSILON);
        assert_relative_eq!(normalize_angle_degrees(359.0), -1.0, epsilon = 1e-3);
        assert_relative_eq!(normalize_angle_degrees(45.0), 45.0, epsilon = EPSILON);
        assert_relative_eq!(normalize_angle_degrees(-540.0), 180.0, epsilon = EPSILON);
    }

    #[test]
    fn test_angle_axis_keeps_long_way_around() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(270.0));
        let (angle, axis) = to_angle_axis_degrees(&rotation);

        assert_relative_eq!(angle, 270.0, epsilon = 1e-3);
        assert_relative_eq!(axis, Vec3::y(), epsilon = EPSILON);

        // Folding back gives the equivalent short rotation
        assert_relative_eq!(normalize_angle_degrees(angle), -90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_angle_axis_small_angle_precision() {
        let radians = 1e-3;
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), radians);
        let (angle, axis) = to_angle_axis_degrees(&rotation);

        assert_relative_eq!(angle, rad_to_deg(radians), max_relative = 1e-4);
        assert_relative_eq!(axis, Vec3::z(), epsilon = EPSILON);
    }

    #[test]
    fn test_angle_axis_identity() {
        let (angle, axis) = to_angle_axis_degrees(&Quat::identity());
        assert_eq!(angle, 0.0);
        assert_relative_eq!(axis.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_move_towards_clamps_distance() {
        let current = Vec3::zeros();
        let target = Vec3::new(9.0, 0.0, 0.0);

        let moved = move_towards(current, target, 2.0);
        assert_relative_eq!(moved, Vec3::new(2.0, 0.0, 0.0), epsilon = EPSILON);

        let reached = move_towards(current, target, 20.0);
        assert_eq!(reached, target);
    }

    #[test]
    fn test_move_towards_diagonal() {
        let current = Vec3::new(1.0, 1.0, 0.0);
        let target = Vec3::new(4.0, 5.0, 0.0);

        let moved = move_towards(current, target, 2.5);
        assert_relative_eq!((moved - current).magnitude(), 2.5, epsilon = EPSILON);
        assert_relative_eq!(moved, Vec3::new(2.5, 3.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_direction_and_distance_degenerate() {
        assert!(direction_and_distance(Vec3::zeros()).is_none());
        assert!(direction_and_distance(Vec3::new(f32::NAN, 0.0, 0.0)).is_none());

        let (dir, dist) = direction_and_distance(Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(dist, 5.0, epsilon = EPSILON);
        assert_relative_eq!(dir, Vec3::new(0.0, 0.6, 0.8), epsilon = EPSILON);
    }

    #[test]
    fn test_pose_relative_roundtrip() {
        let parent = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(&Vec3::z_axis(), 0.7),
        );
        let child = Pose::new(
            Vec3::new(-0.5, 4.0, 1.0),
            Quat::from_axis_angle(&Vec3::x_axis(), -1.1),
        );

        let local = child.relative_to(&parent);
        let rebuilt = parent.combine(&local);

        assert_relative_eq!(rebuilt.position, child.position, epsilon = 1e-4);
        assert_relative_eq!(rebuilt.rotation.angle_to(&child.rotation), 0.0, epsilon = 1e-3);
    }
}
