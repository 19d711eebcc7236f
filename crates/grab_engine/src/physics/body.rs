//! Rigid body interface consumed by the attachment controller
//!
//! The physics host owns mass, integration and collision resolution. The
//! controller only reads and writes the state exposed here, which lets any
//! body representation (engine body, networked proxy, test double) be driven.

use crate::foundation::math::{Vec3, Quat, Pose};

/// Result of a swept collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Distance travelled along the sweep direction before contact
    pub distance: f32,
    /// Contact point in world space
    pub point: Vec3,
    /// Surface normal at the contact, pointing away from the obstacle
    pub normal: Vec3,
}

/// Dynamic rigid body driven by the physics host
pub trait RigidBody {
    /// World position
    fn position(&self) -> Vec3;

    /// Set world position directly (teleport)
    fn set_position(&mut self, position: Vec3);

    /// World rotation
    fn rotation(&self) -> Quat;

    /// Set world rotation directly (teleport)
    fn set_rotation(&mut self, rotation: Quat);

    /// Linear velocity in m/s
    fn velocity(&self) -> Vec3;

    /// Set linear velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Angular velocity in rad/s
    fn angular_velocity(&self) -> Vec3;

    /// Set angular velocity
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);

    /// Angular speed clamp applied by the host
    fn max_angular_velocity(&self) -> f32;

    /// Set the angular speed clamp
    fn set_max_angular_velocity(&mut self, max_angular_velocity: f32);

    /// Whether the host skips angular integration for this body
    fn freeze_rotation(&self) -> bool;

    /// Freeze or unfreeze angular integration
    fn set_freeze_rotation(&mut self, frozen: bool);

    /// Whether gravity is applied to this body
    fn use_gravity(&self) -> bool;

    /// Enable or disable gravity
    fn set_use_gravity(&mut self, enabled: bool);

    /// Move the body to `position` as part of this physics step
    ///
    /// Hosts that interpolate kinematic moves may override this; the default
    /// commits the position immediately.
    fn move_position(&mut self, position: Vec3) {
        self.set_position(position);
    }

    /// Rotate the body to `rotation` as part of this physics step
    fn move_rotation(&mut self, rotation: Quat) {
        self.set_rotation(rotation);
    }

    /// Sweep the body's shape from its current pose along `direction`
    ///
    /// `direction` is unit length. Returns the first obstruction closer than
    /// `max_distance`, or `None` when the way is clear.
    fn sweep_test(&self, direction: Vec3, max_distance: f32) -> Option<SweepHit>;

    /// Current world pose
    fn pose(&self) -> Pose {
        Pose::new(self.position(), self.rotation())
    }
}

/// Receiver of per-tick collision notifications
///
/// The host calls these before running the listener's tick in the same
/// frame. Several notifications within one frame are equivalent to one.
pub trait CollisionListener {
    /// A contact started this frame
    fn on_collision_begin(&mut self);

    /// A contact from a previous frame is still touching
    fn on_collision_persist(&mut self);
}
