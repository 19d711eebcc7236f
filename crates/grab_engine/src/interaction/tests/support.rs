//! Scripted rigid body for controller tests

use std::cell::RefCell;

use crate::foundation::math::{Vec3, Quat, Pose};
use crate::interaction::{HandId, TrackedHand};
use crate::physics::{RigidBody, SweepHit};

/// One recorded `sweep_test` call
#[derive(Debug, Clone, Copy)]
pub struct SweepCall {
    pub direction: Vec3,
    pub distance: f32,
    pub rotation: Quat,
}

/// Body whose sweep result is set by the test
#[derive(Debug)]
pub struct ScriptedBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub max_angular_velocity: f32,
    pub freeze_rotation: bool,
    pub use_gravity: bool,
    pub blocked: bool,
    pub sweeps: RefCell<Vec<SweepCall>>,
}

impl ScriptedBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            max_angular_velocity: 7.0,
            freeze_rotation: false,
            use_gravity: true,
            blocked: false,
            sweeps: RefCell::new(Vec::new()),
        }
    }

    pub fn sweep_count(&self) -> usize {
        self.sweeps.borrow().len()
    }
}

impl RigidBody for ScriptedBody {
    fn position(&self) -> Vec3 { self.position }
    fn set_position(&mut self, position: Vec3) { self.position = position; }
    fn rotation(&self) -> Quat { self.rotation }
    fn set_rotation(&mut self, rotation: Quat) { self.rotation = rotation; }
    fn velocity(&self) -> Vec3 { self.velocity }
    fn set_velocity(&mut self, velocity: Vec3) { self.velocity = velocity; }
    fn angular_velocity(&self) -> Vec3 { self.angular_velocity }
    fn set_angular_velocity(&mut self, angular_velocity: Vec3) { self.angular_velocity = angular_velocity; }
    fn max_angular_velocity(&self) -> f32 { self.max_angular_velocity }
    fn set_max_angular_velocity(&mut self, max: f32) { self.max_angular_velocity = max; }
    fn freeze_rotation(&self) -> bool { self.freeze_rotation }
    fn set_freeze_rotation(&mut self, frozen: bool) { self.freeze_rotation = frozen; }
    fn use_gravity(&self) -> bool { self.use_gravity }
    fn set_use_gravity(&mut self, enabled: bool) { self.use_gravity = enabled; }

    fn sweep_test(&self, direction: Vec3, max_distance: f32) -> Option<SweepHit> {
        self.sweeps.borrow_mut().push(SweepCall {
            direction,
            distance: max_distance,
            rotation: self.rotation,
        });

        self.blocked.then(|| SweepHit {
            distance: max_distance * 0.5,
            point: self.position + direction * max_distance * 0.5,
            normal: -direction,
        })
    }
}

pub const TICK: f32 = 1.0 / 90.0;

pub fn hand_at(position: Vec3) -> TrackedHand {
    TrackedHand::new(HandId::RIGHT, Pose::from_position(position))
}
