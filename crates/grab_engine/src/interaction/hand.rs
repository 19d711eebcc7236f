//! Hand (anchor pose) interface consumed from the input layer

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::foundation::math::{Quat, Pose};

/// Hand-relative frame an interaction point is aligned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HandReferenceSpace {
    /// Raw tracked controller orientation
    Controller,
    /// Closed-fist grip, e.g. holding a handle
    #[default]
    HandGrip,
    /// Pointing forward along the index finger
    HandPointer,
}

impl HandReferenceSpace {
    /// All reference spaces, in declaration order
    pub const ALL: [Self; 3] = [Self::Controller, Self::HandGrip, Self::HandPointer];

    fn index(self) -> usize {
        match self {
            Self::Controller => 0,
            Self::HandGrip => 1,
            Self::HandPointer => 2,
        }
    }
}

/// Identifier of a tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandId(pub u32);

impl HandId {
    /// Conventional left hand id
    pub const LEFT: Self = Self(0);
    /// Conventional right hand id
    pub const RIGHT: Self = Self(1);
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A hand or controller that can hold an item
pub trait Hand {
    /// Stable identifier of this hand
    fn id(&self) -> HandId;

    /// Current world pose
    fn pose(&self) -> Pose;

    /// Rotation of the given reference space relative to the hand
    fn reference_rotation(&self, space: HandReferenceSpace) -> Quat;
}

/// Plain tracked hand: a pose updated by the input layer every frame
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedHand {
    id: HandId,
    pose: Pose,
    reference_rotations: [Quat; 3],
}

impl TrackedHand {
    /// Create a hand at `pose` with identity reference spaces
    pub fn new(id: HandId, pose: Pose) -> Self {
        Self {
            id,
            pose,
            reference_rotations: [Quat::identity(); 3],
        }
    }

    /// Builder pattern: set the rotation of one reference space
    pub fn with_reference_rotation(mut self, space: HandReferenceSpace, rotation: Quat) -> Self {
        self.reference_rotations[space.index()] = rotation;
        self
    }

    /// Update the tracked pose
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

impl Hand for TrackedHand {
    fn id(&self) -> HandId {
        self.id
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn reference_rotation(&self, space: HandReferenceSpace) -> Quat {
        self.reference_rotations[space.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_reference_rotation_per_space() {
        let grip = Quat::from_axis_angle(&Vec3::x_axis(), 0.5);
        let hand = TrackedHand::new(HandId::RIGHT, Pose::identity())
            .with_reference_rotation(HandReferenceSpace::HandGrip, grip);

        assert_eq!(hand.reference_rotation(HandReferenceSpace::HandGrip), grip);
        assert_eq!(hand.reference_rotation(HandReferenceSpace::Controller), Quat::identity());
        assert_eq!(hand.reference_rotation(HandReferenceSpace::HandPointer), Quat::identity());
    }

    #[test]
    fn test_default_reference_space() {
        assert_eq!(HandReferenceSpace::default(), HandReferenceSpace::HandGrip);
        assert_eq!(HandReferenceSpace::ALL.len(), 3);
    }
}
