//! Target computation: the rigid delta that would bring the item onto its
//! anchor this tick
//!
//! Two anchoring modes exist. With an interaction point, that point on the
//! item is matched against the hand (rotated into the configured reference
//! space). Without one, the item follows the pickup frame created at grab
//! time, keeping whatever offset it was grabbed with.

use crate::foundation::math::{Vec3, Quat, Pose};
use super::frame::PickupFrame;
use super::hand::{Hand, HandReferenceSpace};

/// Rigid transform to apply to the item this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDelta {
    /// World-space translation
    pub position: Vec3,
    /// World-space rotation, applied on the left of the current rotation
    pub rotation: Quat,
}

impl PoseDelta {
    /// The pose reached by applying this delta to `pose`
    pub fn apply_to(&self, pose: &Pose) -> Pose {
        Pose {
            position: pose.position + self.position,
            rotation: self.rotation * pose.rotation,
        }
    }
}

/// Delta aligning an interaction point with the hand
///
/// `point` is the interaction point's world pose.
pub fn interaction_point_delta(hand_pose: &Pose, reference_rotation: &Quat, point: &Pose) -> PoseDelta {
    PoseDelta {
        position: hand_pose.position - point.position,
        rotation: hand_pose.rotation * reference_rotation * point.rotation.inverse(),
    }
}

/// Delta moving the item origin onto the pickup frame
pub fn pickup_frame_delta(frame: &Pose, body: &Pose) -> PoseDelta {
    PoseDelta {
        position: frame.position - body.position,
        rotation: frame.rotation * body.rotation.inverse(),
    }
}

/// What the held item is tracking; fixed for the whole attachment
#[derive(Debug, PartialEq)]
pub enum Anchor {
    /// An interaction point, given relative to the item
    InteractionPoint(Pose),
    /// A pickup frame parented to the hand
    PickupFrame(PickupFrame),
}

impl Anchor {
    /// Compute this tick's delta for an item at `body` held by `hand`
    pub fn delta(&self, body: &Pose, hand: &impl Hand, reference_space: HandReferenceSpace) -> PoseDelta {
        let hand_pose = hand.pose();
        match self {
            Self::InteractionPoint(local) => {
                let point = body.combine(local);
                interaction_point_delta(&hand_pose, &hand.reference_rotation(reference_space), &point)
            }
            Self::PickupFrame(frame) => pickup_frame_delta(&frame.world_pose(&hand_pose), body),
        }
    }

    /// The pickup frame, when anchoring to one
    pub fn pickup_frame(&self) -> Option<&PickupFrame> {
        match self {
            Self::PickupFrame(frame) => Some(frame),
            Self::InteractionPoint(_) => None,
        }
    }
}
