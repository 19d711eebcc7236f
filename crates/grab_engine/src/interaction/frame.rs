//! Pickup frame: the hand-relative anchor used when an item has no
//! interaction point
//!
//! Created at attachment start at the item's pose, stored relative to the
//! hand so it follows the hand every tick, and dropped at attachment end.
//! Only the attachment controller creates or holds one.

use std::fmt;

use crate::foundation::math::Pose;

/// Unique identity of a pickup frame; never reused within a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupFrameId(u64);

impl fmt::Display for PickupFrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup-frame-{}", self.0)
    }
}

/// Monotonic source of [`PickupFrameId`]s
#[derive(Debug, Default)]
pub(crate) struct PickupFrameIds {
    next: u64,
}

impl PickupFrameIds {
    pub(crate) fn allocate(&mut self) -> PickupFrameId {
        let id = PickupFrameId(self.next);
        self.next += 1;
        id
    }
}

/// Ephemeral hand-parented transform
///
/// Not `Clone`: a frame has exactly one owner.
#[derive(Debug, PartialEq)]
pub struct PickupFrame {
    id: PickupFrameId,
    local: Pose,
}

impl PickupFrame {
    /// Create a frame at `world_pose`, parented to a hand at `hand_pose`
    pub(crate) fn new(id: PickupFrameId, hand_pose: &Pose, world_pose: &Pose) -> Self {
        Self {
            id,
            local: world_pose.relative_to(hand_pose),
        }
    }

    /// Identity of this frame
    pub fn id(&self) -> PickupFrameId {
        self.id
    }

    /// Pose relative to the parent hand
    pub fn local_pose(&self) -> Pose {
        self.local
    }

    /// World pose given the parent hand's current pose
    pub fn world_pose(&self, hand_pose: &Pose) -> Pose {
        hand_pose.combine(&self.local)
    }
}
