//! Interactable item: the kinematic attachment controller
//!
//! One controller drives one rigid body toward the hand holding it. Each
//! physics tick it computes the pose delta to its anchor, turns that into
//! rate-limited velocity commands and, when the sweep guard allows it, snaps
//! the body onto the target directly.
//!
//! # Tick order
//!
//! ```text
//! host collision callbacks ──► on_collision_begin / on_collision_persist
//! host fixed step          ──► tick(body, hand, dt)
//!                                 target delta ─► velocity targets ─► rate-limited write
//!                                 (frozen)    ─► forced rotation
//!                                 sweep guard ─► snap | leave to velocities
//!                                 collision flag reset
//! host integration         ──► world step
//! ```
//!
//! # Example
//!
//! ```
//! use grab_engine::prelude::*;
//!
//! let world = PhysicsWorld::new();
//! let mut body = SimulatedBody::new(Vec3::new(0.0, 1.0, 0.0), 0.05);
//! let mut hand = TrackedHand::new(HandId::RIGHT, Pose::from_position(Vec3::new(0.0, 1.0, 0.1)));
//! let mut item = InteractableItem::new(AttachmentConfig::default());
//!
//! item.prepare_body(&mut world.view(&mut body));
//! item.begin_interaction(&mut world.view(&mut body), &hand)?;
//!
//! hand.set_pose(Pose::from_position(Vec3::new(0.1, 1.0, 0.1)));
//! let outcome = item.tick(&mut world.view(&mut body), &hand, 1.0 / 90.0)?;
//! assert_eq!(outcome, TickOutcome::Driven(SweepOutcome::Snapped));
//!
//! item.end_interaction(&mut world.view(&mut body))?;
//! # Ok::<(), InteractionError>(())
//! ```

use log::{debug, trace, warn};
use thiserror::Error;

use crate::config::AttachmentConfig;
use crate::foundation::math::{Vec3, Pose};
use crate::physics::{RigidBody, CollisionListener};
use super::frame::{PickupFrame, PickupFrameIds};
use super::hand::{Hand, HandId};
use super::sweep_guard::{SweepGuard, SweepOutcome};
use super::target::Anchor;
use super::velocity::VelocityTargets;

/// Result of one controller tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No hand holds the item; nothing was driven
    Detached,
    /// The tick length was zero, negative or non-finite; nothing was driven
    InvalidTimestep,
    /// Velocities were driven; the sweep guard reported this outcome
    Driven(SweepOutcome),
}

/// State that exists only while a hand holds the item
#[derive(Debug)]
struct ActiveAttachment {
    hand: HandId,
    anchor: Anchor,
    gravity_before_attach: bool,
}

/// Kinematic attachment controller for one rigid body
#[derive(Debug)]
pub struct InteractableItem {
    config: AttachmentConfig,
    interaction_point: Option<Pose>,
    attachment: Option<ActiveAttachment>,
    guard: SweepGuard,
    swept_this_frame: bool,
    targets: VelocityTargets,
    frame_ids: PickupFrameIds,
}

impl InteractableItem {
    /// Create a detached controller
    pub fn new(config: AttachmentConfig) -> Self {
        Self {
            config,
            interaction_point: None,
            attachment: None,
            guard: SweepGuard::default(),
            swept_this_frame: false,
            targets: VelocityTargets::default(),
            frame_ids: PickupFrameIds::default(),
        }
    }

    /// Builder pattern: align this point (relative to the item) with the hand
    pub fn with_interaction_point(mut self, local: Pose) -> Self {
        self.interaction_point = Some(local);
        self
    }

    /// Replace or clear the interaction point; only allowed while detached
    pub fn set_interaction_point(&mut self, local: Option<Pose>) -> Result<(), InteractionError> {
        if self.attachment.is_some() {
            return Err(InteractionError::AttachedItemLocked);
        }
        self.interaction_point = local;
        Ok(())
    }

    /// Interaction point relative to the item, if any
    pub fn interaction_point(&self) -> Option<Pose> {
        self.interaction_point
    }

    /// Configuration this controller was created with
    pub fn config(&self) -> &AttachmentConfig {
        &self.config
    }

    /// Apply per-item body settings; call once when the item is created
    pub fn prepare_body(&self, body: &mut impl RigidBody) {
        body.set_max_angular_velocity(self.config.max_angular_velocity);
    }

    /// Whether a hand currently holds the item
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The hand holding the item
    pub fn attached_hand(&self) -> Option<HandId> {
        self.attachment.as_ref().map(|active| active.hand)
    }

    /// The live pickup frame, if this attachment uses one
    pub fn pickup_frame(&self) -> Option<&PickupFrame> {
        self.attachment.as_ref().and_then(|active| active.anchor.pickup_frame())
    }

    /// Whether the last tick committed the target pose directly
    pub fn swept_this_frame(&self) -> bool {
        self.swept_this_frame
    }

    /// Last computed linear velocity target
    pub fn velocity_target(&self) -> Vec3 {
        self.targets.linear
    }

    /// Last computed angular velocity target
    pub fn angular_target(&self) -> Vec3 {
        self.targets.angular
    }

    /// Start holding the item with `hand`
    ///
    /// Freezes rotation if configured, creates the pickup frame when there is
    /// no interaction point and suspends gravity for the duration of the hold.
    pub fn begin_interaction(&mut self, body: &mut impl RigidBody, hand: &impl Hand) -> Result<(), InteractionError> {
        if let Some(active) = &self.attachment {
            warn!("Hand {} tried to grab an item already held by hand {}", hand.id(), active.hand);
            return Err(InteractionError::AlreadyAttached { hand: active.hand });
        }

        if self.config.freeze_rotation_on_attach {
            body.set_freeze_rotation(true);
        }

        let anchor = match self.interaction_point {
            Some(local) => Anchor::InteractionPoint(local),
            None => Anchor::PickupFrame(PickupFrame::new(self.frame_ids.allocate(), &hand.pose(), &body.pose())),
        };

        let gravity_before_attach = body.use_gravity();
        body.set_use_gravity(false);

        self.swept_this_frame = false;
        self.targets = VelocityTargets::default();

        match anchor.pickup_frame() {
            Some(frame) => debug!("Hand {} attached, tracking {}", hand.id(), frame.id()),
            None => debug!("Hand {} attached, tracking interaction point", hand.id()),
        }

        self.attachment = Some(ActiveAttachment {
            hand: hand.id(),
            anchor,
            gravity_before_attach,
        });
        Ok(())
    }

    /// Release the item
    ///
    /// If the last tick snapped the body, the body leaves the hand with that
    /// tick's velocity targets instead of the zero velocity the snap left.
    pub fn end_interaction(&mut self, body: &mut impl RigidBody) -> Result<(), InteractionError> {
        let Some(active) = self.attachment.take() else {
            warn!("Release requested for an item no hand is holding");
            return Err(InteractionError::NotAttached);
        };

        if self.config.unfreeze_rotation_on_detach {
            body.set_freeze_rotation(false);
        }

        if self.swept_this_frame {
            body.set_velocity(self.targets.linear);
            body.set_angular_velocity(self.targets.angular);
        }

        body.set_use_gravity(active.gravity_before_attach);

        match active.anchor.pickup_frame() {
            Some(frame) => debug!("Hand {} released item, dropping {}", active.hand, frame.id()),
            None => debug!("Hand {} released item", active.hand),
        }

        self.swept_this_frame = false;
        self.targets = VelocityTargets::default();
        Ok(())
    }

    /// Run one fixed physics tick
    ///
    /// Must be called after this frame's collision notifications. The
    /// collision flag is cleared on every accepted call, held or not. A call
    /// with a hand other than the holding one is rejected before any state
    /// changes.
    pub fn tick(&mut self, body: &mut impl RigidBody, hand: &impl Hand, dt: f32) -> Result<TickOutcome, InteractionError> {
        if let Some(active) = &self.attachment {
            if hand.id() != active.hand {
                return Err(InteractionError::HandMismatch {
                    expected: active.hand,
                    actual: hand.id(),
                });
            }
        }

        self.swept_this_frame = false;
        let outcome = self.drive(body, hand, dt);
        self.guard.end_tick();
        Ok(outcome)
    }

    fn drive(&mut self, body: &mut impl RigidBody, hand: &impl Hand, dt: f32) -> TickOutcome {
        let Some(active) = &self.attachment else {
            return TickOutcome::Detached;
        };

        let current = body.pose();
        let delta = active.anchor.delta(&current, hand, self.config.reference_space);
        let Some(targets) = VelocityTargets::from_delta(&delta, dt) else {
            warn!("Skipping attachment tick with invalid dt {dt}");
            return TickOutcome::InvalidTimestep;
        };
        let target = delta.apply_to(&current);

        self.targets = targets;
        targets.apply_rate_limited(
            body,
            self.config.max_velocity_change,
            self.config.max_angular_velocity_change,
        );

        if self.config.force_rotation_if_frozen && body.freeze_rotation() {
            body.move_rotation(target.rotation);
        }

        let sweep = self.guard.evaluate(body, &target, self.config.use_sweep_movement);
        self.swept_this_frame = sweep == SweepOutcome::Snapped;
        trace!(
            "Hand {} tick: delta {:?}, velocity target {:?}, sweep {:?}",
            active.hand,
            delta.position,
            targets.linear,
            sweep
        );

        TickOutcome::Driven(sweep)
    }
}

impl CollisionListener for InteractableItem {
    fn on_collision_begin(&mut self) {
        self.guard.register_collision();
    }

    fn on_collision_persist(&mut self) {
        self.guard.register_collision();
    }
}

/// Attachment contract violations, rejected without touching the body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// `begin_interaction` while already held
    #[error("Item is already held by hand {hand}")]
    AlreadyAttached {
        /// The hand currently holding the item
        hand: HandId,
    },

    /// `end_interaction` while not held
    #[error("Item is not held by any hand")]
    NotAttached,

    /// `tick` called with a hand other than the holding one; the controller is left untouched
    #[error("Item is held by hand {expected}, not hand {actual}")]
    HandMismatch {
        /// The hand holding the item
        expected: HandId,
        /// The hand passed to the call
        actual: HandId,
    },

    /// Interaction point changes while held
    #[error("Interaction point cannot change while the item is held")]
    AttachedItemLocked,
}
