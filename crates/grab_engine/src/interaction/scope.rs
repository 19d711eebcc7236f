//! Scoped hold: releases the item on every exit path

use log::warn;

use crate::physics::{RigidBody, CollisionListener};
use super::hand::Hand;
use super::item::{InteractableItem, InteractionError, TickOutcome};

/// A hold that ends when dropped
///
/// Borrows the controller and the body for the whole hold, so nothing else
/// can write the body in between. Early returns, `?` and unwinding all end
/// the interaction and drop the pickup frame.
pub struct AttachmentScope<'a, B: RigidBody> {
    item: &'a mut InteractableItem,
    body: &'a mut B,
}

impl InteractableItem {
    /// Begin a hold that ends when the returned scope is dropped
    pub fn hold<'a, B: RigidBody>(
        &'a mut self,
        body: &'a mut B,
        hand: &impl Hand,
    ) -> Result<AttachmentScope<'a, B>, InteractionError> {
        self.begin_interaction(body, hand)?;
        Ok(AttachmentScope { item: self, body })
    }
}

impl<B: RigidBody> AttachmentScope<'_, B> {
    /// Run one fixed tick of the held item
    pub fn tick(&mut self, hand: &impl Hand, dt: f32) -> Result<TickOutcome, InteractionError> {
        self.item.tick(&mut *self.body, hand, dt)
    }

    /// The controller
    pub fn item(&self) -> &InteractableItem {
        self.item
    }

    /// The held body
    pub fn body(&self) -> &B {
        self.body
    }

    /// Mutable access to the held body, for the host's own integration
    pub fn body_mut(&mut self) -> &mut B {
        self.body
    }

    /// End the hold now and report the result
    pub fn release(mut self) -> Result<(), InteractionError> {
        self.item.end_interaction(&mut *self.body)
    }
}

impl<B: RigidBody> CollisionListener for AttachmentScope<'_, B> {
    fn on_collision_begin(&mut self) {
        self.item.on_collision_begin();
    }

    fn on_collision_persist(&mut self) {
        self.item.on_collision_persist();
    }
}

impl<B: RigidBody> Drop for AttachmentScope<'_, B> {
    fn drop(&mut self) {
        if self.item.is_attached() {
            if let Err(err) = self.item.end_interaction(&mut *self.body) {
                warn!("Failed to release held item: {err}");
            }
        }
    }
}
