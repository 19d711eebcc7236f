//! Collision layer system for filtering contacts and sweeps
//!
//! A held item usually must not collide with the hand that holds it, and
//! trigger volumes should never block a sweep. Each collider carries a layer
//! (what it is) and a mask (what it collides with).

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Static environment geometry
        const ENVIRONMENT = 1 << 0;
        /// Items that can be picked up
        const INTERACTABLE = 1 << 1;
        /// Hand and controller colliders
        const HAND = 1 << 2;
        /// Small loose physics objects
        const DEBRIS = 1 << 3;
        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 4;
    }
}

impl CollisionLayers {
    /// Default mask for a held item: everything solid except hands
    pub const HELD_ITEM_MASK: Self = Self::ENVIRONMENT
        .union(Self::INTERACTABLE)
        .union(Self::DEBRIS);

    /// Check if two colliders should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use grab_engine::physics::CollisionLayers;
    ///
    /// let item_layer = CollisionLayers::INTERACTABLE;
    /// let item_mask = CollisionLayers::HELD_ITEM_MASK;
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     item_layer, item_mask,
    ///     CollisionLayers::ENVIRONMENT, CollisionLayers::all(),
    /// ));
    /// assert!(!CollisionLayers::should_collide(
    ///     item_layer, item_mask,
    ///     CollisionLayers::HAND, CollisionLayers::all(),
    /// ));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        mask_b.intersects(layer_a) && mask_a.intersects(layer_b)
    }
}
