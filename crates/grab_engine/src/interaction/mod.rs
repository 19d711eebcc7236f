//! Hand-held object interaction
//!
//! The attachment controller and its parts:
//!
//! - [`item`] - Lifecycle and per-tick driving of a held body
//! - [`target`] - Pose delta between the body and its anchor
//! - [`velocity`] - Rate-limited velocity commands
//! - [`sweep_guard`] - Collision-guarded direct moves
//! - [`frame`] - Hand-parented pickup frames
//! - [`hand`] - The hand interface
//! - [`scope`] - Scoped holds

pub mod hand;
pub mod frame;
pub mod target;
pub mod velocity;
pub mod sweep_guard;
pub mod item;
pub mod scope;

#[cfg(test)]
mod tests;

pub use hand::{Hand, HandId, HandReferenceSpace, TrackedHand};
pub use frame::{PickupFrame, PickupFrameId};
pub use target::{Anchor, PoseDelta};
pub use velocity::VelocityTargets;
pub use sweep_guard::{SweepGuard, SweepOutcome};
pub use item::{InteractableItem, InteractionError, TickOutcome};
pub use scope::AttachmentScope;
