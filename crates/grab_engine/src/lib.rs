//! # Grab Engine
//!
//! Kinematic attachment of dynamic rigid bodies to tracked hands.
//!
//! A held item follows its hand every physics tick through rate-limited
//! velocity commands, and is moved directly onto the hand's target pose
//! whenever a swept collision test finds the way clear. Attach and detach
//! transitions handle rotation freezing, gravity and residual velocity.
//!
//! ## Modules
//!
//! - **interaction**: The attachment controller ([`interaction::InteractableItem`])
//! - **physics**: The rigid body interface and a small reference host
//! - **config**: Serializable tuning (TOML / RON)
//! - **foundation**: Math, fixed timestep and logging helpers

pub mod foundation;
pub mod config;
pub mod physics;
pub mod interaction;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{AttachmentConfig, Config, ConfigError},
        foundation::{
            math::{Vec3, Quat, Pose},
            time::FixedTimestep,
        },
        interaction::{
            Hand, HandId, HandReferenceSpace, TrackedHand,
            InteractableItem, InteractionError, TickOutcome, SweepOutcome,
            AttachmentScope,
        },
        physics::{
            RigidBody, CollisionListener, SweepHit,
            PhysicsWorld, SimulatedBody, Obstacle, ObstacleShape, CollisionLayers, CollisionEvents,
        },
    };
}
