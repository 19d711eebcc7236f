//! Physics module: the rigid body interface and a reference host
//!
//! The attachment controller talks to bodies only through [`RigidBody`] and
//! receives contact notifications through [`CollisionListener`]. The
//! [`world`] module provides a small headless host implementing both sides,
//! used by the demo and the scenario tests.

pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod world;

pub use body::{RigidBody, SweepHit, CollisionListener};
pub use collision::{
    ObstacleShape,
    BoundingSphere,
    Aabb,
    Ray,
    RayHit,
};
pub use collision_layers::CollisionLayers;
pub use world::{PhysicsWorld, SimulatedBody, BodyView, Obstacle, ObstacleKey, CollisionEvents};
