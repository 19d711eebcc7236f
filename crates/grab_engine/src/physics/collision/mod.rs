//! Collision geometry used by the reference physics host
//!
//! - [`primitives`] - Rays, spheres and boxes with ray casts
//! - [`shape`] - Obstacle shapes and sphere sweeps

pub mod primitives;
pub mod shape;

pub use primitives::{Ray, RayHit, BoundingSphere, Aabb};
pub use shape::ObstacleShape;
