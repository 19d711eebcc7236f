//! Reference physics host
//!
//! A deliberately small world: sphere-shaped dynamic bodies moving among
//! static obstacles. It integrates velocities, stops bodies at the first
//! obstruction, answers sphere sweeps and reports contact enter/stay/exit
//! events by diffing each body's contact set against the previous step.
//! Contact response stops at removing the inward velocity component.

use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Vec3, Quat, utils::direction_and_distance, constants::LENGTH_EPSILON};
use super::body::{RigidBody, SweepHit, CollisionListener};
use super::collision::{BoundingSphere, ObstacleShape, Ray};
use super::collision_layers::CollisionLayers;

/// Contacts closer than this count as touching
const CONTACT_SKIN: f32 = 1e-3;

new_key_type! {
    /// Handle to a static obstacle in a [`PhysicsWorld`]
    pub struct ObstacleKey;
}

/// Static collider
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// World-space geometry
    pub shape: ObstacleShape,
    /// What this obstacle is
    pub layer: CollisionLayers,
    /// What this obstacle collides with
    pub mask: CollisionLayers,
    /// Triggers report contacts but never block sweeps or movement
    pub is_trigger: bool,
}

impl Obstacle {
    /// Solid environment obstacle colliding with everything
    pub fn solid(shape: ObstacleShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::ENVIRONMENT,
            mask: CollisionLayers::all(),
            is_trigger: false,
        }
    }

    /// Trigger volume
    pub fn trigger(shape: ObstacleShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::TRIGGER,
            mask: CollisionLayers::all(),
            is_trigger: true,
        }
    }

    /// Builder pattern: set layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }
}

/// Sphere-shaped dynamic body simulated by [`PhysicsWorld`]
#[derive(Debug, Clone)]
pub struct SimulatedBody {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    angular_velocity: Vec3,
    max_angular_velocity: f32,
    freeze_rotation: bool,
    use_gravity: bool,
    radius: f32,
    layer: CollisionLayers,
    mask: CollisionLayers,
    contacts: HashSet<ObstacleKey>,
}

impl SimulatedBody {
    /// Create a body at rest
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            max_angular_velocity: 7.0,
            freeze_rotation: false,
            use_gravity: true,
            radius,
            layer: CollisionLayers::INTERACTABLE,
            mask: CollisionLayers::HELD_ITEM_MASK,
            contacts: HashSet::new(),
        }
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Collision radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Obstacles touched at the end of the last step
    pub fn contacts(&self) -> &HashSet<ObstacleKey> {
        &self.contacts
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }

    fn clamp_angular_velocity(&mut self) {
        let speed = self.angular_velocity.magnitude();
        if speed > self.max_angular_velocity && speed > LENGTH_EPSILON {
            self.angular_velocity *= self.max_angular_velocity / speed;
        }
    }
}

/// Contact changes produced by one [`PhysicsWorld::step`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionEvents {
    /// Contacts that started this step
    pub entered: Vec<ObstacleKey>,
    /// Contacts that were already present last step
    pub persisting: Vec<ObstacleKey>,
    /// Contacts that ended this step
    pub exited: Vec<ObstacleKey>,
}

impl CollisionEvents {
    /// True when no contact started or persisted
    pub fn is_quiet(&self) -> bool {
        self.entered.is_empty() && self.persisting.is_empty()
    }

    /// Deliver enter/stay notifications to a listener
    pub fn dispatch(&self, listener: &mut impl CollisionListener) {
        for _ in &self.entered {
            listener.on_collision_begin();
        }
        for _ in &self.persisting {
            listener.on_collision_persist();
        }
    }
}

/// Static collision world with gravity
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    obstacles: SlotMap<ObstacleKey, Obstacle>,
    gravity: Vec3,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world with standard gravity
    pub fn new() -> Self {
        Self {
            obstacles: SlotMap::with_key(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }

    /// Builder pattern: set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Add a static obstacle
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleKey {
        self.obstacles.insert(obstacle)
    }

    /// Remove a static obstacle
    pub fn remove_obstacle(&mut self, key: ObstacleKey) -> Option<Obstacle> {
        self.obstacles.remove(key)
    }

    /// Look up an obstacle
    pub fn obstacle(&self, key: ObstacleKey) -> Option<&Obstacle> {
        self.obstacles.get(key)
    }

    /// Number of obstacles
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    fn collides(obstacle: &Obstacle, layer: CollisionLayers, mask: CollisionLayers) -> bool {
        CollisionLayers::should_collide(layer, mask, obstacle.layer, obstacle.mask)
    }

    /// Sweep a sphere and return the nearest blocking obstacle within `max_distance`
    ///
    /// Triggers never block.
    pub fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layer: CollisionLayers,
        mask: CollisionLayers,
    ) -> Option<(ObstacleKey, SweepHit)> {
        let ray = Ray::new(origin, direction);

        self.obstacles
            .iter()
            .filter(|(_, obstacle)| !obstacle.is_trigger && Self::collides(obstacle, layer, mask))
            .filter_map(|(key, obstacle)| {
                obstacle.shape.sweep_sphere(&ray, radius).map(|hit| (key, hit))
            })
            .filter(|(_, hit)| hit.distance <= max_distance)
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
            .map(|(key, hit)| {
                (key, SweepHit { distance: hit.distance, point: hit.point, normal: hit.normal })
            })
    }

    /// Obstacles overlapping a sphere
    ///
    /// Triggers are reported too when the layer filter lets them through.
    pub fn overlap_sphere(
        &self,
        sphere: &BoundingSphere,
        layer: CollisionLayers,
        mask: CollisionLayers,
    ) -> HashSet<ObstacleKey> {
        let probe = sphere.inflated(CONTACT_SKIN);
        self.obstacles
            .iter()
            .filter(|(_, obstacle)| Self::collides(obstacle, layer, mask))
            .filter(|(_, obstacle)| obstacle.shape.overlaps_sphere(&probe))
            .map(|(key, _)| key)
            .collect()
    }

    /// Advance a body by `dt` seconds and report contact changes
    ///
    /// Semi-implicit Euler: gravity feeds velocity first, then velocity moves
    /// the body. Linear motion stops at the first blocking obstacle and the
    /// velocity component into its surface is removed.
    /// Contacts are tracked against solid obstacles only.
    pub fn step(&self, body: &mut SimulatedBody, dt: f32) -> CollisionEvents {
        if !dt.is_finite() || dt <= 0.0 {
            return CollisionEvents::default();
        }

        if body.use_gravity {
            body.velocity += self.gravity * dt;
        }

        if let Some((direction, distance)) = direction_and_distance(body.velocity * dt) {
            match self.sweep_sphere(body.position, body.radius, direction, distance, body.layer, body.mask) {
                Some((_, hit)) => {
                    body.position += direction * hit.distance;
                    let inward = body.velocity.dot(&hit.normal);
                    if inward < 0.0 {
                        body.velocity -= hit.normal * inward;
                    }
                }
                None => body.position += direction * distance,
            }
        }

        body.clamp_angular_velocity();
        if !body.freeze_rotation {
            let rotation_step = Quat::from_scaled_axis(body.angular_velocity * dt);
            body.rotation = rotation_step * body.rotation;
        }

        // Triggers overlap but never make contact
        let current = self
            .overlap_sphere(&body.bounding_sphere(), body.layer, body.mask)
            .into_iter()
            .filter(|key| self.obstacles.get(*key).is_some_and(|obstacle| !obstacle.is_trigger))
            .collect();
        let previous = std::mem::replace(&mut body.contacts, current);
        CollisionEvents {
            entered: body.contacts.difference(&previous).copied().collect(),
            persisting: body.contacts.intersection(&previous).copied().collect(),
            exited: previous.difference(&body.contacts).copied().collect(),
        }
    }

    /// Bind a body to this world so sweeps run against its obstacles
    pub fn view<'a>(&'a self, body: &'a mut SimulatedBody) -> BodyView<'a> {
        BodyView { world: self, body }
    }
}

/// A [`SimulatedBody`] paired with the world it lives in
pub struct BodyView<'a> {
    world: &'a PhysicsWorld,
    body: &'a mut SimulatedBody,
}

impl RigidBody for BodyView<'_> {
    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    fn rotation(&self) -> Quat {
        self.body.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.body.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.body.velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.body.angular_velocity
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.body.angular_velocity = angular_velocity;
        self.body.clamp_angular_velocity();
    }

    fn max_angular_velocity(&self) -> f32 {
        self.body.max_angular_velocity
    }

    fn set_max_angular_velocity(&mut self, max_angular_velocity: f32) {
        self.body.max_angular_velocity = max_angular_velocity.max(0.0);
    }

    fn freeze_rotation(&self) -> bool {
        self.body.freeze_rotation
    }

    fn set_freeze_rotation(&mut self, frozen: bool) {
        self.body.freeze_rotation = frozen;
    }

    fn use_gravity(&self) -> bool {
        self.body.use_gravity
    }

    fn set_use_gravity(&mut self, enabled: bool) {
        self.body.use_gravity = enabled;
    }

    fn sweep_test(&self, direction: Vec3, max_distance: f32) -> Option<SweepHit> {
        self.world
            .sweep_sphere(
                self.body.position,
                self.body.radius,
                direction,
                max_distance,
                self.body.layer,
                self.body.mask,
            )
            .map(|(_, hit)| hit)
    }
}
