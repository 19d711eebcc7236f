//! Full frames against the reference world: collision callbacks, controller
//! tick, world step

use approx::assert_relative_eq;

use crate::config::AttachmentConfig;
use crate::foundation::math::{Vec3, Pose};
use crate::interaction::{InteractableItem, SweepOutcome, TickOutcome};
use crate::physics::{CollisionEvents, Obstacle, ObstacleShape, PhysicsWorld, RigidBody, SimulatedBody};
use super::support::{hand_at, TICK};

const RADIUS: f32 = 0.05;

/// Wall whose near face sits at x = 0.5
fn walled_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.add_obstacle(Obstacle::solid(ObstacleShape::cuboid(
        Vec3::new(0.6, 1.0, 0.0),
        Vec3::new(0.1, 1.0, 1.0),
    )));
    world
}

#[test]
fn test_item_dragged_into_wall_stops_at_surface() {
    let world = walled_world();
    let mut body = SimulatedBody::new(Vec3::new(0.0, 1.0, 0.0), RADIUS);
    let mut hand = hand_at(Vec3::new(0.0, 1.0, 0.1));
    let mut item = InteractableItem::new(AttachmentConfig::default());

    item.prepare_body(&mut world.view(&mut body));
    item.begin_interaction(&mut world.view(&mut body), &hand).unwrap();

    let mut events = CollisionEvents::default();
    let mut outcomes = Vec::new();
    for step in 1..=20 {
        events.dispatch(&mut item);
        hand.set_pose(Pose::from_position(Vec3::new(0.05 * step as f32, 1.0, 0.1)));
        outcomes.push(item.tick(&mut world.view(&mut body), &hand, TICK).unwrap());
        events = world.step(&mut body, TICK);

        let x = world.view(&mut body).position().x;
        assert!(x + RADIUS <= 0.5 + 1e-3, "step {step}: penetrated to {x}");
    }

    assert_eq!(outcomes[0], TickOutcome::Driven(SweepOutcome::Snapped));
    assert!(outcomes.contains(&TickOutcome::Driven(SweepOutcome::Suppressed)));
    assert!(!body.contacts().is_empty());
    assert_relative_eq!(world.view(&mut body).position().x, 0.45, epsilon = 2e-3);
}

#[test]
fn test_item_follows_hand_through_open_space() {
    let world = walled_world();
    let mut body = SimulatedBody::new(Vec3::new(0.0, 1.0, -0.5), RADIUS);
    let mut hand = hand_at(Vec3::new(0.0, 1.0, -0.4));
    let mut item = InteractableItem::new(AttachmentConfig::default());
    item.begin_interaction(&mut world.view(&mut body), &hand).unwrap();

    for step in 1..=10 {
        hand.set_pose(Pose::from_position(Vec3::new(0.0, 1.0 + 0.02 * step as f32, -0.4)));
        let outcome = item.tick(&mut world.view(&mut body), &hand, TICK).unwrap();
        assert_eq!(outcome, TickOutcome::Driven(SweepOutcome::Snapped));
        assert!(world.step(&mut body, TICK).is_quiet());
    }

    // Gravity is suspended while held, so the snapped pose does not sag
    assert_relative_eq!(world.view(&mut body).position(), Vec3::new(0.0, 1.2, -0.5), epsilon = 1e-4);
}

#[test]
fn test_released_item_carries_hand_velocity() {
    let world = PhysicsWorld::new();
    let mut body = SimulatedBody::new(Vec3::new(0.0, 1.0, 0.0), RADIUS);
    let mut hand = hand_at(Vec3::new(0.0, 1.0, 0.1));
    let mut item = InteractableItem::new(AttachmentConfig::default());
    item.begin_interaction(&mut world.view(&mut body), &hand).unwrap();

    for step in 1..=3 {
        hand.set_pose(Pose::from_position(Vec3::new(0.02 * step as f32, 1.0, 0.1)));
        item.tick(&mut world.view(&mut body), &hand, TICK).unwrap();
        world.step(&mut body, TICK);
    }
    item.end_interaction(&mut world.view(&mut body)).unwrap();

    let before = world.view(&mut body).position();
    {
        let view = world.view(&mut body);
        assert_relative_eq!(view.velocity(), Vec3::new(1.8, 0.0, 0.0), epsilon = 1e-3);
        assert!(view.use_gravity());
    }

    world.step(&mut body, TICK);
    let after = world.view(&mut body).position();
    assert_relative_eq!(after.x - before.x, 1.8 * TICK, epsilon = 1e-4);
    assert!(after.y < before.y);
}

#[test]
fn test_scope_in_frame_loop() {
    let world = walled_world();
    let mut body = SimulatedBody::new(Vec3::new(0.0, 1.0, 0.0), RADIUS);
    let mut hand = hand_at(Vec3::new(0.0, 1.0, 0.1));
    let mut item = InteractableItem::new(AttachmentConfig::default());

    {
        let mut view = world.view(&mut body);
        let mut scope = item.hold(&mut view, &hand).unwrap();
        hand.set_pose(Pose::from_position(Vec3::new(0.1, 1.0, 0.1)));
        assert_eq!(scope.tick(&hand, TICK), Ok(TickOutcome::Driven(SweepOutcome::Snapped)));
        assert_relative_eq!(scope.body().position().x, 0.1, epsilon = 1e-6);
    }

    assert!(!item.is_attached());
    assert!(world.view(&mut body).use_gravity());
}
