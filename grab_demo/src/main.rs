//! Grab demo application
//!
//! Runs a headless scene: a tracked hand picks up a ball, drags it into a
//! wall, pulls it back and throws it. Frame times are jittered to exercise
//! the fixed timestep. Pass a `.toml` or `.ron` attachment config as the
//! first argument to override the defaults.

use grab_engine::foundation::logging;
use grab_engine::prelude::*;
use rand::Rng;

/// Frames the hand spends on each leg of its path
const LEG_FRAMES: u32 = 60;

struct DemoApp {
    world: PhysicsWorld,
    ball: SimulatedBody,
    hand: TrackedHand,
    item: InteractableItem,
    timestep: FixedTimestep,
    events: CollisionEvents,
    frame: u32,
}

impl DemoApp {
    fn new(config: AttachmentConfig) -> Self {
        log::info!("Creating grab demo scene...");

        let mut world = PhysicsWorld::new();
        world.add_obstacle(Obstacle::solid(ObstacleShape::cuboid(
            Vec3::new(0.0, -0.05, 0.0),
            Vec3::new(5.0, 0.05, 5.0),
        )));
        world.add_obstacle(Obstacle::solid(ObstacleShape::cuboid(
            Vec3::new(0.7, 1.0, 0.0),
            Vec3::new(0.05, 1.0, 1.0),
        )));
        log::info!("World created with {} obstacles", world.obstacle_count());

        let mut ball = SimulatedBody::new(Vec3::new(0.0, 1.0, 0.0), 0.05);
        let item = InteractableItem::new(config);
        item.prepare_body(&mut world.view(&mut ball));

        let hand = TrackedHand::new(HandId::RIGHT, Pose::from_position(Vec3::new(0.0, 1.0, 0.1)));

        Self {
            world,
            ball,
            hand,
            item,
            timestep: FixedTimestep::default(),
            events: CollisionEvents::default(),
            frame: 0,
        }
    }

    /// Scripted hand path: toward the wall, back, then a fast sideways swing
    fn hand_position(&self, rng: &mut impl Rng) -> Vec3 {
        let t = (self.frame % LEG_FRAMES) as f32 / LEG_FRAMES as f32;
        let base = match self.frame / LEG_FRAMES {
            0 => Vec3::new(t, 1.0, 0.1),
            1 => Vec3::new(1.0 - t, 1.0, 0.1),
            _ => Vec3::new(0.0, 1.0, 0.1 - t),
        };
        let tremor = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        base + tremor * 5e-4
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = rand::thread_rng();

        log::info!("Grabbing ball with hand {}", HandId::RIGHT);
        self.item.begin_interaction(&mut self.world.view(&mut self.ball), &self.hand)?;

        while self.frame < LEG_FRAMES * 3 {
            let position = self.hand_position(&mut rng);
            self.hand.set_pose(Pose::from_position(position));

            let frame_time = 1.0 / 72.0 + rng.gen_range(-0.002..0.002);
            for _ in 0..self.timestep.advance(frame_time) {
                self.fixed_update()?;
            }
            self.frame += 1;
        }

        self.item.end_interaction(&mut self.world.view(&mut self.ball))?;
        let throw = self.world.view(&mut self.ball).velocity();
        log::info!("Released ball, throw velocity {:.2} m/s", throw.magnitude());

        // Let the throw play out until the ball settles on the floor
        for _ in 0..180 {
            self.world.step(&mut self.ball, self.timestep.step());
        }
        log::info!("Ball came to rest at {:?}", self.world.view(&mut self.ball).position());
        log::info!("Simulated {} fixed ticks", self.timestep.tick_count());
        Ok(())
    }

    fn fixed_update(&mut self) -> Result<(), InteractionError> {
        self.events.dispatch(&mut self.item);

        let dt = self.timestep.step();
        let outcome = self.item.tick(&mut self.world.view(&mut self.ball), &self.hand, dt)?;
        match outcome {
            TickOutcome::Driven(SweepOutcome::Blocked(hit)) => {
                log::debug!("Tick {}: sweep blocked at {:.3} m", self.timestep.tick_count(), hit.distance);
            }
            TickOutcome::Driven(SweepOutcome::Suppressed) => {
                log::debug!("Tick {}: touching, driving by velocity", self.timestep.tick_count());
            }
            _ => {}
        }

        self.events = self.world.step(&mut self.ball, dt);
        if !self.events.entered.is_empty() {
            log::info!("Ball hit {} obstacle(s)", self.events.entered.len());
        }
        Ok(())
    }
}

fn load_config() -> Result<AttachmentConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading attachment config from {}", path);
            AttachmentConfig::load_from_file(&path)?
        }
        None => AttachmentConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    log::info!("Starting grab demo");
    let config = load_config()?;
    log::debug!("Attachment config: {:?}", config);

    let mut app = DemoApp::new(config);
    app.run()?;

    log::info!("Grab demo finished");
    Ok(())
}
