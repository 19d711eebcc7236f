//! Sweep-based collision guard
//!
//! Velocity tracking alone can tunnel through thin geometry and lags behind
//! the hand. When nothing touched the item this tick, the guard sweeps the
//! item toward its target pose and, if the way is clear, commits the target
//! directly with zeroed velocities so the host does not integrate the same
//! motion a second time.

use crate::foundation::math::{Vec3, Pose, utils::direction_and_distance};
use crate::physics::{RigidBody, SweepHit};

/// What the guard did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepOutcome {
    /// The target pose was committed directly
    Snapped,
    /// The sweep found an obstruction; velocities alone move the item
    Blocked(SweepHit),
    /// A collision was registered this tick; no sweep was issued
    Suppressed,
    /// Sweep movement is turned off
    Disabled,
}

/// Per-tick collision flag and the snap decision that consumes it
#[derive(Debug, Default)]
pub struct SweepGuard {
    collided_this_frame: bool,
}

impl SweepGuard {
    /// Record a collision notification for the current tick
    pub fn register_collision(&mut self) {
        self.collided_this_frame = true;
    }

    /// Whether a collision was registered this tick
    pub fn collided_this_frame(&self) -> bool {
        self.collided_this_frame
    }

    /// Close the tick; collision state never carries into the next one
    pub fn end_tick(&mut self) {
        self.collided_this_frame = false;
    }

    /// Decide between snapping to `target` and leaving the body to its velocities
    ///
    /// The sweep is issued from the body's current position with its rotation
    /// temporarily set to the target rotation; the prior rotation is restored
    /// before anything is committed. A degenerate displacement has no sweep
    /// direction, so no query is issued and the move counts as unobstructed.
    pub fn evaluate(&self, body: &mut impl RigidBody, target: &Pose, enabled: bool) -> SweepOutcome {
        if !enabled {
            return SweepOutcome::Disabled;
        }
        if self.collided_this_frame {
            return SweepOutcome::Suppressed;
        }

        let hit = direction_and_distance(target.position - body.position()).and_then(|(direction, distance)| {
            let prior_rotation = body.rotation();
            body.set_rotation(target.rotation);
            let hit = body.sweep_test(direction, distance);
            body.set_rotation(prior_rotation);
            hit
        });

        if let Some(hit) = hit {
            return SweepOutcome::Blocked(hit);
        }

        body.set_velocity(Vec3::zeros());
        body.set_angular_velocity(Vec3::zeros());
        body.move_rotation(target.rotation);
        body.move_position(target.position);
        SweepOutcome::Snapped
    }
}
