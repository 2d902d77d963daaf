//! Puck physics
//!
//! Fixed-step integration: velocity is expressed in units per tick, so the
//! position update does not scale with `dt`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rink::{RinkGeometry, Side};
use crate::consts::*;
use crate::snap_to_rest;

/// Friction and bounce tuning for the puck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuckPhysics {
    /// Velocity multiplier applied every tick
    pub friction: f32,
    /// Fraction of the normal velocity kept after a wall bounce
    pub bounce_damping: f32,
    /// Velocity components below this snap to zero
    pub rest_epsilon: f32,
}

impl Default for PuckPhysics {
    fn default() -> Self {
        Self {
            friction: PUCK_FRICTION,
            bounce_damping: PUCK_BOUNCE_DAMPING,
            rest_epsilon: PUCK_REST_EPSILON,
        }
    }
}

/// The puck
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Puck {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Puck {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Back to center ice, at rest
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO
    }
}

/// Integrate one tick: move, then bleed speed to friction
pub fn advance(puck: &mut Puck, physics: &PuckPhysics) {
    puck.position += puck.velocity;
    puck.velocity = snap_to_rest(puck.velocity * physics.friction, physics.rest_epsilon);
}

/// Bounce the puck off the boards
///
/// The short walls are open across the goal mouth, so the puck may pass
/// through there. Returns true if any wall was hit.
///
/// Under [`GoalLine::WallPlane`](super::rink::GoalLine) a puck can sit in the
/// mouth past the wall limit without scoring. If it then slides out of the
/// mouth sideways it is treated as hitting the end wall: x snaps back to the
/// limit (at most `puck_radius + wall_buffer`) and reflects. With the default
/// `Boundary` goal line that puck would already have scored.
pub fn resolve_wall_collision(puck: &mut Puck, rink: &RinkGeometry, physics: &PuckPhysics) -> bool {
    let mut hit = false;

    let limit_x = rink.puck_limit_x();
    if puck.position.x.abs() > limit_x && !rink.in_goal_mouth(puck.position.y) {
        puck.position.x = puck.position.x.clamp(-limit_x, limit_x);
        puck.velocity.x = -puck.velocity.x * physics.bounce_damping;
        hit = true;
    }

    let limit_y = rink.puck_limit_y();
    if puck.position.y.abs() > limit_y {
        puck.position.y = puck.position.y.clamp(-limit_y, limit_y);
        puck.velocity.y = -puck.velocity.y * physics.bounce_damping;
        hit = true;
    }

    hit
}

/// Which goal, if any, the puck is in
///
/// The left goal is checked first. Does not mutate the puck.
pub fn goal_for(puck: &Puck, rink: &RinkGeometry) -> Option<Side> {
    if !rink.in_goal_mouth(puck.position.y) {
        return None;
    }
    let line = rink.goal_line_x();
    if puck.position.x < -line {
        // Left goal is Home's; Away scores
        Some(Side::Away)
    } else if puck.position.x > line {
        Some(Side::Home)
    } else {
        None
    }
}

/// Detect a goal and, if scored, return the puck to center
///
/// Must run before [`resolve_wall_collision`] for the tick so the boundary
/// clamp cannot pull a scoring puck back onto the ice.
pub fn resolve_goal(puck: &mut Puck, rink: &RinkGeometry) -> Option<Side> {
    let scorer = goal_for(puck, rink)?;
    puck.reset();
    Some(scorer)
}
