//! Paddle movement and puck strikes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::puck::Puck;
use super::rink::{RinkGeometry, Side};
use crate::consts::*;
use crate::step_toward;

/// Directional input for one paddle this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intent {
    /// Toward -y
    pub up: bool,
    /// Toward +y
    pub down: bool,
    /// Toward -x
    pub left: bool,
    /// Toward +x
    pub right: bool,
}

impl Intent {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Per-axis direction in {-1, 0, 1}; opposing flags cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Strength of a paddle strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitForce {
    pub base: f32,
    /// Uniform random extra in `[0, jitter)`
    pub jitter: f32,
}

impl Default for HitForce {
    fn default() -> Self {
        Self {
            base: HIT_BASE_FORCE,
            jitter: HIT_FORCE_JITTER,
        }
    }
}

impl HitForce {
    /// Draw a force magnitude from the simulation RNG
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.jitter > 0.0 {
            self.base + rng.random_range(0.0..self.jitter)
        } else {
            self.base
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub position: Vec2,
    /// Position at the start of the last tick (for derived speed)
    pub previous_position: Vec2,
}

impl Paddle {
    /// Paddle at its faceoff spot
    pub fn new(side: Side) -> Self {
        let start = Self::start_position(side);
        Self {
            side,
            position: start,
            previous_position: start,
        }
    }

    pub fn start_position(side: Side) -> Vec2 {
        Vec2::new(side.goal_sign() * PADDLE_START_X, 0.0)
    }

    /// Return to the faceoff spot, with no residual speed
    pub fn reset(&mut self) {
        *self = Self::new(self.side);
    }

    /// Distance moved during the last tick
    #[inline]
    pub fn speed(&self) -> f32 {
        self.position.distance(self.previous_position)
    }

    /// Remember the current position before this tick's movement
    #[inline]
    pub fn begin_tick(&mut self) {
        self.previous_position = self.position;
    }

    /// Clamp into the boards and onto this paddle's own half
    pub fn constrain(&mut self, rink: &RinkGeometry) {
        let (min_x, max_x) = rink.paddle_x_range(self.side);
        let (min_y, max_y) = rink.paddle_y_range();
        self.position.x = self.position.x.clamp(min_x, max_x);
        self.position.y = self.position.y.clamp(min_y, max_y);
    }

    /// Move by `speed` along every requested axis (diagonals are not normalized)
    pub fn apply_intent(&mut self, intent: &Intent, speed: f32, rink: &RinkGeometry) {
        self.position += intent.direction() * speed;
        self.constrain(rink);
    }

    /// Step toward `target`, at most `max_step` per axis
    ///
    /// Axes already within `tolerance` of the target do not move.
    pub fn move_toward(&mut self, target: Vec2, max_step: f32, tolerance: f32, rink: &RinkGeometry) {
        let delta = target - self.position;
        if delta.x.abs() > tolerance {
            self.position.x += step_toward(self.position.x, target.x, max_step);
        }
        if delta.y.abs() > tolerance {
            self.position.y += step_toward(self.position.y, target.y, max_step);
        }
        self.constrain(rink);
    }
}

/// Strike the puck if it overlaps the paddle
///
/// The puck's velocity is replaced by the collision normal scaled by a force
/// drawn from `rng`, and the puck is pushed out to exactly the contact
/// distance so it cannot register again next tick. Returns true on a hit.
pub fn resolve_paddle_collision<R: Rng + ?Sized>(
    puck: &mut Puck,
    paddle: &Paddle,
    rink: &RinkGeometry,
    hit_force: &HitForce,
    rng: &mut R,
) -> bool {
    let contact = rink.collision_distance();
    let offset = puck.position - paddle.position;
    if offset.length() >= contact {
        return false;
    }

    let mut normal = offset.normalize_or_zero();
    if normal == Vec2::ZERO {
        // Dead center: send it toward the opponent's end
        normal = Vec2::new(-paddle.side.goal_sign(), 0.0);
    }

    puck.velocity = normal * hit_force.sample(rng);
    puck.position = paddle.position + normal * contact;
    true
}
