//! AI opponent
//!
//! A stateless per-tick policy: pick a target point from the puck's state,
//! then walk the paddle toward it at a level-dependent speed. Difficulty comes
//! entirely from the [`AiProfile`] chosen by the current level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::puck::Puck;
use super::rink::{RinkGeometry, Side};
use crate::consts::MAX_LEVEL;

/// Distance in front of its own goal line the AI holds when defending
const DEFENSIVE_DEPTH: f32 = 2.5;
/// How far up-ice the most aggressive AI retreats to when the puck is away
const RETREAT_RANGE: f32 = 4.0;
/// Below this speed the puck is treated as stationary for look-ahead
const LOOKAHEAD_MIN_SPEED: f32 = 0.1;

/// Difficulty tier parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Scales the paddle speed
    pub speed_multiplier: f32,
    /// 0 = hangs back at the goal, 1 = attacks the puck
    pub aggressiveness: f32,
    /// Dead zone around the target; larger reacts later
    pub reaction_tolerance: f32,
    /// How much the AI shadows the puck's y while it is on the far half
    pub anticipation: f32,
    /// Ticks of puck travel the AI predicts ahead
    pub lookahead_ticks: f32,
}

const PROFILES: [AiProfile; MAX_LEVEL as usize] = [
    AiProfile {
        speed_multiplier: 0.5,
        aggressiveness: 0.1,
        reaction_tolerance: 0.5,
        anticipation: 0.0,
        lookahead_ticks: 0.0,
    },
    AiProfile {
        speed_multiplier: 0.75,
        aggressiveness: 0.45,
        reaction_tolerance: 0.3,
        anticipation: 0.3,
        lookahead_ticks: 5.0,
    },
    AiProfile {
        speed_multiplier: 1.0,
        aggressiveness: 0.8,
        reaction_tolerance: 0.1,
        anticipation: 0.6,
        lookahead_ticks: 10.0,
    },
];

impl AiProfile {
    /// Profile for a 1-based level (out-of-range levels clamp to the table)
    pub fn for_level(level: u32) -> Self {
        let index = level.clamp(1, MAX_LEVEL) as usize - 1;
        PROFILES[index]
    }
}

/// Where the puck will be after the profile's look-ahead, kept on the ice
fn predict_puck(profile: &AiProfile, puck: &Puck, rink: &RinkGeometry) -> Vec2 {
    if profile.lookahead_ticks <= 0.0 || puck.speed() <= LOOKAHEAD_MIN_SPEED {
        return puck.position;
    }
    rink.clamp_to_ice(puck.position + puck.velocity * profile.lookahead_ticks)
}

/// Choose the point the AI paddle should head for this tick
pub fn decide(profile: &AiProfile, side: Side, puck: &Puck, rink: &RinkGeometry) -> Vec2 {
    let sign = side.goal_sign();
    let defensive_x = sign * (rink.half_width - DEFENSIVE_DEPTH);

    if rink.half_of(puck.position.x) == Some(side) {
        let predicted = predict_puck(profile, puck, rink);
        let x = defensive_x + (predicted.x - defensive_x) * profile.aggressiveness;
        Vec2::new(x, predicted.y)
    } else {
        let retreat_x = defensive_x - sign * profile.aggressiveness * RETREAT_RANGE;
        Vec2::new(retreat_x, puck.position.y * profile.anticipation)
    }
}

/// Run one tick of AI control for `paddle`
pub fn drive(
    profile: &AiProfile,
    paddle: &mut Paddle,
    puck: &Puck,
    rink: &RinkGeometry,
    paddle_speed: f32,
) {
    let target = decide(profile, paddle.side, puck, rink);
    paddle.move_toward(
        target,
        paddle_speed * profile.speed_multiplier,
        profile.reaction_tolerance,
        rink,
    );
}
