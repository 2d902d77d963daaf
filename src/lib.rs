//! Rink Hockey - a two-paddle air hockey simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (puck physics, paddles, AI, match flow)
//! - `clock`: Frame timing to fixed simulation steps
//! - `driver`: Owns a simulation and publishes snapshots to observers
//! - `settings`: Data-driven tuning and match configuration
//! - `progress`: Level progress persistence

pub mod clock;
pub mod driver;
pub mod progress;
pub mod settings;
pub mod sim;

pub use clock::FrameClock;
pub use driver::{Driver, Observer, ObserverError};
pub use progress::{MemoryStore, ProgressError, ProgressStore};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; puck and paddle speeds are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frames arriving faster than this are skipped
    pub const MAX_FPS: f32 = 144.0;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Rink dimensions (x is the long axis, y the short axis)
    pub const RINK_WIDTH: f32 = 30.0;
    pub const RINK_HEIGHT: f32 = 15.0;
    pub const GOAL_MOUTH_HALF_WIDTH: f32 = 2.0;
    pub const GOAL_DEPTH: f32 = 2.0;
    /// Gap kept between the puck edge and the boards
    pub const WALL_BUFFER: f32 = 0.1;

    /// Puck defaults (velocity is in units per tick)
    pub const PUCK_RADIUS: f32 = 0.5;
    pub const PUCK_FRICTION: f32 = 0.98;
    pub const PUCK_BOUNCE_DAMPING: f32 = 0.7;
    /// Velocity components below this snap to zero
    pub const PUCK_REST_EPSILON: f32 = 0.01;

    /// Paddle defaults
    pub const PADDLE_RADIUS: f32 = 1.0;
    pub const PADDLE_SPEED: f32 = 0.3;
    /// Distance kept from the boards
    pub const PADDLE_MARGIN: f32 = 1.0;
    /// Distance kept from the center line (0 = may touch it)
    pub const CENTER_MARGIN: f32 = 0.0;
    /// Faceoff distance from center along the long axis
    pub const PADDLE_START_X: f32 = 8.0;

    /// Hit force = base + uniform jitter in [0, jitter)
    pub const HIT_BASE_FORCE: f32 = 0.5;
    pub const HIT_FORCE_JITTER: f32 = 0.3;

    /// Match structure (seconds)
    pub const PERIOD_DURATION: f32 = 60.0;
    pub const MAX_PERIODS: u32 = 3;
    pub const INTERMISSION_DURATION: f32 = 5.0;
    pub const GOAL_CELEBRATION_DURATION: f32 = 1.5;

    /// Number of AI difficulty tiers (one per level)
    pub const MAX_LEVEL: u32 = 3;
}

/// Per-axis step from `current` toward `target`, never overshooting
///
/// Returns `sign(delta) * min(max_step, |delta|)`.
#[inline]
pub fn step_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    delta.signum() * max_step.min(delta.abs())
}

/// Zero out velocity components smaller than `epsilon`
#[inline]
pub fn snap_to_rest(v: Vec2, epsilon: f32) -> Vec2 {
    let snap = |c: f32| if c.abs() < epsilon { 0.0 } else { c };
    Vec2::new(snap(v.x), snap(v.y))
}
