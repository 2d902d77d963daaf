//! Simulation state and the events/snapshots it publishes
//!
//! Everything a tick reads or writes lives in [`SimulationState`], so several
//! matches can run side by side and tests can drive one deterministically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::match_state::{MatchConfig, MatchPhase, MatchState};
use super::paddle::{HitForce, Paddle};
use super::puck::{Puck, PuckPhysics};
use super::rink::{RinkGeometry, Side};
use crate::consts::*;

/// Something observers may want to react to (sound, particles, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    WallHit { position: Vec2 },
    PaddleHit {
        side: Side,
        position: Vec2,
        /// Paddle movement during this tick (drives spray effects)
        paddle_speed: f32,
    },
    GoalScored { side: Side },
    PuckReset,
    PeriodEnded { period: u32 },
    PeriodStarted { period: u32 },
    FinalBuzzer,
    MatchEnded { phase: MatchPhase },
    LevelAdvanced { level: u32 },
    LevelRestarted { level: u32 },
    NewGameStarted,
    AiModeChanged { enabled: bool },
}

/// Physics and match tuning for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub rink: RinkGeometry,
    pub puck: PuckPhysics,
    pub hit_force: HitForce,
    /// Player paddle speed (units per tick)
    pub paddle_speed: f32,
    pub match_config: MatchConfig,
    /// Seconds after a goal during which no further goal can count
    pub celebration_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rink: RinkGeometry::default(),
            puck: PuckPhysics::default(),
            hit_force: HitForce::default(),
            paddle_speed: PADDLE_SPEED,
            match_config: MatchConfig::default(),
            celebration_duration: GOAL_CELEBRATION_DURATION,
        }
    }
}

/// Settled, read-only view of the simulation after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub puck: Puck,
    pub home: Paddle,
    pub away: Paddle,
    pub match_state: MatchState,
    pub ai_enabled: bool,
    /// A goal was just scored and play is paused for it
    pub celebrating: bool,
    pub events: Vec<GameEvent>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    pub puck: Puck,
    pub home: Paddle,
    pub away: Paddle,
    pub match_state: MatchState,
    /// Away paddle is driven by the AI
    pub ai_enabled: bool,
    /// Seconds of post-goal celebration left
    pub celebration_remaining: f32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Create a new simulation with the given seed, starting at `level_progress`
    pub fn new(seed: u64, tuning: Tuning, level_progress: u32) -> Self {
        let match_state = MatchState::new(&tuning.match_config, level_progress);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            tuning,
            puck: Puck::default(),
            home: Paddle::new(Side::Home),
            away: Paddle::new(Side::Away),
            match_state,
            ai_enabled: false,
            celebration_remaining: 0.0,
            events: Vec::new(),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    #[inline]
    pub fn is_celebrating(&self) -> bool {
        self.celebration_remaining > 0.0
    }

    /// Puck to center, paddles to their faceoff spots
    pub fn faceoff(&mut self) {
        self.puck.reset();
        self.home.reset();
        self.away.reset();
        self.celebration_remaining = 0.0;
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Copy of the state for observers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            puck: self.puck,
            home: self.home,
            away: self.away,
            match_state: self.match_state.clone(),
            ai_enabled: self.ai_enabled,
            celebrating: self.is_celebrating(),
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_at_faceoff() {
        let state = SimulationState::new(1, Tuning::default(), 1);
        assert_eq!(state.puck, Puck::default());
        assert_eq!(state.home.position, Vec2::new(-PADDLE_START_X, 0.0));
        assert_eq!(state.away.position, Vec2::new(PADDLE_START_X, 0.0));
        assert!(!state.ai_enabled);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_faceoff_clears_celebration() {
        let mut state = SimulationState::new(1, Tuning::default(), 1);
        state.puck = Puck::new(Vec2::new(3.0, 1.0), Vec2::new(0.2, 0.0));
        state.home.position = Vec2::new(-2.0, 4.0);
        state.celebration_remaining = 1.0;

        state.faceoff();
        assert!(state.puck.is_at_rest());
        assert_eq!(state.home.position, Paddle::start_position(Side::Home));
        assert!(!state.is_celebrating());
    }

    #[test]
    fn test_snapshot_serializes_events() {
        let mut state = SimulationState::new(1, Tuning::default(), 1);
        state.emit(GameEvent::GoalScored { side: Side::Away });
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"kind\":\"goal_scored\""));
        assert!(json.contains("\"side\":\"Away\""));
    }

    #[test]
    fn test_tuning_fills_missing_fields() {
        let tuning: Tuning = serde_json::from_str(r#"{"paddle_speed": 0.5}"#).unwrap();
        assert_eq!(tuning.paddle_speed, 0.5);
        assert_eq!(tuning.rink, RinkGeometry::default());
    }
}
