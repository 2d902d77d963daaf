//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick: commands, paddles (input or AI), puck integration, goal detection,
//! paddle strikes, wall bounces, match clock.

use serde::{Deserialize, Serialize};

use super::ai::{self, AiProfile};
use super::match_state::{MatchPhase, MatchTransition};
use super::paddle::{Intent, resolve_paddle_collision};
use super::puck::{advance, resolve_goal, resolve_wall_collision};
use super::rink::Side;
use super::state::{GameEvent, SimulationState};

/// Discrete requests from outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Put the puck back at center ice, at rest
    ResetPuck,
    /// Replay the current level from the start
    RestartLevel,
    /// Start over from level 1
    StartNewGame,
    /// Switch the away paddle between player and AI control
    ToggleAiMode,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub home: Intent,
    /// Ignored while the AI drives the away paddle
    pub away: Intent,
    /// Applied in order before anything moves
    pub commands: Vec<Command>,
    /// Idle/demo mode - AI plays the home paddle too
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with_command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
///
/// `dt` is the tick length in seconds and only drives the match clocks; puck
/// and paddle speeds are per tick.
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    state.events.clear();

    for command in &input.commands {
        apply_command(state, *command);
    }

    state.time_ticks += 1;
    state.home.begin_tick();
    state.away.begin_tick();

    if state.match_state.phase == MatchPhase::Playing {
        move_paddles(state, input);
        update_puck(state, dt);
    }

    if let Some(transition) = state.match_state.advance_time(dt) {
        on_transition(state, transition);
    }

    debug_assert!(state.home.position.x <= 0.0, "home paddle crossed center");
    debug_assert!(state.away.position.x >= 0.0, "away paddle crossed center");
    debug_assert!(state.match_state.period_time_remaining >= 0.0);
    debug_assert!(state.match_state.intermission_time_remaining >= 0.0);
    debug_assert!(state.match_state.current_period <= state.match_state.max_periods);
}

fn apply_command(state: &mut SimulationState, command: Command) {
    match command {
        Command::ResetPuck => {
            state.puck.reset();
            state.emit(GameEvent::PuckReset);
        }
        Command::RestartLevel => {
            state.match_state.restart_level();
            state.faceoff();
            let level = state.match_state.current_level;
            log::info!("Restarting level {}", level);
            state.emit(GameEvent::LevelRestarted { level });
        }
        Command::StartNewGame => {
            state.match_state.start_new_game();
            state.faceoff();
            log::info!("New game started");
            state.emit(GameEvent::NewGameStarted);
        }
        Command::ToggleAiMode => {
            state.ai_enabled = !state.ai_enabled;
            log::info!("AI mode: {}", state.ai_enabled);
            state.emit(GameEvent::AiModeChanged {
                enabled: state.ai_enabled,
            });
        }
    }
}

fn move_paddles(state: &mut SimulationState, input: &TickInput) {
    let profile = AiProfile::for_level(state.match_state.current_level);
    let speed = state.tuning.paddle_speed;
    let rink = &state.tuning.rink;

    if input.idle_mode {
        ai::drive(&profile, &mut state.home, &state.puck, rink, speed);
    } else {
        state.home.apply_intent(&input.home, speed, rink);
    }

    if state.ai_enabled {
        ai::drive(&profile, &mut state.away, &state.puck, rink, speed);
    } else {
        state.away.apply_intent(&input.away, speed, rink);
    }
}

fn update_puck(state: &mut SimulationState, dt: f32) {
    // Hold the puck at center while a goal is being celebrated
    if state.is_celebrating() {
        state.celebration_remaining = (state.celebration_remaining - dt).max(0.0);
        return;
    }

    advance(&mut state.puck, &state.tuning.puck);

    // Goals before the wall clamp so a scoring puck is never pulled back
    if let Some(scorer) = resolve_goal(&mut state.puck, &state.tuning.rink) {
        if state.match_state.record_goal(scorer) {
            let score = state.match_state.score;
            log::debug!("Goal {:?}: {} - {}", scorer, score.home, score.away);
            state.emit(GameEvent::GoalScored { side: scorer });
            state.celebration_remaining = state.tuning.celebration_duration;
        }
        state.emit(GameEvent::PuckReset);
        return;
    }

    // Both paddles, home first, no short circuit
    for side in [Side::Home, Side::Away] {
        let paddle = *state.paddle(side);
        if resolve_paddle_collision(
            &mut state.puck,
            &paddle,
            &state.tuning.rink,
            &state.tuning.hit_force,
            &mut state.rng,
        ) {
            state.emit(GameEvent::PaddleHit {
                side,
                position: state.puck.position,
                paddle_speed: paddle.speed(),
            });
        }
    }

    if resolve_wall_collision(&mut state.puck, &state.tuning.rink, &state.tuning.puck) {
        state.emit(GameEvent::WallHit {
            position: state.puck.position,
        });
    }
}

fn on_transition(state: &mut SimulationState, transition: MatchTransition) {
    match transition {
        MatchTransition::PeriodEnded { period } => {
            log::info!("End of period {}", period);
            state.faceoff();
            state.emit(GameEvent::PeriodEnded { period });
        }
        MatchTransition::PeriodStarted { period } => {
            log::info!("Period {} started", period);
            state.faceoff();
            state.emit(GameEvent::PeriodStarted { period });
        }
        MatchTransition::FinalBuzzer => {
            let score = state.match_state.score;
            log::info!("Final buzzer: {} - {}", score.home, score.away);
            state.faceoff();
            state.emit(GameEvent::FinalBuzzer);
        }
        MatchTransition::Resolved { phase, advanced_to } => {
            log::info!("Match ended: {:?}", phase);
            state.emit(GameEvent::MatchEnded { phase });
            if let Some(level) = advanced_to {
                log::info!("Advanced to level {}", level);
                state.emit(GameEvent::LevelAdvanced { level });
            }
        }
    }
}
