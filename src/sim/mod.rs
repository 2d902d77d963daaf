//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable update order (home before away)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod match_state;
pub mod paddle;
pub mod puck;
pub mod rink;
pub mod state;
pub mod tick;

pub use ai::AiProfile;
pub use match_state::{MatchConfig, MatchPhase, MatchState, MatchTransition, Score};
pub use paddle::{HitForce, Intent, Paddle, resolve_paddle_collision};
pub use puck::{Puck, PuckPhysics, advance, resolve_goal, resolve_wall_collision};
pub use rink::{GoalLine, RinkGeometry, Side};
pub use state::{GameEvent, SimulationState, Snapshot, Tuning};
pub use tick::{Command, TickInput, tick};
