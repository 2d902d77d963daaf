//! Match flow: periods, intermissions, result and level progression
//!
//! `Playing -> Intermission -> Playing ...` until the final period runs out,
//! then `GameOver` for one tick before settling on `Victory`, `Champion` or
//! `Defeat`. Terminal phases are only left through [`MatchState::restart_level`]
//! or [`MatchState::start_new_game`].

use serde::{Deserialize, Serialize};

use super::rink::Side;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Clock running, puck live
    Playing,
    /// Break between periods
    Intermission,
    /// Final buzzer has sounded; result not yet settled
    GameOver,
    /// Home won; the next level is unlocked
    Victory,
    /// Home won the last level
    Champion,
    /// Away won or the match was tied
    Defeat,
}

impl MatchPhase {
    /// Whether the match is over and waiting for a restart/new game
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Victory | MatchPhase::Champion | MatchPhase::Defeat)
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Side with more goals, `None` on a tie
    pub fn leader(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Match structure configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seconds per period
    pub period_duration: f32,
    pub max_periods: u32,
    /// Seconds between periods
    pub intermission_duration: f32,
    pub max_level: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            period_duration: PERIOD_DURATION,
            max_periods: MAX_PERIODS,
            intermission_duration: INTERMISSION_DURATION,
            max_level: MAX_LEVEL,
        }
    }
}

/// Phase change produced by [`MatchState::advance_time`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTransition {
    /// A non-final period ended; intermission begins
    PeriodEnded { period: u32 },
    /// Intermission ended; play resumes in `period`
    PeriodStarted { period: u32 },
    /// The final period ended
    FinalBuzzer,
    /// The result has been settled
    Resolved {
        phase: MatchPhase,
        /// Newly reached level on a victory
        advanced_to: Option<u32>,
    },
}

/// Score, clocks and level for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: Score,
    pub phase: MatchPhase,
    /// 1-based
    pub current_period: u32,
    pub max_periods: u32,
    pub period_duration: f32,
    pub period_time_remaining: f32,
    pub intermission_duration: f32,
    pub intermission_time_remaining: f32,
    /// 1-based
    pub current_level: u32,
    pub max_level: u32,
    /// Level to resume at; persisted outside the simulation
    pub level_progress: u32,
}

impl MatchState {
    /// Fresh match at the level recorded in `level_progress`
    pub fn new(config: &MatchConfig, level_progress: u32) -> Self {
        let max_level = config.max_level.max(1);
        let level = level_progress.clamp(1, max_level);
        let mut state = Self {
            score: Score::default(),
            phase: MatchPhase::Playing,
            current_period: 1,
            max_periods: config.max_periods.max(1),
            period_duration: config.period_duration.max(0.0),
            period_time_remaining: 0.0,
            intermission_duration: config.intermission_duration.max(0.0),
            intermission_time_remaining: 0.0,
            current_level: level,
            max_level,
            level_progress: level,
        };
        state.restart_level();
        state
    }

    /// Replay the current level from the opening faceoff
    pub fn restart_level(&mut self) {
        self.score = Score::default();
        self.phase = MatchPhase::Playing;
        self.current_period = 1;
        self.period_time_remaining = self.period_duration;
        self.intermission_time_remaining = 0.0;
    }

    /// Start over from level 1
    pub fn start_new_game(&mut self) {
        self.current_level = 1;
        self.level_progress = 1;
        self.restart_level();
    }

    #[inline]
    pub fn is_final_period(&self) -> bool {
        self.current_period >= self.max_periods
    }

    /// Count a goal; rejected unless the puck is live
    pub fn record_goal(&mut self, side: Side) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.score.increment(side);
        true
    }

    /// Run the clocks forward by `dt` seconds
    ///
    /// At most one transition happens per call.
    pub fn advance_time(&mut self, dt: f32) -> Option<MatchTransition> {
        let dt = dt.max(0.0);
        match self.phase {
            MatchPhase::Playing => {
                self.period_time_remaining = (self.period_time_remaining - dt).max(0.0);
                if self.period_time_remaining > 0.0 {
                    return None;
                }
                if self.is_final_period() {
                    self.phase = MatchPhase::GameOver;
                    Some(MatchTransition::FinalBuzzer)
                } else {
                    self.phase = MatchPhase::Intermission;
                    self.intermission_time_remaining = self.intermission_duration;
                    Some(MatchTransition::PeriodEnded {
                        period: self.current_period,
                    })
                }
            }
            MatchPhase::Intermission => {
                self.intermission_time_remaining =
                    (self.intermission_time_remaining - dt).max(0.0);
                if self.intermission_time_remaining > 0.0 {
                    return None;
                }
                self.current_period = (self.current_period + 1).min(self.max_periods);
                self.period_time_remaining = self.period_duration;
                self.phase = MatchPhase::Playing;
                Some(MatchTransition::PeriodStarted {
                    period: self.current_period,
                })
            }
            MatchPhase::GameOver => Some(self.resolve()),
            MatchPhase::Victory | MatchPhase::Champion | MatchPhase::Defeat => None,
        }
    }

    /// Settle the result once the final buzzer has sounded
    fn resolve(&mut self) -> MatchTransition {
        let mut advanced_to = None;
        self.phase = match self.score.leader() {
            Some(Side::Home) if self.current_level < self.max_level => {
                self.current_level += 1;
                self.level_progress = self.current_level;
                advanced_to = Some(self.current_level);
                MatchPhase::Victory
            }
            Some(Side::Home) => MatchPhase::Champion,
            Some(Side::Away) | None => MatchPhase::Defeat,
        };
        MatchTransition::Resolved {
            phase: self.phase,
            advanced_to,
        }
    }

    /// Seconds left on whichever clock is running
    pub fn clock(&self) -> f32 {
        match self.phase {
            MatchPhase::Intermission => self.intermission_time_remaining,
            _ => self.period_time_remaining,
        }
    }

    /// Running clock as `m:ss`
    pub fn format_clock(&self) -> String {
        let total = self.clock().floor() as u32;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> MatchConfig {
        MatchConfig {
            period_duration: 1.0,
            max_periods: 2,
            intermission_duration: 0.5,
            max_level: 3,
        }
    }

    #[test]
    fn test_new_match_starts_playing() {
        let state = MatchState::new(&MatchConfig::default(), 1);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.current_period, 1);
        assert_eq!(state.period_time_remaining, PERIOD_DURATION);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_level_progress_is_clamped() {
        assert_eq!(MatchState::new(&short_config(), 0).current_level, 1);
        assert_eq!(MatchState::new(&short_config(), 2).current_level, 2);
        assert_eq!(MatchState::new(&short_config(), 9).current_level, 3);
    }

    #[test]
    fn test_period_to_intermission_to_next_period() {
        let mut state = MatchState::new(&short_config(), 1);

        assert_eq!(state.advance_time(0.6), None);
        assert_eq!(
            state.advance_time(0.6),
            Some(MatchTransition::PeriodEnded { period: 1 })
        );
        assert_eq!(state.phase, MatchPhase::Intermission);
        assert_eq!(state.period_time_remaining, 0.0);

        assert_eq!(state.advance_time(0.3), None);
        assert_eq!(
            state.advance_time(0.3),
            Some(MatchTransition::PeriodStarted { period: 2 })
        );
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.intermission_time_remaining, 0.0);
        assert_eq!(state.period_time_remaining, 1.0);
    }

    #[test]
    fn test_home_win_advances_level() {
        let mut state = MatchState::new(&short_config(), 1);
        state.current_period = 2;
        state.record_goal(Side::Home);

        assert_eq!(state.advance_time(2.0), Some(MatchTransition::FinalBuzzer));
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(
            state.advance_time(0.1),
            Some(MatchTransition::Resolved {
                phase: MatchPhase::Victory,
                advanced_to: Some(2),
            })
        );
        assert_eq!(state.current_level, 2);
        assert_eq!(state.level_progress, 2);
        assert_eq!(state.advance_time(0.1), None);
    }

    #[test]
    fn test_home_win_on_last_level_is_champion() {
        let mut state = MatchState::new(&short_config(), 3);
        state.current_period = 2;
        state.record_goal(Side::Home);
        state.advance_time(2.0);
        state.advance_time(0.1);
        assert_eq!(state.phase, MatchPhase::Champion);
        assert_eq!(state.current_level, 3);
    }

    #[test]
    fn test_tie_is_defeat_and_keeps_level() {
        let mut state = MatchState::new(&short_config(), 2);
        state.current_period = 2;
        state.record_goal(Side::Home);
        state.record_goal(Side::Away);
        state.advance_time(2.0);
        state.advance_time(0.1);
        assert_eq!(state.phase, MatchPhase::Defeat);
        assert_eq!(state.current_level, 2);
        assert_eq!(state.level_progress, 2);
    }

    #[test]
    fn test_goals_only_count_while_playing() {
        let mut state = MatchState::new(&short_config(), 1);
        assert!(state.record_goal(Side::Away));
        state.phase = MatchPhase::Intermission;
        assert!(!state.record_goal(Side::Away));
        state.phase = MatchPhase::Defeat;
        assert!(!state.record_goal(Side::Home));
        assert_eq!(state.score, Score { home: 0, away: 1 });
    }

    #[test]
    fn test_restart_level_keeps_level() {
        let mut state = MatchState::new(&short_config(), 2);
        state.record_goal(Side::Away);
        state.current_period = 2;
        state.phase = MatchPhase::Defeat;

        state.restart_level();
        assert_eq!(state.score, Score::default());
        assert_eq!(state.current_period, 1);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.current_level, 2);
        assert_eq!(state.level_progress, 2);
    }

    #[test]
    fn test_start_new_game_resets_level() {
        let mut state = MatchState::new(&short_config(), 3);
        state.start_new_game();
        assert_eq!(state.current_level, 1);
        assert_eq!(state.level_progress, 1);
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut state = MatchState::new(&short_config(), 1);
        state.advance_time(-5.0);
        assert_eq!(state.period_time_remaining, 1.0);
    }

    #[test]
    fn test_format_clock() {
        let mut state = MatchState::new(&MatchConfig::default(), 1);
        assert_eq!(state.format_clock(), "1:00");
        state.period_time_remaining = 9.7;
        assert_eq!(state.format_clock(), "0:09");
    }

    #[test]
    fn test_score_leader() {
        let mut score = Score::default();
        assert_eq!(score.leader(), None);
        score.increment(Side::Away);
        assert_eq!(score.leader(), Some(Side::Away));
        assert_eq!(score.get(Side::Away), 1);
    }
}
