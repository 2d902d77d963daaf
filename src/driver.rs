//! Tick driver
//!
//! Owns the simulation, turns frame timestamps into fixed ticks, persists
//! level progress and hands each settled snapshot to observers. Failures in
//! the outer layers are logged and never stop the simulation.

use crate::clock::FrameClock;
use crate::consts::*;
use crate::progress::ProgressStore;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, SimulationState, Snapshot, TickInput, tick};

#[derive(Debug, thiserror::Error)]
#[error("observer failed: {0}")]
pub struct ObserverError(pub String);

/// Presentation-side consumer of snapshots (renderer, audio, HUD)
pub trait Observer {
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError>;
}

pub struct Driver {
    state: SimulationState,
    clock: FrameClock,
    store: Box<dyn ProgressStore>,
    observers: Vec<Box<dyn Observer>>,
    /// Commands from frames that ran no tick yet
    pending: Vec<Command>,
}

impl Driver {
    /// Build a simulation from settings, resuming at the stored level
    pub fn new(settings: &Settings, store: Box<dyn ProgressStore>) -> Self {
        let settings = settings.clone().sanitized();
        let tuning = settings.tuning();
        let level = load_progress(store.as_ref(), tuning.match_config.max_level);
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting at level {} (seed {})", level, seed);

        let mut state = SimulationState::new(seed, tuning, level);
        state.ai_enabled = settings.ai_opponent;

        Self {
            state,
            clock: FrameClock::new(SIM_DT, MAX_SUBSTEPS, settings.max_fps),
            store,
            observers: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for hosts that stage scenarios (tutorials, tests)
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn progress_store(&self) -> &dyn ProgressStore {
        self.store.as_ref()
    }

    /// Interpolation factor for rendering between ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Run exactly one tick and publish it
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, self.clock.sim_dt());
        self.persist_progress();
        self.publish();
    }

    /// Handle a frame at `now` seconds; returns the number of ticks run
    ///
    /// Commands are one-shot: they go to the first tick that runs, which may
    /// be in a later frame if this one runs none.
    pub fn frame(&mut self, now: f64, input: &TickInput) -> u32 {
        self.pending.extend_from_slice(&input.commands);
        let steps = self.clock.frame(now);
        if steps == 0 {
            return 0;
        }

        let mut held = TickInput {
            commands: std::mem::take(&mut self.pending),
            ..input.clone()
        };
        self.step(&held);
        held.commands.clear();
        for _ in 1..steps {
            self.step(&held);
        }
        steps
    }

    fn persist_progress(&mut self) {
        let level = self.state.events.iter().find_map(|event| match event {
            GameEvent::LevelAdvanced { level } => Some(*level),
            GameEvent::NewGameStarted => Some(self.state.match_state.level_progress),
            _ => None,
        });

        if let Some(level) = level {
            match self.store.save(level) {
                Ok(()) => log::info!("Progress saved (level {})", level),
                Err(e) => log::warn!("Failed to save progress: {}", e),
            }
        }
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.state.snapshot();
        for observer in &mut self.observers {
            if let Err(e) = observer.on_snapshot(&snapshot) {
                log::warn!("{}", e);
            }
        }
    }
}

fn load_progress(store: &dyn ProgressStore, max_level: u32) -> u32 {
    match store.load() {
        Ok(Some(level)) => level.clamp(1, max_level.max(1)),
        Ok(None) => 1,
        Err(e) => {
            log::warn!("Failed to load progress, starting at level 1: {}", e);
            1
        }
    }
}
