//! Rink Hockey entry point
//!
//! Native builds run a headless AI-vs-AI match and log how it went.
//! Usage: `rink-hockey [settings.json] [progress.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use rink_hockey::progress::{FileStore, MemoryStore, ProgressStore};
    use rink_hockey::sim::{Command, GameEvent, MatchPhase, Snapshot, TickInput};
    use rink_hockey::{Driver, Observer, ObserverError, Settings};

    /// Logs the interesting events of each tick
    struct EventLog;

    impl Observer for EventLog {
        fn on_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError> {
            let score = snapshot.match_state.score;
            for event in &snapshot.events {
                match event {
                    GameEvent::GoalScored { side } => log::info!(
                        "[P{} {}] Goal {:?}! {} - {}",
                        snapshot.match_state.current_period,
                        snapshot.match_state.format_clock(),
                        side,
                        score.home,
                        score.away
                    ),
                    GameEvent::PaddleHit { side, paddle_speed, .. } => {
                        log::trace!("{:?} hit (paddle speed {:.2})", side, paddle_speed)
                    }
                    GameEvent::WallHit { .. } => log::trace!("Wall"),
                    _ => {}
                }
            }
            Ok(())
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_or_default(Path::new(&path)),
            None => Settings::default(),
        };
        let store: Box<dyn ProgressStore> = match args.next() {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };

        let mut driver = Driver::new(&settings, store);
        driver.add_observer(Box::new(EventLog));

        if !driver.state().ai_enabled {
            driver.step(&TickInput::with_command(Command::ToggleAiMode));
        }

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        while !driver.state().match_state.phase.is_terminal() {
            driver.step(&input);
        }

        let state = driver.state();
        let score = state.match_state.score;
        let result = match state.match_state.phase {
            MatchPhase::Victory => "Home wins, next level unlocked",
            MatchPhase::Champion => "Home wins, all levels complete",
            _ if score.home == score.away => "Tied, level replays",
            _ => "Away wins",
        };
        log::info!(
            "Final: {} - {} after {} ticks. {}",
            score.home,
            score.away,
            state.time_ticks,
            result
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rink Hockey (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Driver` from their own frame callback
}
