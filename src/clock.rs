//! Frame timing
//!
//! Converts wall-clock frame timestamps into a number of fixed simulation
//! steps. Frames that arrive faster than the frame-rate cap are skipped and
//! their time rolls into the next accepted frame.

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct FrameClock {
    sim_dt: f32,
    max_substeps: u32,
    /// Shortest accepted gap between frames (seconds)
    min_frame_time: f64,
    accumulator: f32,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FPS)
    }
}

impl FrameClock {
    pub fn new(sim_dt: f32, max_substeps: u32, max_fps: f32) -> Self {
        let min_frame_time = if max_fps > 0.0 {
            1.0 / max_fps as f64
        } else {
            0.0
        };
        Self {
            sim_dt,
            max_substeps: max_substeps.max(1),
            min_frame_time,
            accumulator: 0.0,
            last_time: None,
        }
    }

    #[inline]
    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    /// Register a frame at `now` (seconds) and return how many steps to run
    pub fn frame(&mut self, now: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => {
                let elapsed = now - last;
                if elapsed < self.min_frame_time {
                    return 0;
                }
                elapsed as f32
            }
            // First frame: one step's worth
            None => self.sim_dt,
        };
        self.last_time = Some(now);

        // Clamp dt to prevent large jumps (tab switch, debugger)
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.sim_dt && steps < self.max_substeps {
            self.accumulator -= self.sim_dt;
            steps += 1;
        }
        // Spiral of death guard: drop whatever the substep cap left behind
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.sim_dt);
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.sim_dt).clamp(0.0, 1.0)
    }

    /// Forget timing history (after a pause or a restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
