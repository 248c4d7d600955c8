// Fixed-step frame pacing.
//
// Physics, input dispatch, gameplay timers and animation all advance with
// the same fixed dt, which keeps the jump/spring/attack countdowns in
// lockstep with the visual cycle regardless of frame rate.

use std::time::Instant;

/// Simulation rate: 60 updates per second
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Cap on catch-up updates after a long frame (hitch, debugger pause),
/// preventing the spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Accumulator that converts variable wall-clock frames into a whole
/// number of fixed simulation steps.
pub struct GameLoop {
    /// Unsimulated wall-clock time, in seconds
    accumulator: f32,
    last_frame: Instant,
    paused: bool,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_frame: Instant::now(),
            paused: false,
            update_count: 0,
        }
    }

    /// Account for the wall-clock time since the previous call and return
    /// how many fixed steps the caller should simulate now (possibly zero,
    /// capped at `MAX_STEPS_PER_FRAME` with the excess discarded).
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_seconds = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_seconds;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            // Too far behind to catch up; drop the remainder
            self.accumulator = 0.0;
        }

        self.update_count += u64::from(steps);
        steps
    }

    /// Total fixed steps simulated so far
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume after a pause. The accumulator is cleared so the pause
    /// doesn't replay as a burst of catch-up steps.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = 0.0;
            log::info!("Game resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_starts_unpaused_with_no_updates() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_frames_yield_no_steps() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(game_loop.begin_frame(), 0);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game_loop = GameLoop::new();

        // 300ms of wall clock would be 18 steps; the cap discards the rest
        thread::sleep(Duration::from_millis(300));
        let steps = game_loop.begin_frame();
        assert_eq!(steps, MAX_STEPS_PER_FRAME);

        // The dropped backlog must not leak into the next frame
        let steps = game_loop.begin_frame();
        assert!(steps <= 1);
    }

    #[test]
    fn test_steps_accumulate_into_update_count() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_secs_f32(FIXED_TIMESTEP));

        let steps = game_loop.begin_frame();
        assert!(steps >= 1);
        assert_eq!(game_loop.update_count(), u64::from(steps));
    }

    #[test]
    fn test_resume_clears_backlog() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        thread::sleep(Duration::from_millis(100));
        game_loop.resume();

        // The paused 100ms must not be simulated
        let steps = game_loop.begin_frame();
        assert!(steps <= 1);
    }
}
