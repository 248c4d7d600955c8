// One-shot gameplay timer

/// A restartable one-shot countdown.
///
/// The timer starts disarmed; `start()` arms it from zero and `advance()`
/// reports completion exactly once per arm cycle, after which the timer
/// disarms itself until the next `start()`.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Countdown duration in seconds
    duration: f32,
    /// Time accumulated since the last `start()`
    elapsed: f32,
    /// Whether the countdown is currently armed
    running: bool,
}

impl Timer {
    /// Create a disarmed timer with the given duration (seconds)
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Arm the timer from zero. Restarts the countdown if already armed.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// Returns `true` exactly once per arm cycle, when the accumulated time
    /// first reaches the configured duration. Disarmed timers ignore the
    /// call, as does a zero or negative `dt`.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.running || dt <= 0.0 {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running = false;
            return true;
        }
        false
    }

    /// Whether the countdown is currently armed
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The configured countdown duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }
}
