use std::thread;
use std::time::{Duration, Instant};

use concentration_core::Clock;

/// Wall clock pacing frames at a fixed rate.
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            last_tick: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) {
        if let Some(rest) = self.frame.checked_sub(self.last_tick.elapsed()) {
            thread::sleep(rest);
        }
        self.last_tick = Instant::now();
    }

    fn hold(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.last_tick = Instant::now();
    }
}
