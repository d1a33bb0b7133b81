//! # Frame clocks

use std::{
    thread,
    time::{Duration, Instant},
};

/// The host's frame scheduling capability.
///
/// `now` is a high-resolution timestamp in milliseconds. It never decreases
/// across a call to `schedule_frame`.
pub trait FrameClock {
    fn now(&self) -> f64;

    /// Yields until the next frame is due.
    fn schedule_frame(&mut self);
}

/// Deterministic clock: every scheduled frame advances time by `step` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    now: f64,
    step: f64,
    frames: usize,
}

impl SimulatedClock {
    pub fn new(start: f64, step: f64) -> Self {
        SimulatedClock {
            now: start,
            step,
            frames: 0,
        }
    }

    /// Frames scheduled so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for SimulatedClock {
    /// Sixty frames per second, starting at zero.
    fn default() -> Self {
        SimulatedClock::new(0.0, 1000.0 / 60.0)
    }
}

impl FrameClock for SimulatedClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn schedule_frame(&mut self) {
        self.frames += 1;
        self.now += self.step;
    }
}

/// Wall clock that sleeps for one frame period between frames.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
    period: Duration,
}

impl WallClock {
    pub fn new(period: Duration) -> Self {
        WallClock {
            origin: Instant::now(),
            period,
        }
    }
}

impl FrameClock for WallClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn schedule_frame(&mut self) {
        thread::sleep(self.period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_advances_per_frame() {
        let mut clock = SimulatedClock::new(100.0, 20.0);
        assert_eq!(clock.now(), 100.0);
        clock.schedule_frame();
        clock.schedule_frame();
        assert_eq!(clock.now(), 140.0);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let mut clock = WallClock::new(Duration::from_millis(1));
        let before = clock.now();
        clock.schedule_frame();
        assert!(clock.now() >= before + 1.0);
    }
}
