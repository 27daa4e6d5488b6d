//! Pause capability used to pace the line-clear flash.
//!
//! The flash is the only place the engine waits. Real runs block the thread;
//! tests and headless simulations use [`ManualPause`], which only records.

use std::time::Duration;

/// Blocks the caller for a duration
pub trait Pause {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: records each requested pause and returns immediately
#[derive(Debug, Clone, Default)]
pub struct ManualPause {
    requests: Vec<Duration>,
    elapsed: Duration,
}

impl ManualPause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested so far, in order
    pub fn requests(&self) -> &[Duration] {
        &self.requests
    }

    /// Sum of all requested pauses
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Pause for ManualPause {
    fn pause(&mut self, duration: Duration) {
        self.requests.push(duration);
        self.elapsed += duration;
    }
}

impl<P: Pause + ?Sized> Pause for &mut P {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration);
    }
}
