//! Time source abstraction
//!
//! Drivers that pace themselves (step timing, blink patterns) read time
//! through this trait so they can run against a simulated clock on host.

/// Monotonic clock with microsecond resolution
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
