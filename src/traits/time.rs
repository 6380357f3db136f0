//! Millisecond clock abstraction.
//!
//! This module provides the `Clock` trait that abstracts over different time
//! providers (a HAL timer, embassy-time, mock, etc.) so the integrator can be
//! tested on the host.

use core::cell::Cell;

/// Monotonic millisecond time source.
///
/// The counter is 32 bits wide and wraps after roughly 49.7 days, matching
/// the usual `millis()` counter on small controllers. Consumers compute
/// deltas with [`Clock::elapsed_since`] so the rollover is transparent.
///
/// # Example
///
/// ```
/// use turn_sensor::traits::{Clock, MockClock};
///
/// let clock = MockClock::with_initial(u32::MAX - 4);
/// let reference = clock.now_ms();
/// clock.advance(10);
/// assert_eq!(clock.elapsed_since(reference), 10);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary start point.
    fn now_ms(&self) -> u32;

    /// Returns elapsed milliseconds since `reference_ms`.
    ///
    /// Uses wrapping subtraction, so one counter rollover between the two
    /// readings still yields the right delta.
    fn elapsed_since(&self, reference_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(reference_ms)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock clock with controllable time advancement.
///
/// Interior mutability lets a test keep a shared reference while the
/// integrator holds `&MockClock` as its clock.
///
/// # Example
///
/// ```
/// use turn_sensor::traits::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(20);
/// assert_eq!(clock.now_ms(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    current_ms: Cell<u32>,
}

impl MockClock {
    /// Creates a new `MockClock` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a new `MockClock` starting at the specified time.
    pub fn with_initial(ms: u32) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u32) {
        self.current_ms.set(ms);
    }

    /// Advances the current time, wrapping like a hardware counter.
    pub fn advance(&self, ms: u32) {
        self.current_ms.set(self.current_ms.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.current_ms.get()
    }
}
