//! Mock blocking delay for host testing
//!
//! Calibration blocks between samples through `embedded_hal::delay::DelayNs`.
//! On target that is a HAL timer or a cycle-counting busy loop; on the host
//! `MockDelay` records the requested time instead of sleeping.

use embedded_hal::delay::DelayNs;

use super::time::MockClock;

const NANOS_PER_MS: u64 = 1_000_000;

/// Delay that records elapsed time without sleeping
///
/// When linked to a [`MockClock`], whole milliseconds of requested delay are
/// also applied to that clock, so code under test observes time passing.
#[derive(Debug, Default)]
pub struct MockDelay<'a> {
    clock: Option<&'a MockClock>,
    total_ns: u64,
    pending_ns: u64,
}

impl<'a> MockDelay<'a> {
    /// Create a standalone mock delay
    pub fn new() -> Self {
        Self {
            clock: None,
            total_ns: 0,
            pending_ns: 0,
        }
    }

    /// Create a mock delay that advances `clock`
    pub fn linked(clock: &'a MockClock) -> Self {
        Self {
            clock: Some(clock),
            total_ns: 0,
            pending_ns: 0,
        }
    }

    /// Total delay requested so far (nanoseconds)
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Total delay requested so far (whole milliseconds)
    pub fn total_ms(&self) -> u64 {
        self.total_ns / NANOS_PER_MS
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);

        if let Some(clock) = self.clock {
            self.pending_ns += u64::from(ns);
            let whole_ms = self.pending_ns / NANOS_PER_MS;
            self.pending_ns %= NANOS_PER_MS;
            clock.advance(whole_ms as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Clock;

    #[test]
    fn test_mock_delay_records_time() {
        let mut delay = MockDelay::new();
        delay.delay_ms(10);
        delay.delay_us(500);
        assert_eq!(delay.total_ns(), 10_500_000);
        assert_eq!(delay.total_ms(), 10);
    }

    #[test]
    fn test_linked_delay_advances_clock() {
        let clock = MockClock::with_initial(100);
        let mut delay = MockDelay::linked(&clock);

        delay.delay_ms(10);
        assert_eq!(clock.now_ms(), 110);

        // Sub-millisecond delays accumulate until a whole millisecond passes
        delay.delay_us(600);
        assert_eq!(clock.now_ms(), 110);
        delay.delay_us(600);
        assert_eq!(clock.now_ms(), 111);
    }
}
