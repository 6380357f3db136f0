//! Angular rate source traits
//!
//! A rate source yields raw gyro counts about the tracked axis. Scaling to
//! physical units happens in the integrator, so drivers hand over the
//! register value untouched.
//!
//! ## Usage
//!
//! ```ignore
//! use turn_sensor::traits::{AxisRate, GyroAxis, TriAxisGyro};
//!
//! // Wrap any 3-axis driver and track rotation about Z (yaw on a flat robot)
//! let rate_source = AxisRate::new(imu, GyroAxis::Z);
//! ```

use heapless::Deque;

/// Source of raw angular rate samples about one axis
///
/// Reads are assumed to succeed. Bus errors, retries and timeouts belong to
/// the implementation; the integrator never sees them.
pub trait RateSource {
    /// Acquire a fresh sample from the sensor
    fn trigger(&mut self);

    /// Most recently acquired angular rate (raw sensor counts)
    fn rate(&self) -> i16;

    /// Acquire a fresh sample and return it
    fn read_rate(&mut self) -> i16 {
        self.trigger();
        self.rate()
    }
}

impl<R: RateSource + ?Sized> RateSource for &mut R {
    fn trigger(&mut self) {
        (**self).trigger();
    }

    fn rate(&self) -> i16 {
        (**self).rate()
    }
}

/// Gyroscope axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroAxis {
    /// X axis (roll on most boards)
    X,
    /// Y axis (pitch on most boards)
    Y,
    /// Z axis (yaw / heading for a flat-mounted sensor)
    #[default]
    Z,
}

impl GyroAxis {
    /// Index into an `[x, y, z]` sample
    pub const fn index(self) -> usize {
        match self {
            GyroAxis::X => 0,
            GyroAxis::Y => 1,
            GyroAxis::Z => 2,
        }
    }

    /// Axis from its sample index (0 = X, 1 = Y, 2 = Z)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(GyroAxis::X),
            1 => Some(GyroAxis::Y),
            2 => Some(GyroAxis::Z),
            _ => None,
        }
    }
}

/// Raw 3-axis gyroscope without on-chip fusion
///
/// Mirrors the shape of typical IMU drivers: one call latches a new sample
/// into the driver, another exposes the last latched counts.
pub trait TriAxisGyro {
    /// Read a new sample from the sensor
    fn trigger(&mut self);

    /// Last sample as raw `[x, y, z]` counts
    fn gyro(&self) -> [i16; 3];
}

/// Adapter exposing one axis of a [`TriAxisGyro`] as a [`RateSource`]
#[derive(Debug)]
pub struct AxisRate<G> {
    gyro: G,
    axis: GyroAxis,
}

impl<G: TriAxisGyro> AxisRate<G> {
    /// Track `axis` of `gyro`
    pub fn new(gyro: G, axis: GyroAxis) -> Self {
        Self { gyro, axis }
    }

    /// Tracked axis
    pub fn axis(&self) -> GyroAxis {
        self.axis
    }

    /// Borrow the wrapped driver
    pub fn inner(&self) -> &G {
        &self.gyro
    }

    /// Mutably borrow the wrapped driver (register setup, etc.)
    pub fn inner_mut(&mut self) -> &mut G {
        &mut self.gyro
    }

    /// Release the wrapped driver
    pub fn into_inner(self) -> G {
        self.gyro
    }
}

impl<G: TriAxisGyro> RateSource for AxisRate<G> {
    fn trigger(&mut self) {
        self.gyro.trigger();
    }

    fn rate(&self) -> i16 {
        self.gyro.gyro()[self.axis.index()]
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Capacity of the scripted sample queue in [`MockRateSource`]
pub const MOCK_QUEUE_LEN: usize = 32;

/// Scripted rate source for tests
///
/// Each trigger pops the next queued sample if one is pending; otherwise the
/// current value is held, which models a stationary or constant-rate sensor.
#[derive(Debug)]
pub struct MockRateSource {
    current: i16,
    queue: Deque<i16, MOCK_QUEUE_LEN>,
    triggers: u32,
}

impl MockRateSource {
    /// Source that reports `rate` on every sample
    pub fn constant(rate: i16) -> Self {
        Self {
            current: rate,
            queue: Deque::new(),
            triggers: 0,
        }
    }

    /// Source that replays `samples` in order, then holds the last one
    ///
    /// Samples beyond [`MOCK_QUEUE_LEN`] are dropped.
    pub fn sequence(samples: &[i16]) -> Self {
        let mut source = Self::constant(0);
        for &sample in samples {
            if source.queue.push_back(sample).is_err() {
                break;
            }
        }
        source
    }

    /// Replace the held value and discard queued samples
    pub fn set_rate(&mut self, rate: i16) {
        self.queue.clear();
        self.current = rate;
    }

    /// Queue one more sample; returns `false` when the queue is full
    pub fn push(&mut self, rate: i16) -> bool {
        self.queue.push_back(rate).is_ok()
    }

    /// Number of times `trigger` was called
    pub fn trigger_count(&self) -> u32 {
        self.triggers
    }
}

impl Default for MockRateSource {
    fn default() -> Self {
        Self::constant(0)
    }
}

impl RateSource for MockRateSource {
    fn trigger(&mut self) {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        self.triggers += 1;
    }

    fn rate(&self) -> i16 {
        self.current
    }
}
