//! Collaborator traits for the turn integrator.
//!
//! The integrator never talks to hardware directly. The sample source and the
//! millisecond clock are injected through these traits.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Bus drivers and register setup live with the caller

pub mod delay;
pub mod rate;
pub mod time;

pub use delay::MockDelay;
pub use rate::{AxisRate, GyroAxis, MockRateSource, RateSource, TriAxisGyro, MOCK_QUEUE_LEN};
pub use time::{Clock, MockClock};
