#![cfg_attr(not(test), no_std)]

//! turn_sensor - Relative turn angle from a single gyro axis
//!
//! Integrates raw angular rate samples over time into an accumulated angle
//! in milli-degrees, after subtracting a bias measured while stationary.
//! Intended for small embedded controllers polling an IMU at a fixed cadence.
//!
//! # Modules
//!
//! - [`traits`]: Collaborator abstractions (Clock, RateSource) and mocks
//! - [`scale`]: Full-scale settings and the integer integration step
//! - [`calibration`]: Stationary bias estimation
//! - [`integrator`]: The `TurnSensor` itself
//! - [`parameters`]: Parameter store and turn sensor configuration
//! - [`error`]: Error types for checked operations
//!
//! # Example
//!
//! ```
//! use turn_sensor::traits::{MockClock, MockDelay, MockRateSource};
//! use turn_sensor::{GyroFullScale, TurnSensor};
//!
//! let clock = MockClock::new();
//! let mut sensor = TurnSensor::new(MockRateSource::constant(5), &clock);
//! sensor.set_full_scale(GyroFullScale::Dps245);
//!
//! let mut delay = MockDelay::new();
//! assert_eq!(sensor.calibrate(10, &mut delay), Ok(5));
//!
//! sensor.prime();
//! clock.advance(100);
//! sensor.rate_source_mut().set_rate(3280);
//! assert_eq!(sensor.angle(), 2448);
//! ```
//!
//! Accuracy degrades over long windows: bias drift is not tracked after
//! calibration, so reset the angle before each maneuver that needs it.

pub mod logging;

pub mod calibration;
pub mod error;
pub mod integrator;
pub mod parameters;
pub mod scale;
pub mod traits;

pub use calibration::{estimate_rate_bias, CalibrationState, RateCalibration};
pub use error::TurnSensorError;
pub use integrator::{TurnSensor, CALIBRATION_INTERVAL_MS};
pub use parameters::{TurnSensorConfig, TurnSensorParams};
pub use scale::{delta_millidegrees, GyroFullScale, RATE_FULL_SCALE_COUNTS};
pub use traits::{AxisRate, Clock, GyroAxis, RateSource, TriAxisGyro};
