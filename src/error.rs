//! Turn sensor error types
//!
//! Only the checked entry points return these. The unchecked fast path
//! (`TurnSensor::angle`) treats a missing full scale as a caller contract.

use core::fmt;

/// Errors from checked turn sensor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnSensorError {
    /// Calibration requested with zero samples
    ZeroSampleCount,
    /// Angle requested before the gyro full scale was configured
    FullScaleNotSet,
}

impl TurnSensorError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnSensorError::ZeroSampleCount => "ZeroSampleCount",
            TurnSensorError::FullScaleNotSet => "FullScaleNotSet",
        }
    }
}

impl fmt::Display for TurnSensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnSensorError::ZeroSampleCount => {
                write!(f, "calibration requires at least one sample")
            }
            TurnSensorError::FullScaleNotSet => write!(f, "gyro full scale not set"),
        }
    }
}
