//! Stationary gyro bias estimation
//!
//! A stationary gyro still reports a small non-zero rate. Averaging a burst of
//! samples taken at rest gives the bias that is subtracted from every later
//! reading. Drift after calibration is not tracked.

/// Calibration state of a turn sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// No bias measured yet; readings are integrated with a zero bias
    #[default]
    Uncalibrated,
    /// Bias measured (or restored from storage)
    Calibrated,
}

/// Result of a bias measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateCalibration {
    /// Average stationary rate (raw counts)
    pub bias: i16,
    /// Number of samples averaged; 0 when the bias was restored rather than measured
    pub sample_count: u16,
}

/// Estimate gyro bias from stationary samples
///
/// Sums in `i64` and truncates the mean toward zero, matching integer
/// division on the sum. Returns `None` for an empty slice.
///
/// # Example
///
/// ```
/// use turn_sensor::estimate_rate_bias;
///
/// assert_eq!(estimate_rate_bias(&[4, 5, 6, 5]), Some(5));
/// assert_eq!(estimate_rate_bias(&[]), None);
/// ```
pub fn estimate_rate_bias(samples: &[i16]) -> Option<i16> {
    if samples.is_empty() {
        return None;
    }

    let sum: i64 = samples.iter().map(|&s| i64::from(s)).sum();
    Some(average(sum, samples.len() as i64))
}

/// Truncating mean of `count` i16 samples summing to `sum`
///
/// The mean of i16 values always fits in i16.
pub(crate) fn average(sum: i64, count: i64) -> i16 {
    (sum / count) as i16
}
