//! Gyro full-scale settings and the fixed-point integration step
//!
//! Raw gyro output spans `±RATE_FULL_SCALE_COUNTS` for `±full_scale_dps`.
//! Angles are kept in milli-degrees, so one integration step is
//!
//! ```text
//! delta_mdeg = rate_counts * dt_ms * full_scale_dps / 32767
//! ```
//!
//! (the `1000` from milli-degrees cancels against milliseconds).

/// Raw count corresponding to the positive full-scale rate of a 16-bit gyro
pub const RATE_FULL_SCALE_COUNTS: i32 = 32767;

/// Gyro full-scale range (LSM6-family `FS_G` settings)
///
/// Must match what the sensor's control register is programmed to; a mismatch
/// silently scales every angle by the ratio of the two ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±125 °/s
    Dps125,
    /// ±245 °/s (power-on default on LSM6DS33)
    #[default]
    Dps245,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s
    Dps2000,
}

impl GyroFullScale {
    /// Full-scale rate in degrees per second
    pub const fn dps(self) -> u16 {
        match self {
            GyroFullScale::Dps125 => 125,
            GyroFullScale::Dps245 => 245,
            GyroFullScale::Dps500 => 500,
            GyroFullScale::Dps1000 => 1000,
            GyroFullScale::Dps2000 => 2000,
        }
    }

    /// Setting for an exact dps value
    ///
    /// Returns `None` for values that are not a supported range. Callers
    /// with a custom or trimmed sensitivity use
    /// [`TurnSensor::set_full_scale_dps`](crate::TurnSensor::set_full_scale_dps)
    /// directly.
    pub const fn from_dps(dps: u16) -> Option<Self> {
        match dps {
            125 => Some(GyroFullScale::Dps125),
            245 => Some(GyroFullScale::Dps245),
            500 => Some(GyroFullScale::Dps500),
            1000 => Some(GyroFullScale::Dps1000),
            2000 => Some(GyroFullScale::Dps2000),
            _ => None,
        }
    }
}

/// Angle increment in milli-degrees for `rate_counts` held over `dt_ms`
///
/// The product is formed in `i128`, which holds the worst case
/// (`2^17 * 2^32 * 2^16`) with room to spare. Division truncates toward
/// zero. The result is narrowed to `i32` with wrapping, matching the
/// wrapping accumulator it is added to.
pub fn delta_millidegrees(rate_counts: i32, dt_ms: u32, full_scale_dps: u16) -> i32 {
    let product = i128::from(rate_counts) * i128::from(dt_ms) * i128::from(full_scale_dps);
    (product / i128::from(RATE_FULL_SCALE_COUNTS)) as i32
}

/// Convert a raw rate to milli-degrees per second
pub fn counts_to_mdps(rate_counts: i32, full_scale_dps: u16) -> i32 {
    delta_millidegrees(rate_counts, 1000, full_scale_dps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_dps_values() {
        assert_eq!(GyroFullScale::Dps125.dps(), 125);
        assert_eq!(GyroFullScale::Dps245.dps(), 245);
        assert_eq!(GyroFullScale::Dps500.dps(), 500);
        assert_eq!(GyroFullScale::Dps1000.dps(), 1000);
        assert_eq!(GyroFullScale::Dps2000.dps(), 2000);
        assert_eq!(GyroFullScale::default(), GyroFullScale::Dps245);
    }

    #[test]
    fn test_from_dps() {
        assert_eq!(GyroFullScale::from_dps(500), Some(GyroFullScale::Dps500));
        assert_eq!(GyroFullScale::from_dps(250), None);
        assert_eq!(GyroFullScale::from_dps(0), None);
    }

    #[test]
    fn test_delta_zero_rate() {
        assert_eq!(delta_millidegrees(0, 10, 245), 0);
        assert_eq!(delta_millidegrees(100, 0, 245), 0);
        assert_eq!(delta_millidegrees(100, 10, 0), 0);
    }

    #[test]
    fn test_delta_known_value() {
        // (3280 - 5) * 100 * 245 / 32767 = 80_237_500 / 32767 = 2448.7...
        assert_eq!(delta_millidegrees(3275, 100, 245), 2448);
    }

    #[test]
    fn test_delta_full_scale_one_second() {
        // Full-scale counts for one second is exactly full_scale degrees
        assert_eq!(delta_millidegrees(32767, 1000, 2000), 2_000_000);
        assert_eq!(delta_millidegrees(-32767, 1000, 2000), -2_000_000);
    }

    #[test]
    fn test_delta_truncates_toward_zero() {
        // 1 * 10 * 245 / 32767 = 0.07 -> 0 in both directions
        assert_eq!(delta_millidegrees(1, 10, 245), 0);
        assert_eq!(delta_millidegrees(-1, 10, 245), 0);
        // -3275 * 100 * 245 / 32767 = -2448.7 -> -2448
        assert_eq!(delta_millidegrees(-3275, 100, 245), -2448);
    }

    #[test]
    fn test_delta_no_intermediate_overflow() {
        // Product exceeds i64 range but still fits i128
        let rate = -65535;
        let dt = u32::MAX;
        let fs = u16::MAX;
        let expected = (rate as i128 * dt as i128 * fs as i128 / 32767) as i32;
        assert_eq!(delta_millidegrees(rate, dt, fs), expected);
    }

    #[test]
    fn test_counts_to_mdps() {
        assert_eq!(counts_to_mdps(32767, 245), 245_000);
        assert_eq!(counts_to_mdps(0, 245), 0);
    }
}
