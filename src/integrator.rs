//! Single-axis turn integrator
//!
//! Integrates raw gyro rate about one axis into a relative angle in
//! milli-degrees:
//!
//! ```text
//! angle += (rate - bias) * dt_ms * full_scale_dps / 32767
//! ```
//!
//! The angle is relative to construction or the last [`TurnSensor::reset_angle`]
//! and is never normalized, so multiple turns keep accumulating. Bias drift
//! after calibration is not corrected, which limits accuracy to short windows.
//!
//! # Concurrency
//!
//! All operations are synchronous and take `&mut self`. A host sharing one
//! sensor between tasks must serialize access itself (mutex, single control
//! loop, etc.).

use embedded_hal::delay::DelayNs;

use crate::calibration::{average, CalibrationState, RateCalibration};
use crate::error::TurnSensorError;
use crate::parameters::TurnSensorConfig;
use crate::scale::{delta_millidegrees, GyroFullScale};
use crate::traits::{Clock, RateSource};

/// Delay between calibration samples (ms), matching a ~100 Hz output data rate
pub const CALIBRATION_INTERVAL_MS: u32 = 10;

/// Relative turn angle sensor built on a gyro rate source
///
/// # Lifecycle
///
/// 1. Construct and set the full scale to match the sensor configuration
/// 2. Hold the sensor still and run [`calibrate`](Self::calibrate)
/// 3. Call [`angle`](Self::angle) from the control loop at a steady rate
///
/// The first [`angle`](Self::angle) call after construction has no previous
/// timestamp, so it only records the time and integrates nothing. Call
/// [`prime`](Self::prime) right before the loop starts to skip that step.
#[derive(Debug)]
pub struct TurnSensor<R, C> {
    rate_source: R,
    clock: C,
    /// Accumulated angle (milli-degrees), wraps on overflow
    angle_mdeg: i32,
    /// Gyro full scale (°/s); 0 until configured
    full_scale_dps: u16,
    /// Time of the previous integration step
    last_sample_ms: Option<u32>,
    /// Stationary rate subtracted from every reading (raw counts)
    bias: i16,
    state: CalibrationState,
    last_calibration: Option<RateCalibration>,
    calibration_samples: u16,
    calibration_interval_ms: u32,
}

impl<R: RateSource, C: Clock> TurnSensor<R, C> {
    /// Create an uncalibrated sensor
    ///
    /// The full scale starts unset (0); until [`set_full_scale_dps`](Self::set_full_scale_dps)
    /// is called every increment is zero.
    pub fn new(rate_source: R, clock: C) -> Self {
        let defaults = TurnSensorConfig::default();
        Self {
            rate_source,
            clock,
            angle_mdeg: 0,
            full_scale_dps: 0,
            last_sample_ms: None,
            bias: 0,
            state: CalibrationState::Uncalibrated,
            last_calibration: None,
            calibration_samples: defaults.calibration_samples,
            calibration_interval_ms: defaults.calibration_interval_ms,
        }
    }

    /// Create a sensor from stored settings
    ///
    /// Applies the full scale and calibration settings, and restores the bias
    /// when the config carries one. `config.axis` is for the caller building
    /// the rate source (see [`AxisRate`](crate::traits::AxisRate)).
    pub fn with_config(rate_source: R, clock: C, config: &TurnSensorConfig) -> Self {
        let mut sensor = Self::new(rate_source, clock);
        sensor.full_scale_dps = config.full_scale_dps;
        sensor.calibration_samples = config.calibration_samples;
        sensor.calibration_interval_ms = config.calibration_interval_ms;
        if let Some(bias) = config.bias {
            sensor.set_bias(bias);
        }
        sensor
    }

    /// Measure the stationary bias
    ///
    /// Takes `samples` readings [`CALIBRATION_INTERVAL_MS`] apart and stores
    /// their truncated average as the bias. Blocks for roughly
    /// `samples * 10` ms and cannot be interrupted. The sensor must not
    /// rotate meanwhile. The angle and the integration timestamp are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`TurnSensorError::ZeroSampleCount`] if `samples` is 0; the previous
    /// bias is kept.
    pub fn calibrate<D: DelayNs>(
        &mut self,
        samples: u16,
        delay: &mut D,
    ) -> Result<i16, TurnSensorError> {
        self.calibrate_with_interval(samples, CALIBRATION_INTERVAL_MS, delay)
    }

    /// Measure the stationary bias with a custom sample spacing
    ///
    /// Same as [`calibrate`](Self::calibrate) for sensors running at an output
    /// data rate other than ~100 Hz.
    pub fn calibrate_with_interval<D: DelayNs>(
        &mut self,
        samples: u16,
        interval_ms: u32,
        delay: &mut D,
    ) -> Result<i16, TurnSensorError> {
        if samples == 0 {
            crate::log_warn!("Turn sensor calibration rejected: zero samples");
            return Err(TurnSensorError::ZeroSampleCount);
        }

        let mut sum: i64 = 0;
        for _ in 0..samples {
            sum += i64::from(self.rate_source.read_rate());
            delay.delay_ms(interval_ms);
        }

        let bias = average(sum, i64::from(samples));
        self.bias = bias;
        self.state = CalibrationState::Calibrated;
        self.last_calibration = Some(RateCalibration {
            bias,
            sample_count: samples,
        });

        crate::log_debug!(
            "Turn sensor calibrated: bias {} counts from {} samples",
            bias,
            samples
        );
        Ok(bias)
    }

    /// Measure the stationary bias using the configured sample count and spacing
    pub fn run_calibration<D: DelayNs>(&mut self, delay: &mut D) -> Result<i16, TurnSensorError> {
        self.calibrate_with_interval(
            self.calibration_samples,
            self.calibration_interval_ms,
            delay,
        )
    }

    /// Integrate one step and return the accumulated angle (milli-degrees)
    ///
    /// Reads the clock, triggers a fresh gyro sample and adds
    /// `(rate - bias) * dt * full_scale / 32767` to the angle, where `dt` is
    /// the time since the previous call. Elapsed time survives one clock
    /// rollover. The accumulator wraps on overflow.
    pub fn angle(&mut self) -> i32 {
        let now = self.clock.now_ms();
        let dt_ms = match self.last_sample_ms.replace(now) {
            Some(last) => now.wrapping_sub(last),
            None => {
                crate::log_debug!("Turn sensor timestamp primed at {} ms", now);
                0
            }
        };

        let rate = self.rate_source.read_rate();
        let corrected = i32::from(rate) - i32::from(self.bias);

        let delta = delta_millidegrees(corrected, dt_ms, self.full_scale_dps);
        self.angle_mdeg = self.angle_mdeg.wrapping_add(delta);
        self.angle_mdeg
    }

    /// Checked variant of [`angle`](Self::angle)
    ///
    /// # Errors
    ///
    /// [`TurnSensorError::FullScaleNotSet`] if the full scale is still 0. The
    /// gyro is not read and no state changes.
    pub fn try_angle(&mut self) -> Result<i32, TurnSensorError> {
        if self.full_scale_dps == 0 {
            crate::log_warn!("Turn sensor read before full scale was set");
            return Err(TurnSensorError::FullScaleNotSet);
        }
        Ok(self.angle())
    }

    /// Record the current time as the integration start point
    ///
    /// The next [`angle`](Self::angle) call then integrates over the time
    /// since this call. Calling it mid-run drops the elapsed interval.
    pub fn prime(&mut self) {
        self.last_sample_ms = Some(self.clock.now_ms());
    }

    /// Reset the accumulated angle to zero
    ///
    /// Bias, full scale and timestamp are kept, so the next step still
    /// integrates the time since the previous read.
    pub fn reset_angle(&mut self) {
        self.angle_mdeg = 0;
    }

    /// Set the gyro full scale (°/s)
    ///
    /// Not checked against the sensor; it must match the range programmed
    /// into the gyro or every angle is scaled wrong.
    pub fn set_full_scale_dps(&mut self, full_scale_dps: u16) {
        self.full_scale_dps = full_scale_dps;
    }

    /// Set the gyro full scale from a standard range
    pub fn set_full_scale(&mut self, full_scale: GyroFullScale) {
        self.set_full_scale_dps(full_scale.dps());
    }

    /// Restore a previously measured bias (raw counts)
    pub fn set_bias(&mut self, bias: i16) {
        self.bias = bias;
        self.state = CalibrationState::Calibrated;
        self.last_calibration = Some(RateCalibration {
            bias,
            sample_count: 0,
        });
    }

    /// Accumulated angle (milli-degrees) without integrating
    pub fn angle_mdeg(&self) -> i32 {
        self.angle_mdeg
    }

    /// Accumulated angle in degrees without integrating
    pub fn angle_deg(&self) -> f32 {
        self.angle_mdeg as f32 / 1000.0
    }

    /// Current bias (raw counts)
    pub fn bias(&self) -> i16 {
        self.bias
    }

    /// Configured full scale (°/s), 0 if unset
    pub fn full_scale_dps(&self) -> u16 {
        self.full_scale_dps
    }

    /// Calibration state
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Last calibration result, measured or restored
    pub fn last_calibration(&self) -> Option<RateCalibration> {
        self.last_calibration
    }

    /// Time of the previous integration step, `None` before the first one
    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    /// Borrow the rate source
    pub fn rate_source(&self) -> &R {
        &self.rate_source
    }

    /// Mutably borrow the rate source
    pub fn rate_source_mut(&mut self) -> &mut R {
        &mut self.rate_source
    }

    /// Borrow the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Release the collaborators
    pub fn release(self) -> (R, C) {
        (self.rate_source, self.clock)
    }
}
