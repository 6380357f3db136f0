//! Turn Sensor Parameter Definitions
//!
//! # Parameters
//!
//! - `TURN_FS_DPS` - Gyro full scale in °/s, must match the sensor register
//! - `TURN_CAL_PTS` - Samples averaged by calibration
//! - `TURN_CAL_MS` - Delay between calibration samples (ms)
//! - `TURN_AXIS` - Tracked gyro axis (0 = X, 1 = Y, 2 = Z)
//! - `TURN_GYR_OFS` - Persisted stationary bias (raw counts)
//! - `TURN_GYR_CAL` - Whether `TURN_GYR_OFS` holds a measured bias

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::calibration::RateCalibration;
use crate::traits::GyroAxis;

pub const PARAM_FULL_SCALE: &str = "TURN_FS_DPS";
pub const PARAM_CAL_SAMPLES: &str = "TURN_CAL_PTS";
pub const PARAM_CAL_INTERVAL: &str = "TURN_CAL_MS";
pub const PARAM_AXIS: &str = "TURN_AXIS";
pub const PARAM_GYRO_BIAS: &str = "TURN_GYR_OFS";
pub const PARAM_GYRO_CALIBRATED: &str = "TURN_GYR_CAL";

// --- Defaults ---

const DEFAULT_FULL_SCALE_DPS: u16 = 245;
const DEFAULT_CAL_SAMPLES: u16 = 100;
const DEFAULT_CAL_INTERVAL_MS: u32 = 10;
const DEFAULT_AXIS: GyroAxis = GyroAxis::Z;

// --- Ranges ---

const MIN_FULL_SCALE_DPS: i32 = 125;
const MAX_FULL_SCALE_DPS: i32 = 2000;

const MIN_CAL_SAMPLES: i32 = 1;
const MAX_CAL_SAMPLES: i32 = 10_000;

const MIN_CAL_INTERVAL_MS: i32 = 1;
const MAX_CAL_INTERVAL_MS: i32 = 1_000;

/// Settings consumed by [`TurnSensor::with_config`](crate::TurnSensor::with_config)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSensorConfig {
    /// Gyro full scale (°/s)
    pub full_scale_dps: u16,
    /// Samples averaged by calibration
    pub calibration_samples: u16,
    /// Delay between calibration samples (ms)
    pub calibration_interval_ms: u32,
    /// Tracked gyro axis
    pub axis: GyroAxis,
    /// Previously measured bias to restore, if any
    pub bias: Option<i16>,
}

impl Default for TurnSensorConfig {
    fn default() -> Self {
        Self {
            full_scale_dps: DEFAULT_FULL_SCALE_DPS,
            calibration_samples: DEFAULT_CAL_SAMPLES,
            calibration_interval_ms: DEFAULT_CAL_INTERVAL_MS,
            axis: DEFAULT_AXIS,
            bias: None,
        }
    }
}

/// Turn sensor parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSensorParams {
    /// Gyro full scale (°/s)
    pub full_scale_dps: u16,
    /// Samples averaged by calibration
    pub calibration_samples: u16,
    /// Delay between calibration samples (ms)
    pub calibration_interval_ms: u32,
    /// Tracked gyro axis
    pub axis: GyroAxis,
    /// Persisted bias (raw counts)
    pub gyro_bias: i16,
    /// `gyro_bias` holds a measured value
    pub gyro_calibrated: bool,
}

impl Default for TurnSensorParams {
    fn default() -> Self {
        Self {
            full_scale_dps: DEFAULT_FULL_SCALE_DPS,
            calibration_samples: DEFAULT_CAL_SAMPLES,
            calibration_interval_ms: DEFAULT_CAL_INTERVAL_MS,
            axis: DEFAULT_AXIS,
            gyro_bias: 0,
            gyro_calibrated: false,
        }
    }
}

impl TurnSensorParams {
    /// Register turn sensor parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            PARAM_FULL_SCALE,
            ParamValue::Int(i32::from(DEFAULT_FULL_SCALE_DPS)),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_CAL_SAMPLES,
            ParamValue::Int(i32::from(DEFAULT_CAL_SAMPLES)),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_CAL_INTERVAL,
            ParamValue::Int(DEFAULT_CAL_INTERVAL_MS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_AXIS,
            ParamValue::Int(DEFAULT_AXIS.index() as i32),
            ParamFlags::empty(),
        )?;
        store.register(PARAM_GYRO_BIAS, ParamValue::Int(0), ParamFlags::empty())?;
        store.register(
            PARAM_GYRO_CALIBRATED,
            ParamValue::Bool(false),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load turn sensor parameters from parameter store
    ///
    /// Out-of-range values are clamped; missing or mistyped entries fall back
    /// to defaults. An unknown axis index falls back to Z.
    pub fn from_store(store: &ParameterStore) -> Self {
        let axis = match store.get(PARAM_AXIS) {
            Some(ParamValue::Int(v)) => u8::try_from(*v)
                .ok()
                .and_then(GyroAxis::from_index)
                .unwrap_or(DEFAULT_AXIS),
            _ => DEFAULT_AXIS,
        };

        let gyro_calibrated = match store.get(PARAM_GYRO_CALIBRATED) {
            Some(ParamValue::Bool(v)) => *v,
            _ => false,
        };

        Self {
            full_scale_dps: load_int(
                store,
                PARAM_FULL_SCALE,
                i32::from(DEFAULT_FULL_SCALE_DPS),
                MIN_FULL_SCALE_DPS,
                MAX_FULL_SCALE_DPS,
            ) as u16,
            calibration_samples: load_int(
                store,
                PARAM_CAL_SAMPLES,
                i32::from(DEFAULT_CAL_SAMPLES),
                MIN_CAL_SAMPLES,
                MAX_CAL_SAMPLES,
            ) as u16,
            calibration_interval_ms: load_int(
                store,
                PARAM_CAL_INTERVAL,
                DEFAULT_CAL_INTERVAL_MS as i32,
                MIN_CAL_INTERVAL_MS,
                MAX_CAL_INTERVAL_MS,
            ) as u32,
            axis,
            gyro_bias: load_int(
                store,
                PARAM_GYRO_BIAS,
                0,
                i32::from(i16::MIN),
                i32::from(i16::MAX),
            ) as i16,
            gyro_calibrated,
        }
    }

    /// Persist a measured bias
    ///
    /// Marks the store dirty so the firmware writes it back to Flash.
    pub fn store_calibration(
        store: &mut ParameterStore,
        calibration: &RateCalibration,
    ) -> Result<(), ParameterError> {
        store.set(PARAM_GYRO_BIAS, ParamValue::Int(i32::from(calibration.bias)))?;
        store.set(PARAM_GYRO_CALIBRATED, ParamValue::Bool(true))
    }

    /// Convert to the configuration consumed by the integrator
    pub fn to_config(&self) -> TurnSensorConfig {
        TurnSensorConfig {
            full_scale_dps: self.full_scale_dps,
            calibration_samples: self.calibration_samples,
            calibration_interval_ms: self.calibration_interval_ms,
            axis: self.axis,
            bias: self.gyro_calibrated.then_some(self.gyro_bias),
        }
    }

    /// Validate turn sensor parameters
    pub fn is_valid(&self) -> bool {
        let fs = i32::from(self.full_scale_dps);
        if !(MIN_FULL_SCALE_DPS..=MAX_FULL_SCALE_DPS).contains(&fs) {
            return false;
        }
        let samples = i32::from(self.calibration_samples);
        if !(MIN_CAL_SAMPLES..=MAX_CAL_SAMPLES).contains(&samples) {
            return false;
        }
        let interval = self.calibration_interval_ms as i64;
        interval >= i64::from(MIN_CAL_INTERVAL_MS) && interval <= i64::from(MAX_CAL_INTERVAL_MS)
    }
}

fn load_int(store: &ParameterStore, name: &str, default: i32, min: i32, max: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).clamp(min, max),
        Some(ParamValue::Float(v)) => (*v as i32).clamp(min, max),
        _ => default,
    }
}
