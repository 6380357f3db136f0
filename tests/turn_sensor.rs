//! End-to-end turn sensor scenarios on the host.

use embedded_hal::delay::DelayNs;
use turn_sensor::parameters::{ParamValue, ParameterStore};
use turn_sensor::traits::{MockClock, MockDelay, MockRateSource};
use turn_sensor::{
    AxisRate, CalibrationState, Clock, GyroAxis, GyroFullScale, TriAxisGyro, TurnSensor,
    TurnSensorError, TurnSensorParams,
};

/// Simulated 3-axis gyro: constant bias on every axis plus a commanded yaw rate.
struct SimGyro {
    bias: [i16; 3],
    yaw_rate: i16,
    latched: [i16; 3],
    reads: u32,
}

impl SimGyro {
    fn new(bias: [i16; 3]) -> Self {
        Self {
            bias,
            yaw_rate: 0,
            latched: [0; 3],
            reads: 0,
        }
    }
}

impl TriAxisGyro for SimGyro {
    fn trigger(&mut self) {
        self.latched = [
            self.bias[0],
            self.bias[1],
            self.bias[2].saturating_add(self.yaw_rate),
        ];
        self.reads += 1;
    }

    fn gyro(&self) -> [i16; 3] {
        self.latched
    }
}

#[test]
fn stationary_calibration_then_turn() {
    let clock = MockClock::new();
    let mut sensor = TurnSensor::new(MockRateSource::constant(5), &clock);
    sensor.set_full_scale_dps(245);

    let mut delay = MockDelay::linked(&clock);
    assert_eq!(sensor.calibrate(10, &mut delay), Ok(5));
    assert_eq!(sensor.state(), CalibrationState::Calibrated);
    assert_eq!(clock.now_ms(), 100);

    // First read establishes the timestamp
    assert_eq!(sensor.angle(), 0);

    clock.advance(10);
    // (5 - 5) * 10 * 245 / 32767 = 0
    assert_eq!(sensor.angle(), 0);

    sensor.rate_source_mut().set_rate(3280);
    clock.advance(100);
    // (3280 - 5) * 100 * 245 / 32767 = 2448.7 -> 2448
    assert_eq!(sensor.angle(), 2448);
}

#[test]
fn ninety_degree_turn_about_z() {
    let clock = MockClock::new();
    let gyro = SimGyro::new([12, -8, 21]);
    let mut sensor = TurnSensor::new(AxisRate::new(gyro, GyroAxis::Z), &clock);
    sensor.set_full_scale(GyroFullScale::Dps2000);

    let mut delay = MockDelay::linked(&clock);
    assert_eq!(sensor.calibrate(50, &mut delay), Ok(21));

    sensor.prime();
    // Hold still for a while: no drift with a perfect bias estimate
    for _ in 0..10 {
        clock.advance(20);
        sensor.angle();
    }
    assert_eq!(sensor.angle_mdeg(), 0);

    // ~90 °/s for one second
    sensor.rate_source_mut().inner_mut().yaw_rate = 1474;
    for _ in 0..10 {
        clock.advance(100);
        sensor.angle();
    }
    let angle = sensor.angle_mdeg();
    assert_eq!(angle, 10 * 8996);
    assert!((angle - 90_000).abs() < 100, "angle {}", angle);

    // Reset before the next maneuver, then turn back the other way
    sensor.reset_angle();
    sensor.rate_source_mut().inner_mut().yaw_rate = -1474;
    for _ in 0..5 {
        clock.advance(100);
        sensor.angle();
    }
    assert_eq!(sensor.angle_mdeg(), -5 * 8996);

    let (axis_rate, _) = sensor.release();
    // 50 calibration samples plus 25 integration steps
    assert_eq!(axis_rate.into_inner().reads, 50 + 25);
}

#[test]
fn uncalibrated_sensor_integrates_bias() {
    let clock = MockClock::new();
    let mut sensor = TurnSensor::new(MockRateSource::constant(100), &clock);
    sensor.set_full_scale(GyroFullScale::Dps245);
    sensor.prime();

    clock.advance(1000);
    // 100 * 1000 * 245 / 32767 = 747.7 -> 747 mdeg of false rotation
    assert_eq!(sensor.angle(), 747);
    assert_eq!(sensor.state(), CalibrationState::Uncalibrated);
}

#[test]
fn calibration_persists_through_parameter_store() {
    let mut store = ParameterStore::new();
    TurnSensorParams::register_defaults(&mut store).unwrap();
    store.set("TURN_FS_DPS", ParamValue::Int(500)).unwrap();
    store.set("TURN_CAL_PTS", ParamValue::Int(20)).unwrap();

    // First boot: measure and persist
    let clock = MockClock::new();
    let config = TurnSensorParams::from_store(&store).to_config();
    assert_eq!(config.bias, None);
    let mut sensor = TurnSensor::with_config(MockRateSource::constant(-33), &clock, &config);
    let mut delay = MockDelay::new();
    assert_eq!(sensor.run_calibration(&mut delay), Ok(-33));
    assert_eq!(delay.total_ms(), 200);

    let calibration = sensor.last_calibration().unwrap();
    store.clear_dirty();
    TurnSensorParams::store_calibration(&mut store, &calibration).unwrap();
    assert!(store.is_dirty());

    // Second boot: restore without recalibrating
    let config = TurnSensorParams::from_store(&store).to_config();
    let mut restored = TurnSensor::with_config(MockRateSource::constant(-33), &clock, &config);
    assert_eq!(restored.bias(), -33);
    assert_eq!(restored.full_scale_dps(), 500);
    assert_eq!(restored.state(), CalibrationState::Calibrated);

    restored.prime();
    clock.advance(500);
    assert_eq!(restored.angle(), 0);
}

#[test]
fn checked_operations_report_contract_violations() {
    let clock = MockClock::new();
    let mut sensor = TurnSensor::new(MockRateSource::constant(1), &clock);
    let mut delay = MockDelay::new();

    assert_eq!(
        sensor.calibrate(0, &mut delay),
        Err(TurnSensorError::ZeroSampleCount)
    );
    assert_eq!(sensor.try_angle(), Err(TurnSensorError::FullScaleNotSet));

    sensor.set_full_scale(GyroFullScale::Dps125);
    assert_eq!(sensor.try_angle(), Ok(0));
}

#[test]
fn long_poll_interval_does_not_overflow() {
    let clock = MockClock::new();
    let mut sensor = TurnSensor::new(MockRateSource::constant(i16::MAX), &clock);
    sensor.set_full_scale(GyroFullScale::Dps2000);
    sensor.set_bias(i16::MIN);
    sensor.prime();

    // One full minute between reads with a worst-case corrected rate
    clock.advance(60_000);
    let expected = (65_535i64 * 60_000 * 2000 / 32_767) as i32;
    assert_eq!(sensor.angle(), expected);
}

#[test]
fn mock_delay_is_a_delay_ns() {
    fn wait<D: DelayNs>(delay: &mut D) {
        delay.delay_ms(3);
    }

    let clock = MockClock::new();
    let mut delay = MockDelay::linked(&clock);
    wait(&mut delay);
    assert_eq!(clock.now_ms(), 3);
}
