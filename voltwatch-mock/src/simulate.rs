use rand::Rng;
use voltwatch_api::models::SensorReading;

// Solar output is high from 06:00 until 18:59
const DAYLIGHT_HOURS: std::ops::RangeInclusive<u8> = 6..=18;

pub fn simulated_production<R: Rng + ?Sized>(hour: u8, rng: &mut R) -> f64 {
    if DAYLIGHT_HOURS.contains(&hour) {
        rng.random_range(50.0..=100.0)
    } else {
        rng.random_range(0.0..=10.0)
    }
}

/// Line voltage around 220 V with occasional excursions.
///
/// Out of 100 rolls: 1 critical high, 2 high, 2 critical low, 5 low, the rest
/// within 215-225 V.
pub fn simulated_voltage<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    voltage_for_roll(rng.random_range(1..=100), rng)
}

fn voltage_for_roll<R: Rng + ?Sized>(roll: u8, rng: &mut R) -> f64 {
    match roll {
        0..=1 => rng.random_range(250.0..=260.0),
        2..=3 => rng.random_range(240.0..=250.0),
        4..=5 => rng.random_range(180.0..=190.0),
        6..=10 => rng.random_range(190.0..=200.0),
        _ => rng.random_range(215.0..=225.0),
    }
}

pub fn simulated_reading<R: Rng + ?Sized>(hour: u8, rng: &mut R) -> SensorReading {
    SensorReading {
        energy_produced: simulated_production(hour, rng),
        energy_consumed: rng.random_range(30.0..=80.0),
        current_load: rng.random_range(20.0..=60.0),
        voltage: Some(simulated_voltage(rng)),
        current: Some(rng.random_range(5.0..=20.0)),
        frequency: Some(rng.random_range(49.8..=50.2)),
        power_factor: Some(rng.random_range(0.8..=1.0)),
        ..Default::default()
    }
}
