//! Heuristic adjustment of the historical base rate

use crate::conditions::WeatherReading;
use crate::constants::prediction::MIN_FACTOR;

/// Water below this temperature (°C) keeps people away
const COLD_WATER_CELSIUS: f64 = 10.0;

/// Below this level (cm) the wave is weak
const LOW_WATER_LEVEL: f64 = 140.0;

/// Above this level (cm) the wave is at its best
const HIGH_WATER_LEVEL: f64 = 145.0;

/// Night hours: 22:00-05:59
pub fn is_night(hour: u32) -> bool {
    hour >= 22 || hour <= 5
}

fn hour_term(hour: u32) -> f64 {
    match hour {
        6..=8 => 0.3,
        12..=14 => 0.2,
        h if is_night(h) => -0.4,
        _ => 0.0,
    }
}

/// Multiplier applied to the base rate, never below 0.5.
///
/// `water_flow` is accepted but does not yet influence the result.
pub fn compute_factor(
    hour: u32,
    water_temp: Option<f64>,
    weather: &WeatherReading,
    water_level: f64,
    _water_flow: f64,
) -> f64 {
    let mut factor = 1.0 + hour_term(hour);

    if matches!(water_temp, Some(t) if t < COLD_WATER_CELSIUS) {
        factor -= 0.2;
    }

    if weather.condition().is_precipitation() {
        factor -= 0.3;
    }

    if water_level < LOW_WATER_LEVEL {
        factor -= 0.3;
    } else if water_level > HIGH_WATER_LEVEL {
        factor += 0.2;
    }

    factor.max(MIN_FACTOR)
}
