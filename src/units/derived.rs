//! Derived meteorological quantities.
//!
//! Every calculator has an explicit validity domain. Outside of it the input
//! temperature comes back unchanged, so heat index is never applied in cold
//! conditions and wind chill never in calm or warm ones.

use crate::error::DecodeError;
use crate::models::{QuantityKind, Unit};
use crate::units::convert::convert;

/// Heat index is only defined at or above this air temperature.
pub const HEAT_INDEX_MIN_TEMP_F: f64 = 80.0;
/// Wind chill is only defined at or below this air temperature.
pub const WIND_CHILL_MAX_TEMP_F: f64 = 50.0;
/// Wind chill needs at least this much wind.
pub const WIND_CHILL_MIN_SPEED_MPH: f64 = 3.0;

const MAGNUS_A: f64 = 17.62;
const MAGNUS_B: f64 = 243.12;

/// Dew point in °C from air temperature in °C and relative humidity in %.
///
/// Returns `None` for humidity outside `(0, 100]`.
pub fn dew_point_c(temp_c: f64, humidity: f64) -> Option<f64> {
    if !(humidity > 0.0 && humidity <= 100.0) || !temp_c.is_finite() {
        return None;
    }
    let gamma = (humidity / 100.0).ln() + MAGNUS_A * temp_c / (MAGNUS_B + temp_c);
    Some(MAGNUS_B * gamma / (MAGNUS_A - gamma))
}

/// NWS heat index (Rothfusz regression) in °F.
///
/// # Arguments
///
/// * `temp_f` - Air temperature in °F
/// * `humidity` - Relative humidity in %
///
/// # Returns
///
/// `temp_f` itself below [`HEAT_INDEX_MIN_TEMP_F`], the apparent temperature otherwise
pub fn heat_index_f(temp_f: f64, humidity: f64) -> f64 {
    if temp_f < HEAT_INDEX_MIN_TEMP_F {
        return temp_f;
    }

    let t = temp_f;
    let rh = humidity.clamp(0.0, 100.0);
    let mut index = -42.379 + 2.049_015_23 * t + 10.143_331_27 * rh
        - 0.224_755_41 * t * rh
        - 0.006_837_83 * t * t
        - 0.054_817_17 * rh * rh
        + 0.001_228_74 * t * t * rh
        + 0.000_852_82 * t * rh * rh
        - 0.000_001_99 * t * t * rh * rh;

    if rh < 13.0 && (80.0..=112.0).contains(&t) {
        index -= ((13.0 - rh) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
        index += ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    index
}

pub fn wind_chill_applies(temp_f: f64, wind_mph: f64) -> bool {
    temp_f <= WIND_CHILL_MAX_TEMP_F && wind_mph >= WIND_CHILL_MIN_SPEED_MPH
}

/// NWS 2001 wind chill in °F, or `temp_f` unchanged outside its domain.
pub fn wind_chill_f(temp_f: f64, wind_mph: f64) -> f64 {
    if !wind_chill_applies(temp_f, wind_mph) {
        return temp_f;
    }
    let v = wind_mph.powf(0.16);
    35.74 + 0.6215 * temp_f - 35.75 * v + 0.4275 * temp_f * v
}

/// Apparent temperature in °F: heat index when hot, wind chill when cold
/// and windy, the air temperature otherwise.
pub fn feels_like_f(temp_f: f64, humidity: Option<f64>, wind_mph: Option<f64>) -> f64 {
    if temp_f >= HEAT_INDEX_MIN_TEMP_F {
        return humidity.map_or(temp_f, |rh| heat_index_f(temp_f, rh));
    }
    match wind_mph {
        Some(wind) if wind_chill_applies(temp_f, wind) => wind_chill_f(temp_f, wind),
        _ => temp_f,
    }
}

fn to_fahrenheit(value: f64, unit: Unit) -> Result<f64, DecodeError> {
    convert(value, QuantityKind::Temperature, unit, Unit::Fahrenheit)
}

fn from_fahrenheit(value: f64, unit: Unit) -> Result<f64, DecodeError> {
    convert(value, QuantityKind::Temperature, Unit::Fahrenheit, unit)
}

fn to_mph(value: f64, unit: Unit) -> Result<f64, DecodeError> {
    convert(value, QuantityKind::Speed, unit, Unit::MilePerHour)
}

/// Dew point in the unit of `temperature`.
pub fn dew_point(temperature: f64, unit: Unit, humidity: f64) -> Result<Option<f64>, DecodeError> {
    let temp_c = convert(temperature, QuantityKind::Temperature, unit, Unit::Celsius)?;
    dew_point_c(temp_c, humidity)
        .map(|dew_c| convert(dew_c, QuantityKind::Temperature, Unit::Celsius, unit))
        .transpose()
}

/// Heat index in the unit of `temperature`.
pub fn heat_index(temperature: f64, unit: Unit, humidity: f64) -> Result<f64, DecodeError> {
    let temp_f = to_fahrenheit(temperature, unit)?;
    if temp_f < HEAT_INDEX_MIN_TEMP_F {
        return Ok(temperature);
    }
    from_fahrenheit(heat_index_f(temp_f, humidity), unit)
}

/// Wind chill in the unit of `temperature`.
pub fn wind_chill(
    temperature: f64,
    unit: Unit,
    wind: f64,
    wind_unit: Unit,
) -> Result<f64, DecodeError> {
    let temp_f = to_fahrenheit(temperature, unit)?;
    let wind_mph = to_mph(wind, wind_unit)?;
    if !wind_chill_applies(temp_f, wind_mph) {
        return Ok(temperature);
    }
    from_fahrenheit(wind_chill_f(temp_f, wind_mph), unit)
}

/// Whether a wind chill value exists for these readings.
pub fn wind_chill_defined(
    temperature: f64,
    unit: Unit,
    wind: f64,
    wind_unit: Unit,
) -> Result<bool, DecodeError> {
    Ok(wind_chill_applies(
        to_fahrenheit(temperature, unit)?,
        to_mph(wind, wind_unit)?,
    ))
}

/// Apparent temperature in the unit of `temperature`.
pub fn feels_like(
    temperature: f64,
    unit: Unit,
    humidity: Option<f64>,
    wind: Option<(f64, Unit)>,
) -> Result<f64, DecodeError> {
    let temp_f = to_fahrenheit(temperature, unit)?;
    let wind_mph = wind.map(|(speed, speed_unit)| to_mph(speed, speed_unit)).transpose()?;
    let apparent = feels_like_f(temp_f, humidity, wind_mph);
    if apparent == temp_f {
        return Ok(temperature);
    }
    from_fahrenheit(apparent, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_index_above_threshold() {
        let index = heat_index_f(90.0, 60.0);
        assert!((99.0..=101.0).contains(&index), "got {index}");
        assert!(index > 90.0);
    }

    #[test]
    fn heat_index_below_threshold_is_the_temperature() {
        assert_eq!(heat_index_f(79.9, 90.0), 79.9);
        assert_eq!(heat_index_f(20.0, 50.0), 20.0);
        assert_eq!(heat_index(10.0, Unit::Celsius, 80.0).unwrap(), 10.0);
    }

    #[test]
    fn heat_index_humidity_adjustments() {
        let dry = heat_index_f(100.0, 10.0);
        let unadjusted = heat_index_f(100.0, 13.0);
        assert!(dry < unadjusted + 1.0);

        let muggy = heat_index_f(85.0, 90.0);
        assert!(muggy > 85.0);
    }

    #[test]
    fn wind_chill_inside_domain() {
        let chill = wind_chill_f(30.0, 10.0);
        assert!((20.5..=22.0).contains(&chill), "got {chill}");
    }

    #[test]
    fn wind_chill_outside_domain_is_the_temperature() {
        assert_eq!(wind_chill_f(30.0, 2.9), 30.0);
        assert_eq!(wind_chill_f(60.0, 20.0), 60.0);
        assert_eq!(
            wind_chill(5.0, Unit::Celsius, 1.0, Unit::KilometerPerHour).unwrap(),
            5.0
        );
        assert!(!wind_chill_defined(5.0, Unit::Celsius, 1.0, Unit::KilometerPerHour).unwrap());
    }

    #[test]
    fn wind_chill_in_metric() {
        let chill = wind_chill(-5.0, Unit::Celsius, 20.0, Unit::KilometerPerHour).unwrap();
        assert!(chill < -5.0);
        assert!((-12.0..=-10.0).contains(&chill), "got {chill}");
    }

    #[test]
    fn dew_point_magnus() {
        let dew = dew_point_c(20.0, 50.0).unwrap();
        assert!((9.0..=9.5).contains(&dew), "got {dew}");

        let saturated = dew_point_c(15.0, 100.0).unwrap();
        assert!((saturated - 15.0).abs() < 1e-9);

        assert!(dew_point_c(20.0, 0.0).is_none());
        assert!(dew_point_c(20.0, 101.0).is_none());
    }

    #[test]
    fn dew_point_keeps_the_input_unit() {
        let dew_f = dew_point(68.0, Unit::Fahrenheit, 50.0).unwrap().unwrap();
        assert!((48.2..=49.1).contains(&dew_f), "got {dew_f}");
    }

    #[test]
    fn feels_like_picks_the_right_formula() {
        assert_eq!(feels_like_f(65.0, Some(50.0), Some(10.0)), 65.0);
        assert_eq!(feels_like_f(90.0, Some(60.0), Some(10.0)), heat_index_f(90.0, 60.0));
        assert_eq!(feels_like_f(30.0, Some(60.0), Some(10.0)), wind_chill_f(30.0, 10.0));
        assert_eq!(feels_like_f(90.0, None, None), 90.0);

        assert_eq!(feels_like(18.0, Unit::Celsius, Some(40.0), None).unwrap(), 18.0);
    }

    #[test]
    fn rejects_non_temperature_units() {
        assert!(heat_index(30.0, Unit::Hectopascal, 50.0).is_err());
        assert!(wind_chill(0.0, Unit::Celsius, 10.0, Unit::Millimeter).is_err());
    }
}
