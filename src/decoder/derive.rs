/// Readings computed from other readings of the same payload
use log::{debug, warn};

use crate::error::DecodeError;
use crate::grouping::assembler::preference;
use crate::models::{DecodedReading, ReadingValue, Unit, UnitSystem};
use crate::registry;
use crate::units::derived::{dew_point, feels_like, wind_chill, wind_chill_defined};

/// Solar radiation to illuminance: 1 W/m² of sunlight is roughly 126.7 lx.
pub const LUX_PER_WATT: f64 = 1.0 / 0.0079;

/// Highest channel index a temperature/humidity sensor family uses.
const TH_CHANNELS: u8 = 8;

/// Compute the derived readings `readings` is missing.
///
/// Only slots no measured reading fills are computed, and every result is
/// flagged `derived`. Inputs must already be normalized to `system`. When a
/// quantity is reported more than once, the reading the assembler would
/// display is the one used as input.
pub fn derive_missing(readings: &[DecodedReading], system: UnitSystem) -> Vec<DecodedReading> {
    let temp_suffix = match system {
        UnitSystem::Metric => "c",
        UnitSystem::Imperial => "f",
    };
    let mut derived = Vec::new();

    if let (Some(temp), Some(rh)) = (
        find(readings, "temperature", None),
        find_value(readings, "humidity", None),
    ) {
        let key = format!("dewpoint{}", temp_suffix);
        push_dew_point(&mut derived, readings, &key, temp, rh);
    }
    if let (Some(temp), Some(rh)) = (
        find(readings, "indoor_temperature", None),
        find_value(readings, "indoor_humidity", None),
    ) {
        let key = format!("dewpointin{}", temp_suffix);
        push_dew_point(&mut derived, readings, &key, temp, rh);
    }
    for channel in 1..=TH_CHANNELS {
        if let (Some(temp), Some(rh)) = (
            find(readings, "temperature", Some(channel)),
            find_value(readings, "humidity", Some(channel)),
        ) {
            let key = format!("dewpoint{}{}", channel, temp_suffix);
            push_dew_point(&mut derived, readings, &key, temp, rh);
        }
    }

    let temp = find(readings, "temperature", None);
    let humidity = find_value(readings, "humidity", None);
    let wind = find(readings, "wind_speed", None);

    if let (Some(temp), Some(rh), Some(wind)) = (temp, humidity, wind) {
        let key = format!("tempfeels{}", temp_suffix);
        push(&mut derived, readings, &key, || {
            feels_like(temp.0, temp.1, Some(rh), Some(wind)).map(Some)
        });
    }

    if let (Some(temp), Some(wind)) = (temp, wind) {
        let key = format!("windchill{}", temp_suffix);
        push(&mut derived, readings, &key, || {
            if wind_chill_defined(temp.0, temp.1, wind.0, wind.1)? {
                wind_chill(temp.0, temp.1, wind.0, wind.1).map(Some)
            } else {
                Ok(None)
            }
        });
    }

    if let Some((radiation, Unit::WattPerSquareMeter)) = find(readings, "solar_radiation", None) {
        push(&mut derived, readings, "solarradiation_lux", || {
            Ok(Some(radiation * LUX_PER_WATT))
        });
    }

    derived
}

fn push_dew_point(
    derived: &mut Vec<DecodedReading>,
    readings: &[DecodedReading],
    key: &str,
    temp: (f64, Unit),
    humidity: f64,
) {
    push(derived, readings, key, || dew_point(temp.0, temp.1, humidity));
}

/// Add a derived reading for `key` unless its slot is already filled.
fn push<F>(derived: &mut Vec<DecodedReading>, readings: &[DecodedReading], key: &str, compute: F)
where
    F: FnOnce() -> Result<Option<f64>, DecodeError>,
{
    let Some(definition) = registry::lookup(key) else {
        warn!("Derived key {} is not registered", key);
        return;
    };
    let filled = readings
        .iter()
        .any(|r| r.sensor == definition.sensor && r.channel == definition.channel);
    if filled {
        return;
    }

    match compute() {
        Ok(Some(value)) => {
            debug!("Derived {} = {}", key, value);
            let value = ReadingValue::Number(value);
            let mut reading = DecodedReading::new(key, &definition, value, definition.native_unit);
            reading.derived = true;
            derived.push(reading);
        }
        Ok(None) => {}
        Err(e) => warn!("Could not derive {}: {}", key, e),
    }
}

/// Measured input for `sensor`, picked in the assembler's preference order.
fn find(readings: &[DecodedReading], sensor: &str, channel: Option<u8>) -> Option<(f64, Unit)> {
    readings
        .iter()
        .filter(|r| !r.derived && r.sensor == sensor && r.channel == channel)
        .filter(|r| r.number().is_some())
        .min_by(|a, b| preference(a).cmp(&preference(b)))
        .and_then(|r| r.number().map(|value| (value, r.unit)))
}

fn find_value(readings: &[DecodedReading], sensor: &str, channel: Option<u8>) -> Option<f64> {
    find(readings, sensor, channel).map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode_readings, Payload};

    fn derive(pairs: &[(&str, &str)], system: UnitSystem) -> Vec<DecodedReading> {
        let payload: Payload = pairs.iter().copied().collect();
        let pass = decode_readings(&payload, system);
        derive_missing(&pass.readings, system)
    }

    fn by_key<'a>(readings: &'a [DecodedReading], key: &str) -> Option<&'a DecodedReading> {
        readings.iter().find(|r| r.key == key)
    }

    #[test]
    fn derives_dew_points() {
        let derived = derive(
            &[("tempc", "20"), ("humidity", "50"), ("temp2c", "20"), ("humidity2", "50")],
            UnitSystem::Metric,
        );

        let outdoor = by_key(&derived, "dewpointc").unwrap();
        assert!(outdoor.derived);
        assert_eq!(outdoor.unit, Unit::Celsius);
        assert!((9.0..=9.5).contains(&outdoor.number().unwrap()));

        let channel = by_key(&derived, "dewpoint2c").unwrap();
        assert_eq!(channel.channel, Some(2));
        assert!(by_key(&derived, "dewpointinc").is_none());
    }

    #[test]
    fn measured_slots_are_not_recomputed() {
        let derived = derive(
            &[("tempf", "68"), ("humidity", "50"), ("dewpointf", "40")],
            UnitSystem::Imperial,
        );
        assert!(by_key(&derived, "dewpointf").is_none());
        assert!(derived.iter().all(|r| r.sensor != "dew_point"));
    }

    #[test]
    fn wind_chill_only_inside_its_domain() {
        let cold = derive(&[("tempf", "30"), ("windspeedmph", "10")], UnitSystem::Imperial);
        let chill = by_key(&cold, "windchillf").unwrap();
        assert!((20.5..=22.0).contains(&chill.number().unwrap()));

        let calm = derive(
            &[("tempf", "30"), ("humidity", "60"), ("windspeedmph", "1")],
            UnitSystem::Imperial,
        );
        assert!(by_key(&calm, "windchillf").is_none());
        assert_eq!(by_key(&calm, "tempfeelsf").unwrap().number(), Some(30.0));
    }

    #[test]
    fn feels_like_needs_humidity_and_wind() {
        let bare = derive(&[("tempf", "72.5")], UnitSystem::Metric);
        assert!(bare.is_empty());

        let no_wind = derive(&[("tempf", "90"), ("humidity", "60")], UnitSystem::Imperial);
        assert!(by_key(&no_wind, "tempfeelsf").is_none());

        let full = derive(
            &[("tempf", "90"), ("humidity", "60"), ("windspeedmph", "5")],
            UnitSystem::Imperial,
        );
        let feels = by_key(&full, "tempfeelsf").unwrap().number().unwrap();
        assert!((99.0..=101.0).contains(&feels), "got {feels}");
    }

    #[test]
    fn inputs_follow_the_displayed_reading() {
        let derived = derive(
            &[("tempc", "30"), ("tempf", "50"), ("windspeedmph", "10"), ("humidity", "50")],
            UnitSystem::Imperial,
        );

        let chill = by_key(&derived, "windchillf").unwrap().number().unwrap();
        assert!((46.5..=47.5).contains(&chill), "got {chill}");
        let feels = by_key(&derived, "tempfeelsf").unwrap().number().unwrap();
        assert_eq!(feels, chill);
        let dew = by_key(&derived, "dewpointf").unwrap().number().unwrap();
        assert!((31.5..=32.5).contains(&dew), "got {dew}");
    }

    #[test]
    fn derives_illuminance() {
        let derived = derive(&[("solarradiation", "79")], UnitSystem::Metric);
        let lux = by_key(&derived, "solarradiation_lux").unwrap();
        assert_eq!(lux.unit, Unit::Lux);
        assert!((lux.number().unwrap() - 10_000.0).abs() < 1e-6);
    }
}
