//! Payload decoding: key resolution, value parsing and unit normalization

pub mod derive;
pub mod parser;
pub mod payload;

use log::{debug, warn};

use crate::error::DecodeError;
use crate::models::{DecodeFailure, DecodedReading, ReadingValue, SensorDefinition, UnitSystem};
use crate::registry::{is_iot_key, SensorRegistry};
use crate::units::normalize;

pub use derive::derive_missing;
pub use parser::parse_value;
pub use payload::Payload;

/// Everything one walk over a payload produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodePass {
    pub readings: Vec<DecodedReading>,
    pub failures: Vec<DecodeFailure>,
    pub unknown_keys: Vec<String>,
}

/// Decode every sensor key of `payload` into readings expressed in `system`.
///
/// Unknown keys are skipped and listed, malformed values become failures, and
/// neither stops the pass. IoT cluster keys are left for the IoT scan.
pub fn decode_readings(payload: &Payload, system: UnitSystem) -> DecodePass {
    let registry = SensorRegistry::global();
    let mut pass = DecodePass::default();

    for (key, raw) in payload.iter() {
        if is_iot_key(key) {
            continue;
        }

        let Some(definition) = registry.lookup(key) else {
            debug!("Skipping unknown key {}", key);
            pass.unknown_keys.push(key.to_string());
            continue;
        };

        match decode_reading(key, raw, &definition, system) {
            Ok(Some(reading)) => pass.readings.push(reading),
            Ok(None) => debug!("No reading in {}={:?}", key, raw),
            Err(e) => {
                warn!("Failed to decode {}={:?}: {}", key, raw, e);
                pass.failures.push(DecodeFailure::new(key, raw, e));
            }
        }
    }

    pass
}

/// Decode one resolved key.
///
/// # Arguments
/// * `key` - Protocol key as sent by the station
/// * `raw` - Raw value string
/// * `definition` - Registry definition for `key`
/// * `system` - Unit system numeric values are converted to
///
/// # Returns
/// `Ok(None)` for placeholder values, the normalized reading otherwise
pub fn decode_reading(
    key: &str,
    raw: &str,
    definition: &SensorDefinition,
    system: UnitSystem,
) -> Result<Option<DecodedReading>, DecodeError> {
    let Some(value) = parse_value(definition.kind, raw)? else {
        return Ok(None);
    };

    let reading = match value {
        ReadingValue::Number(number) => {
            let (converted, unit) =
                normalize(number, definition.kind, definition.native_unit, system)?;
            DecodedReading::new(key, definition, ReadingValue::Number(converted), unit)
        }
        other => DecodedReading::new(key, definition, other, definition.native_unit),
    };

    Ok(Some(reading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuantityKind, Unit};

    #[test]
    fn converts_to_the_requested_system() {
        let payload = Payload::from([("tempf", "72.5"), ("baromrelin", "29.92")]);
        let pass = decode_readings(&payload, UnitSystem::Metric);
        assert!(pass.failures.is_empty());
        assert_eq!(pass.readings.len(), 2);

        let pressure = &pass.readings[0];
        assert_eq!(pressure.key, "baromrelin");
        assert_eq!(pressure.unit, Unit::Hectopascal);
        assert!((pressure.number().unwrap() - 1013.21).abs() < 0.01);

        let temperature = &pass.readings[1];
        assert_eq!(temperature.unit, Unit::Celsius);
        assert!((temperature.number().unwrap() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn keeps_native_units_already_in_the_system() {
        let payload = Payload::from([("tempf", "72.5")]);
        let pass = decode_readings(&payload, UnitSystem::Imperial);
        assert_eq!(pass.readings[0].unit, Unit::Fahrenheit);
        assert_eq!(pass.readings[0].number(), Some(72.5));
    }

    #[test]
    fn collects_unknown_keys_and_failures() {
        let payload = Payload::from([
            ("tempf", "warm"),
            ("humidity", "45"),
            ("mystery_key", "1"),
            ("dev_id1", "AB12"),
            ("soilmoisture1", "--"),
        ]);
        let pass = decode_readings(&payload, UnitSystem::Metric);

        assert_eq!(pass.readings.len(), 1);
        assert_eq!(pass.readings[0].kind, QuantityKind::Humidity);

        assert_eq!(pass.failures.len(), 1);
        assert_eq!(pass.failures[0].key, "tempf");
        assert_eq!(pass.failures[0].raw_value, "warm");

        assert_eq!(pass.unknown_keys, vec!["mystery_key".to_string()]);
    }

    #[test]
    fn battery_bars_are_reported_in_percent() {
        let payload = Payload::from([("pm25batt1", "4")]);
        let pass = decode_readings(&payload, UnitSystem::Metric);
        let battery = &pass.readings[0];
        assert_eq!(battery.unit, Unit::Percent);
        assert_eq!(battery.native_unit, Unit::BatteryBars);
        assert_eq!(battery.number(), Some(80.0));
        assert_eq!(battery.channel, Some(1));
    }
}
