/// Raw string to typed value parsing, one rule per quantity kind
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::DecodeError;
use crate::models::{BatteryState, QuantityKind, ReadingValue};
use crate::utils::is_placeholder;

/// Parse a raw payload value according to its kind.
///
/// # Returns
///
/// `Ok(None)` when the value is a placeholder for a missing reading,
/// `Err` when the value is present but does not fit the kind
pub fn parse_value(kind: QuantityKind, raw: &str) -> Result<Option<ReadingValue>, DecodeError> {
    if is_placeholder(raw) {
        return Ok(None);
    }
    let value = raw.trim();

    match kind {
        QuantityKind::BatteryBinary => parse_battery_flag(value).map(Some),
        QuantityKind::Boolean => parse_bool(value).map(|flag| Some(ReadingValue::Bool(flag))),
        QuantityKind::Timestamp => {
            parse_timestamp(value).map(|stamp| stamp.map(ReadingValue::Timestamp))
        }
        QuantityKind::RawString => Ok(Some(ReadingValue::Text(value.to_string()))),
        numeric => parse_number(numeric, value).map(|number| Some(ReadingValue::Number(number))),
    }
}

pub fn parse_number(kind: QuantityKind, value: &str) -> Result<f64, DecodeError> {
    let number: f64 = value
        .parse()
        .map_err(|_| DecodeError::malformed(kind, value, "not a number"))?;
    if !number.is_finite() {
        return Err(DecodeError::malformed(kind, value, "not a finite number"));
    }
    Ok(number)
}

fn parse_battery_flag(value: &str) -> Result<ReadingValue, DecodeError> {
    match value.to_ascii_lowercase().as_str() {
        "0" | "normal" | "ok" => Ok(ReadingValue::Battery(BatteryState::Normal)),
        "1" | "low" => Ok(ReadingValue::Battery(BatteryState::Low)),
        _ => Err(DecodeError::malformed(
            QuantityKind::BatteryBinary,
            value,
            "expected 0 (normal) or 1 (low)",
        )),
    }
}

pub fn parse_bool(value: &str) -> Result<bool, DecodeError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(DecodeError::malformed(QuantityKind::Boolean, value, "expected 0 or 1")),
    }
}

/// Timestamps come as unix seconds or as a UTC `YYYY-MM-DD HH:MM:SS` string.
/// Consoles without a clock send `now`, which carries no time at all.
fn parse_timestamp(value: &str) -> Result<Option<OffsetDateTime>, DecodeError> {
    if value.eq_ignore_ascii_case("now") {
        return Ok(None);
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        let seconds: i64 = value
            .parse()
            .map_err(|_| DecodeError::malformed(QuantityKind::Timestamp, value, "out of range"))?;
        return OffsetDateTime::from_unix_timestamp(seconds)
            .map(Some)
            .map_err(|e| DecodeError::malformed(QuantityKind::Timestamp, value, e.to_string()));
    }

    let spaced = value.replace('+', " ");
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(&spaced, format)
        .map(|stamp| Some(stamp.assume_utc()))
        .map_err(|e| DecodeError::malformed(QuantityKind::Timestamp, value, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_numbers() {
        assert_eq!(
            parse_value(QuantityKind::Temperature, " 72.5 ").unwrap(),
            Some(ReadingValue::Number(72.5))
        );
        assert_eq!(
            parse_value(QuantityKind::RawNumeric, "-3").unwrap(),
            Some(ReadingValue::Number(-3.0))
        );
    }

    #[test]
    fn rejects_garbage_numbers() {
        let err = parse_value(QuantityKind::Temperature, "abc").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedValue { kind: QuantityKind::Temperature, .. }
        ));
        assert!(parse_value(QuantityKind::Pressure, "NaN").is_err());
        assert!(parse_value(QuantityKind::Speed, "inf").is_err());
        assert!(parse_value(QuantityKind::Humidity, "45%").is_err());
    }

    #[test]
    fn placeholders_yield_nothing() {
        assert_eq!(parse_value(QuantityKind::Temperature, "--").unwrap(), None);
        assert_eq!(parse_value(QuantityKind::Temperature, "--.-").unwrap(), None);
        assert_eq!(parse_value(QuantityKind::RawString, "").unwrap(), None);
        assert_eq!(parse_value(QuantityKind::Timestamp, "now").unwrap(), None);
    }

    #[test]
    fn parses_battery_flags_and_booleans() {
        assert_eq!(
            parse_value(QuantityKind::BatteryBinary, "0").unwrap(),
            Some(ReadingValue::Battery(BatteryState::Normal))
        );
        assert_eq!(
            parse_value(QuantityKind::BatteryBinary, "1").unwrap(),
            Some(ReadingValue::Battery(BatteryState::Low))
        );
        assert!(parse_value(QuantityKind::BatteryBinary, "2").is_err());

        assert_eq!(
            parse_value(QuantityKind::Boolean, "1").unwrap(),
            Some(ReadingValue::Bool(true))
        );
        assert_eq!(
            parse_value(QuantityKind::Boolean, "Off").unwrap(),
            Some(ReadingValue::Bool(false))
        );
        assert!(parse_value(QuantityKind::Boolean, "maybe").is_err());
    }

    #[test]
    fn parses_timestamps() {
        let expected = datetime!(2024-05-01 12:30:00 UTC);
        assert_eq!(
            parse_value(QuantityKind::Timestamp, "2024-05-01 12:30:00").unwrap(),
            Some(ReadingValue::Timestamp(expected))
        );
        assert_eq!(
            parse_value(QuantityKind::Timestamp, "2024-05-01+12:30:00").unwrap(),
            Some(ReadingValue::Timestamp(expected))
        );
        assert_eq!(
            parse_value(QuantityKind::Timestamp, "1714566600").unwrap(),
            Some(ReadingValue::Timestamp(expected))
        );
        assert!(parse_value(QuantityKind::Timestamp, "yesterday").is_err());
    }

    #[test]
    fn strings_are_trimmed() {
        assert_eq!(
            parse_value(QuantityKind::RawString, " GW2000A_V2.2.4 ").unwrap(),
            Some(ReadingValue::Text("GW2000A_V2.2.4".to_string()))
        );
    }
}
