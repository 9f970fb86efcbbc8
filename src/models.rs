/// Core value types shared by the registry, decoder and assembler
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::error::{ConfigError, DecodeError};

/// Physical dimension of a reading, independent of its unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Temperature,
    Humidity,
    Pressure,
    Speed,
    RainRate,
    RainAccumulated,
    Concentration,
    Distance,
    Radiation,
    BatteryLevel,
    BatteryBinary,
    SignalStrength,
    Voltage,
    Boolean,
    Timestamp,
    RawNumeric,
    RawString,
}

impl QuantityKind {
    /// Kinds whose raw value parses as a floating point number.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            Self::BatteryBinary | Self::Boolean | Self::Timestamp | Self::RawString
        )
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pressure => "pressure",
            Self::Speed => "speed",
            Self::RainRate => "rain rate",
            Self::RainAccumulated => "accumulated rain",
            Self::Concentration => "concentration",
            Self::Distance => "distance",
            Self::Radiation => "radiation",
            Self::BatteryLevel => "battery level",
            Self::BatteryBinary => "battery flag",
            Self::SignalStrength => "signal strength",
            Self::Voltage => "voltage",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::RawNumeric => "numeric",
            Self::RawString => "string",
        };
        f.write_str(name)
    }
}

/// Unit of measurement attached to a sensor definition or a decoded reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Percent,
    Hectopascal,
    InchOfMercury,
    KilometerPerHour,
    MilePerHour,
    MeterPerSecond,
    Millimeter,
    Inch,
    Kilometer,
    Mile,
    MillimeterPerHour,
    InchPerHour,
    MicrogramPerCubicMeter,
    PartsPerMillion,
    WattPerSquareMeter,
    Lux,
    Degree,
    UvIndex,
    Volt,
    /// Vendor battery scale, 0 (empty) to 5 (full).
    BatteryBars,
    /// Vendor radio signal scale, 0 to 4.
    SignalBars,
    DecibelMilliwatt,
    Second,
    Count,
    /// Dimensionless, or not a number at all.
    None,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Percent => "%",
            Self::Hectopascal => "hPa",
            Self::InchOfMercury => "inHg",
            Self::KilometerPerHour => "km/h",
            Self::MilePerHour => "mph",
            Self::MeterPerSecond => "m/s",
            Self::Millimeter => "mm",
            Self::Inch => "in",
            Self::Kilometer => "km",
            Self::Mile => "mi",
            Self::MillimeterPerHour => "mm/h",
            Self::InchPerHour => "in/h",
            Self::MicrogramPerCubicMeter => "µg/m³",
            Self::PartsPerMillion => "ppm",
            Self::WattPerSquareMeter => "W/m²",
            Self::Lux => "lx",
            Self::Degree => "°",
            Self::UvIndex => "UV index",
            Self::Volt => "V",
            Self::BatteryBars => "bars",
            Self::SignalBars => "signal bars",
            Self::DecibelMilliwatt => "dBm",
            Self::Second => "s",
            Self::Count => "count",
            Self::None => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("(none)"),
            other => f.write_str(other.symbol()),
        }
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Target unit system selected by the caller for one decode pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl FromStr for UnitSystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "si" => Ok(Self::Metric),
            "imperial" | "us" => Ok(Self::Imperial),
            _ => Err(ConfigError::InvalidUnitSystem(s.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => f.write_str("metric"),
            Self::Imperial => f.write_str("imperial"),
        }
    }
}

/// Output group a reading is assigned to by the assembler.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayGroup {
    Primary,
    Channel,
    Diagnostic,
    DeviceMeta,
}

/// Semantic description of one protocol key, as resolved by the registry.
///
/// `sensor` names the logical slot the reading fills (`"temperature"`,
/// `"soil_moisture"`, `"wh65"`); keys reporting the same quantity in
/// different units share a sensor name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorDefinition {
    pub sensor: &'static str,
    pub label: &'static str,
    pub kind: QuantityKind,
    pub native_unit: Unit,
    pub group: DisplayGroup,
    pub channel: Option<u8>,
}

/// Battery state reported by sensors that only send a low-battery flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryState {
    Normal,
    Low,
}

/// Parsed and normalized value of a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Number(f64),
    Bool(bool),
    Battery(BatteryState),
    Text(String),
    Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
}

impl ReadingValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

/// One key of one payload, resolved, parsed and expressed in the target unit system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedReading {
    pub key: String,
    pub sensor: String,
    pub kind: QuantityKind,
    pub group: DisplayGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u8>,
    pub value: ReadingValue,
    pub unit: Unit,
    #[serde(skip)]
    pub native_unit: Unit,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub derived: bool,
}

impl DecodedReading {
    pub fn new(key: &str, definition: &SensorDefinition, value: ReadingValue, unit: Unit) -> Self {
        DecodedReading {
            key: key.to_string(),
            sensor: definition.sensor.to_string(),
            kind: definition.kind,
            group: definition.group,
            channel: definition.channel,
            value,
            unit,
            native_unit: definition.native_unit,
            derived: false,
        }
    }

    pub fn number(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// A recognized key that could not be turned into a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeFailure {
    pub key: String,
    pub raw_value: String,
    #[serde(serialize_with = "serialize_display")]
    pub reason: DecodeError,
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

impl DecodeFailure {
    pub fn new(key: &str, raw_value: &str, reason: DecodeError) -> Self {
        DecodeFailure {
            key: key.to_string(),
            raw_value: raw_value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}: {}", self.key, self.raw_value, self.reason)
    }
}
