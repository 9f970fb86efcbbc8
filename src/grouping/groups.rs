/// Structured output of a decode pass
use serde::Serialize;
use std::collections::BTreeMap;
use time::OffsetDateTime;

use crate::grouping::iot::IoTDevice;
use crate::models::{DecodeFailure, DecodedReading, QuantityKind, Unit, UnitSystem};

/// Station metadata. Fields the payload did not carry stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub identifier: Option<String>,
    pub frequency: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub observed_at: Option<OffsetDateTime>,
    /// Remaining metadata (runtime, upload interval, heap, ...) by sensor name.
    pub attributes: BTreeMap<String, DecodedReading>,
}

impl DeviceInfo {
    /// Store a metadata reading. Returns `false` if its slot is taken.
    pub fn insert(&mut self, reading: DecodedReading) -> bool {
        let text_slot = match reading.sensor.as_str() {
            "name" => Some(&mut self.name),
            "firmware" => Some(&mut self.version),
            "identifier" => Some(&mut self.identifier),
            "frequency" => Some(&mut self.frequency),
            _ => None,
        };

        if let Some(slot) = text_slot {
            let Some(text) = reading.value.as_str() else {
                return false;
            };
            return fill(slot, text.to_string());
        }

        if reading.sensor == "observed_at" {
            return match reading.value.as_timestamp() {
                Some(stamp) => fill(&mut self.observed_at, stamp),
                None => false,
            };
        }

        insert_first(&mut self.attributes, reading.sensor.clone(), reading)
    }
}

/// Sensor names of the rain slots. Piezo gauges use the same names behind a
/// `piezo_` prefix.
pub const RAIN_PERIODS: &[&str] = &[
    "rain_rate",
    "event_rain",
    "hourly_rain",
    "daily_rain",
    "weekly_rain",
    "monthly_rain",
    "yearly_rain",
    "total_rain",
];

/// Accumulated rain for one gauge type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RainData {
    pub rate: Option<DecodedReading>,
    pub event: Option<DecodedReading>,
    pub hourly: Option<DecodedReading>,
    pub daily: Option<DecodedReading>,
    pub weekly: Option<DecodedReading>,
    pub monthly: Option<DecodedReading>,
    pub yearly: Option<DecodedReading>,
    pub total: Option<DecodedReading>,
}

impl RainData {
    fn slot(&mut self, period: &str) -> Option<&mut Option<DecodedReading>> {
        match period {
            "rain_rate" => Some(&mut self.rate),
            "event_rain" => Some(&mut self.event),
            "hourly_rain" => Some(&mut self.hourly),
            "daily_rain" => Some(&mut self.daily),
            "weekly_rain" => Some(&mut self.weekly),
            "monthly_rain" => Some(&mut self.monthly),
            "yearly_rain" => Some(&mut self.yearly),
            "total_rain" => Some(&mut self.total),
            _ => None,
        }
    }

    pub fn get(&self, period: &str) -> Option<&DecodedReading> {
        let slot = match period {
            "rain_rate" => &self.rate,
            "event_rain" => &self.event,
            "hourly_rain" => &self.hourly,
            "daily_rain" => &self.daily,
            "weekly_rain" => &self.weekly,
            "monthly_rain" => &self.monthly,
            "yearly_rain" => &self.yearly,
            "total_rain" => &self.total,
            _ => return None,
        };
        slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        *self == RainData::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LightningData {
    pub distance: Option<DecodedReading>,
    pub count: Option<DecodedReading>,
    pub last_strike: Option<DecodedReading>,
}

/// Non-channel environmental readings of the station.
///
/// Every field is optional so an absent reading never reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherData {
    pub temperature: Option<DecodedReading>,
    pub humidity: Option<DecodedReading>,
    pub dew_point: Option<DecodedReading>,
    pub feels_like: Option<DecodedReading>,
    pub wind_chill: Option<DecodedReading>,
    pub indoor_temperature: Option<DecodedReading>,
    pub indoor_humidity: Option<DecodedReading>,
    pub indoor_dew_point: Option<DecodedReading>,
    pub absolute_pressure: Option<DecodedReading>,
    pub relative_pressure: Option<DecodedReading>,
    pub wind_direction: Option<DecodedReading>,
    pub wind_speed: Option<DecodedReading>,
    pub wind_gust: Option<DecodedReading>,
    pub max_daily_gust: Option<DecodedReading>,
    pub solar_radiation: Option<DecodedReading>,
    pub solar_illuminance: Option<DecodedReading>,
    pub uv_index: Option<DecodedReading>,
    pub rain: RainData,
    pub piezo_rain: RainData,
    pub lightning: LightningData,
    /// Primary readings without a dedicated field (air quality, 10 minute
    /// averages, vapour pressure deficit), by sensor name.
    pub other: BTreeMap<String, DecodedReading>,
}

impl WeatherData {
    fn slot(&mut self, sensor: &str) -> Option<&mut Option<DecodedReading>> {
        if let Some(period) = sensor.strip_prefix("piezo_") {
            return self.piezo_rain.slot(period);
        }
        if RAIN_PERIODS.contains(&sensor) {
            return self.rain.slot(sensor);
        }

        let slot = match sensor {
            "temperature" => &mut self.temperature,
            "humidity" => &mut self.humidity,
            "dew_point" => &mut self.dew_point,
            "feels_like" => &mut self.feels_like,
            "wind_chill" => &mut self.wind_chill,
            "indoor_temperature" => &mut self.indoor_temperature,
            "indoor_humidity" => &mut self.indoor_humidity,
            "indoor_dew_point" => &mut self.indoor_dew_point,
            "absolute_pressure" => &mut self.absolute_pressure,
            "relative_pressure" => &mut self.relative_pressure,
            "wind_direction" => &mut self.wind_direction,
            "wind_speed" => &mut self.wind_speed,
            "wind_gust" => &mut self.wind_gust,
            "max_daily_gust" => &mut self.max_daily_gust,
            "solar_radiation" => &mut self.solar_radiation,
            "solar_illuminance" => &mut self.solar_illuminance,
            "uv_index" => &mut self.uv_index,
            "lightning_distance" => &mut self.lightning.distance,
            "lightning_count" => &mut self.lightning.count,
            "lightning_time" => &mut self.lightning.last_strike,
            _ => return None,
        };
        Some(slot)
    }

    /// Store a primary reading. Returns `false` if its slot is taken.
    pub fn insert(&mut self, reading: DecodedReading) -> bool {
        match self.slot(&reading.sensor) {
            Some(slot) => fill(slot, reading),
            None => insert_first(&mut self.other, reading.sensor.clone(), reading),
        }
    }

    /// Reading for a sensor name, whether it has a dedicated field or not.
    pub fn get(&self, sensor: &str) -> Option<&DecodedReading> {
        if let Some(period) = sensor.strip_prefix("piezo_") {
            if RAIN_PERIODS.contains(&period) {
                return self.piezo_rain.get(period);
            }
        }
        if RAIN_PERIODS.contains(&sensor) {
            return self.rain.get(sensor);
        }

        let field = match sensor {
            "temperature" => &self.temperature,
            "humidity" => &self.humidity,
            "dew_point" => &self.dew_point,
            "feels_like" => &self.feels_like,
            "wind_chill" => &self.wind_chill,
            "indoor_temperature" => &self.indoor_temperature,
            "indoor_humidity" => &self.indoor_humidity,
            "indoor_dew_point" => &self.indoor_dew_point,
            "absolute_pressure" => &self.absolute_pressure,
            "relative_pressure" => &self.relative_pressure,
            "wind_direction" => &self.wind_direction,
            "wind_speed" => &self.wind_speed,
            "wind_gust" => &self.wind_gust,
            "max_daily_gust" => &self.max_daily_gust,
            "solar_radiation" => &self.solar_radiation,
            "solar_illuminance" => &self.solar_illuminance,
            "uv_index" => &self.uv_index,
            "lightning_distance" => &self.lightning.distance,
            "lightning_count" => &self.lightning.count,
            "lightning_time" => &self.lightning.last_strike,
            _ => return self.other.get(sensor),
        };
        field.as_ref()
    }
}

/// Channel readings by sensor name, then channel index.
///
/// Only channels present in the payload have entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChannelSensors {
    sensors: BTreeMap<String, BTreeMap<u8, DecodedReading>>,
}

impl ChannelSensors {
    /// Store a channel reading. Returns `false` if its slot is taken.
    pub fn insert(&mut self, channel: u8, reading: DecodedReading) -> bool {
        let channels = self.sensors.entry(reading.sensor.clone()).or_default();
        insert_first(channels, channel, reading)
    }

    pub fn get(&self, sensor: &str, channel: u8) -> Option<&DecodedReading> {
        self.sensors.get(sensor).and_then(|channels| channels.get(&channel))
    }

    /// Populated channel indices of one sensor, ascending.
    pub fn channels(&self, sensor: &str) -> Vec<u8> {
        self.sensors
            .get(sensor)
            .map(|channels| channels.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn sensors(&self) -> impl Iterator<Item = &str> {
        self.sensors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8, &DecodedReading)> {
        self.sensors.iter().flat_map(|(sensor, channels)| {
            channels
                .iter()
                .map(move |(channel, reading)| (sensor.as_str(), *channel, reading))
        })
    }

    pub fn len(&self) -> usize {
        self.sensors.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Battery and radio state of one sensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorHealth {
    pub battery: Option<DecodedReading>,
    pub rssi: Option<DecodedReading>,
    pub signal: Option<DecodedReading>,
    pub voltage: Option<DecodedReading>,
}

/// Diagnostics by sensor identifier (`wh65`, `wh41_ch2`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SensorDiagnostics {
    sensors: BTreeMap<String, SensorHealth>,
}

impl SensorDiagnostics {
    /// Identifier a diagnostic reading is filed under.
    pub fn identifier(reading: &DecodedReading) -> String {
        match reading.channel {
            Some(channel) => format!("{}_ch{}", reading.sensor, channel),
            None => reading.sensor.clone(),
        }
    }

    /// Store a diagnostic reading. Returns `false` if its slot is taken.
    pub fn insert(&mut self, reading: DecodedReading) -> bool {
        let health = self.sensors.entry(Self::identifier(&reading)).or_default();
        let slot = match (reading.kind, reading.unit) {
            (QuantityKind::BatteryLevel | QuantityKind::BatteryBinary, _) => &mut health.battery,
            (QuantityKind::SignalStrength, Unit::DecibelMilliwatt) => &mut health.rssi,
            (QuantityKind::SignalStrength, _) => &mut health.signal,
            _ => &mut health.voltage,
        };
        fill(slot, reading)
    }

    pub fn get(&self, identifier: &str) -> Option<&SensorHealth> {
        self.sensors.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SensorHealth)> {
        self.sensors.iter().map(|(id, health)| (id.as_str(), health))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// Everything one payload said about one station.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceData {
    pub unit_system: UnitSystem,
    pub device_info: DeviceInfo,
    pub weather: WeatherData,
    pub channels: ChannelSensors,
    pub diagnostics: SensorDiagnostics,
    pub iot_devices: Vec<IoTDevice>,
}

/// Result of a decode pass: the structured data plus per-key problems.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodeOutcome {
    pub data: DeviceData,
    pub failures: Vec<DecodeFailure>,
    pub unknown_keys: Vec<String>,
    /// Keys that decoded but lost their slot to a preferred reading.
    pub superseded_keys: Vec<String>,
}

impl DecodeOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn fill<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

fn insert_first<K: Ord, V>(map: &mut BTreeMap<K, V>, key: K, value: V) -> bool {
    if map.contains_key(&key) {
        return false;
    }
    map.insert(key, value);
    true
}
