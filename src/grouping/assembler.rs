/// Partition of a decoded reading set into the output groups
use log::debug;

use crate::grouping::groups::{
    ChannelSensors, DeviceData, DeviceInfo, SensorDiagnostics, WeatherData,
};
use crate::models::{DecodedReading, DisplayGroup, UnitSystem};

/// Order in which readings competing for one slot are tried.
///
/// Measured readings beat derived ones, readings already reported in the
/// target system beat converted ones, and key byte order settles the rest.
pub fn preference(reading: &DecodedReading) -> (bool, bool, &str) {
    (reading.derived, reading.native_unit != reading.unit, reading.key.as_str())
}

/// Grouped readings plus the keys that lost their slot to a preferred reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub data: DeviceData,
    pub superseded: Vec<String>,
}

/// Assemble readings into the station structure.
///
/// Every reading lands in exactly one group, chosen by its display group and
/// channel. When several readings fill the same slot, the most preferred one
/// is kept and the keys of the rest are listed in `superseded`. Groups
/// without readings stay empty.
pub fn assemble(mut readings: Vec<DecodedReading>, unit_system: UnitSystem) -> Assembly {
    readings.sort_by(|a, b| preference(a).cmp(&preference(b)));

    let mut device_info = DeviceInfo::default();
    let mut weather = WeatherData::default();
    let mut channels = ChannelSensors::default();
    let mut diagnostics = SensorDiagnostics::default();
    let mut superseded = Vec::new();

    for reading in readings {
        let key = reading.key.clone();
        let stored = match (reading.group, reading.channel) {
            (DisplayGroup::Diagnostic, _) => diagnostics.insert(reading),
            (DisplayGroup::DeviceMeta, _) => device_info.insert(reading),
            (_, Some(channel)) => channels.insert(channel, reading),
            (_, None) => weather.insert(reading),
        };
        if !stored {
            debug!("Dropping {}: slot already filled by a preferred reading", key);
            superseded.push(key);
        }
    }
    superseded.sort();

    let data = DeviceData {
        unit_system,
        device_info,
        weather,
        channels,
        diagnostics,
        iot_devices: Vec::new(),
    };
    Assembly { data, superseded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode_readings, derive_missing, Payload};
    use crate::models::Unit;

    fn assemble_payload(pairs: &[(&str, &str)], system: UnitSystem) -> DeviceData {
        let payload: Payload = pairs.iter().copied().collect();
        let mut readings = decode_readings(&payload, system).readings;
        let derived = derive_missing(&readings, system);
        readings.extend(derived);
        assemble(readings, system).data
    }

    #[test]
    fn partitions_by_group() {
        let data = assemble_payload(
            &[
                ("stationtype", "GW2000A_V2.2.4"),
                ("PASSKEY", "0123456789ABCDEF"),
                ("dateutc", "2024-05-01 12:30:00"),
                ("runtime", "3600"),
                ("tempf", "72.5"),
                ("dailyrainin", "0.118"),
                ("drain_piezo", "0.2"),
                ("pm25_ch1", "8"),
                ("wh65batt", "0"),
                ("pm25_ch1_rssi", "-80"),
                ("pm25batt1", "5"),
            ],
            UnitSystem::Metric,
        );

        assert_eq!(data.device_info.version.as_deref(), Some("GW2000A_V2.2.4"));
        assert_eq!(data.device_info.identifier.as_deref(), Some("0123456789ABCDEF"));
        assert!(data.device_info.observed_at.is_some());
        assert!(data.device_info.attributes.contains_key("runtime"));

        assert!(data.weather.temperature.is_some());
        assert_eq!(data.weather.rain.daily.as_ref().unwrap().unit, Unit::Millimeter);
        assert!(data.weather.piezo_rain.daily.is_some());
        assert!(data.weather.get("piezo_daily_rain").is_some());

        assert_eq!(data.channels.channels("pm25"), vec![1]);

        assert!(data.diagnostics.get("wh65").unwrap().battery.is_some());
        let wh41 = data.diagnostics.get("wh41_ch1").unwrap();
        assert!(wh41.rssi.is_some());
        assert_eq!(wh41.battery.as_ref().unwrap().number(), Some(100.0));
    }

    #[test]
    fn prefers_readings_native_to_the_target_system() {
        let metric = assemble_payload(&[("tempf", "72.0"), ("tempc", "22.3")], UnitSystem::Metric);
        let temperature = metric.weather.temperature.unwrap();
        assert_eq!(temperature.key, "tempc");
        assert_eq!(temperature.number(), Some(22.3));

        let imperial =
            assemble_payload(&[("tempf", "72.0"), ("tempc", "22.3")], UnitSystem::Imperial);
        assert_eq!(imperial.weather.temperature.unwrap().key, "tempf");
    }

    #[test]
    fn measured_readings_beat_derived_ones() {
        let data = assemble_payload(
            &[("tempc", "20"), ("humidity", "50"), ("dewpointf", "50")],
            UnitSystem::Metric,
        );
        let dew_point = data.weather.dew_point.unwrap();
        assert_eq!(dew_point.key, "dewpointf");
        assert!(!dew_point.derived);
    }

    #[test]
    fn losing_readings_are_listed() {
        let payload = Payload::from([("tempf", "72.0"), ("tempc", "22.3"), ("humidity", "40")]);
        let readings = decode_readings(&payload, UnitSystem::Metric).readings;

        let assembly = assemble(readings, UnitSystem::Metric);
        assert_eq!(assembly.superseded, vec!["tempf"]);
        assert_eq!(assembly.data.weather.temperature.unwrap().key, "tempc");
    }

    #[test]
    fn empty_groups_are_empty_not_absent() {
        let data = assemble_payload(&[("tempf", "50")], UnitSystem::Metric);
        assert!(data.channels.is_empty());
        assert!(data.diagnostics.is_empty());
        assert!(data.iot_devices.is_empty());
        assert!(data.weather.rain.is_empty());
        assert_eq!(data.channels.iter().count(), 0);
    }
}
