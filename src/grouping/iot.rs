/// IoT device detection from `dev_<attribute><n>` key clusters
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::command::{encode_switch, ControlPayload};
use crate::decoder::parser::{parse_bool, parse_number};
use crate::decoder::Payload;
use crate::error::{CommandError, DecodeError};
use crate::models::{DecodeFailure, QuantityKind};
use crate::registry::{parse_iot_key, IOT_KEY_PREFIX};
use crate::utils::is_placeholder;

/// Controllable device models the vendor protocol knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum IotModel {
    /// Water valve with timer control.
    #[serde(rename = "WFC01")]
    Wfc01,
    /// Smart plug.
    #[serde(rename = "AC1100")]
    Ac1100,
    /// Water valve with position control.
    #[serde(rename = "WFC02")]
    Wfc02,
}

impl IotModel {
    pub const ALL: [IotModel; 3] = [IotModel::Wfc01, IotModel::Ac1100, IotModel::Wfc02];

    /// Numeric model code used on the wire.
    pub fn code(self) -> u8 {
        match self {
            Self::Wfc01 => 1,
            Self::Ac1100 => 2,
            Self::Wfc02 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wfc01 => "WFC01",
            Self::Ac1100 => "AC1100",
            Self::Wfc02 => "WFC02",
        }
    }

    /// Accepts a model name (any case) or its numeric code.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();
        Self::ALL.into_iter().find(|model| {
            model.name().eq_ignore_ascii_case(identifier)
                || identifier.parse::<u8>() == Ok(model.code())
        })
    }
}

impl FromStr for IotModel {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| CommandError::UnsupportedDeviceModel(s.to_string()))
    }
}

impl fmt::Display for IotModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A controllable device reported alongside the weather readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IoTDevice {
    /// Position of the device cluster in the payload (`dev_id<index>`).
    pub index: u8,
    pub id: String,
    /// Canonical model name when the model is known, the raw value otherwise.
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfnet_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl IoTDevice {
    pub fn known_model(&self) -> Option<IotModel> {
        IotModel::from_identifier(&self.model)
    }

    /// Command that switches this device on or off.
    pub fn switch_command(&self, on: bool) -> Result<ControlPayload, CommandError> {
        encode_switch(&self.id, &self.model, on)
    }
}

/// Result of the IoT sub-scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IotScan {
    pub devices: Vec<IoTDevice>,
    pub failures: Vec<DecodeFailure>,
}

/// Collect every IoT device cluster of `payload`, ordered by index.
///
/// A cluster needs its id, model and state keys; one missing any of them is
/// reported as a failure and skipped. Optional attributes that fail to parse
/// are reported but do not drop the device.
pub fn scan_iot_devices(payload: &Payload) -> IotScan {
    let mut clusters: BTreeMap<u8, BTreeMap<&'static str, (&str, &str)>> = BTreeMap::new();
    for (key, raw) in payload.iter() {
        if let Some((attribute, index)) = parse_iot_key(key) {
            clusters
                .entry(index)
                .or_default()
                .insert(attribute, (key, raw));
        }
    }

    let mut scan = IotScan::default();
    for (index, fields) in clusters {
        match build_device(index, &fields, &mut scan.failures) {
            Ok(device) => scan.devices.push(device),
            Err(failure) => {
                warn!("Skipping IoT device {}: {}", index, failure.reason);
                scan.failures.push(failure);
            }
        }
    }
    scan
}

type Fields<'a> = BTreeMap<&'static str, (&'a str, &'a str)>;

fn build_device(
    index: u8,
    fields: &Fields<'_>,
    failures: &mut Vec<DecodeFailure>,
) -> Result<IoTDevice, DecodeFailure> {
    let id = required(index, fields, "id")?.to_string();
    let raw_model = required(index, fields, "model")?;
    let state_raw = required(index, fields, "state")?;
    let state = parse_bool(state_raw)
        .map_err(|e| DecodeFailure::new(&iot_key("state", index), state_raw, e))?;

    let model = match IotModel::from_identifier(raw_model) {
        Some(model) => model.name().to_string(),
        None => {
            warn!("IoT device {} has unknown model {:?}", id, raw_model);
            raw_model.to_string()
        }
    };

    let mut optional = OptionalFields { fields, failures };
    Ok(IoTDevice {
        index,
        id,
        model,
        nickname: optional.text("nickname"),
        state,
        rfnet_state: optional.flag("rfnet"),
        rssi: optional.number("rssi", QuantityKind::SignalStrength),
        battery: optional.number("batt", QuantityKind::BatteryLevel),
        running: optional.flag("running"),
        run_time: optional.number("runtime", QuantityKind::RawNumeric),
        total: optional.number("total", QuantityKind::RawNumeric),
        flow: optional.number("flow", QuantityKind::RawNumeric),
        voltage: optional.number("voltage", QuantityKind::Voltage),
        position: optional.number("position", QuantityKind::RawNumeric),
    })
}

fn iot_key(attribute: &str, index: u8) -> String {
    format!("{}{}{}", IOT_KEY_PREFIX, attribute, index)
}

fn required<'a>(
    index: u8,
    fields: &Fields<'a>,
    field: &'static str,
) -> Result<&'a str, DecodeFailure> {
    let incomplete = DecodeError::IncompleteIotDevice { index, field };
    match fields.get(field).copied() {
        Some((_, raw)) if !is_placeholder(raw) => Ok(raw.trim()),
        Some((key, raw)) => Err(DecodeFailure::new(key, raw, incomplete)),
        None => Err(DecodeFailure::new(&iot_key(field, index), "", incomplete)),
    }
}

struct OptionalFields<'f, 'a> {
    fields: &'f Fields<'a>,
    failures: &'f mut Vec<DecodeFailure>,
}

impl<'f, 'a> OptionalFields<'f, 'a> {
    fn raw(&self, attribute: &str) -> Option<(&'a str, &'a str)> {
        self.fields
            .get(attribute)
            .copied()
            .filter(|(_, raw)| !is_placeholder(raw))
            .map(|(key, raw)| (key, raw.trim()))
    }

    fn text(&self, attribute: &str) -> Option<String> {
        self.raw(attribute).map(|(_, raw)| raw.to_string())
    }

    fn flag(&mut self, attribute: &str) -> Option<bool> {
        let (key, raw) = self.raw(attribute)?;
        self.record(key, raw, parse_bool(raw))
    }

    fn number(&mut self, attribute: &str, kind: QuantityKind) -> Option<f64> {
        let (key, raw) = self.raw(attribute)?;
        self.record(key, raw, parse_number(kind, raw))
    }

    fn record<T>(&mut self, key: &str, raw: &str, parsed: Result<T, DecodeError>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to decode {}={:?}: {}", key, raw, e);
                self.failures.push(DecodeFailure::new(key, raw, e));
                None
            }
        }
    }
}
