//! Decoding and normalization of weather station push payloads.
//!
//! A station uploads flat form-encoded key/value pairs. [`decode`] resolves
//! every key against the sensor registry, parses and converts its value into
//! one unit system, and groups the result into device info, primary weather
//! readings, channel sensors, diagnostics and IoT devices.

pub mod command;
pub mod config;
pub mod decoder;
pub mod error;
pub mod grouping;
pub mod models;
pub mod registry;
pub mod units;
pub mod utils;

use log::debug;

pub use command::{encode_switch, ControlPayload};
pub use decoder::Payload;
pub use error::{CommandError, ConfigError, DecodeError};
pub use grouping::{DecodeOutcome, DeviceData, IoTDevice, IotModel};
pub use models::{DecodedReading, QuantityKind, ReadingValue, Unit, UnitSystem};

/// Per-pass decode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unit_system: UnitSystem,
    /// Compute dew point, feels-like, wind chill and illuminance when the
    /// station did not report them.
    pub derive_missing: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            unit_system: UnitSystem::Metric,
            derive_missing: true,
        }
    }
}

impl DecodeOptions {
    pub fn new(unit_system: UnitSystem) -> Self {
        DecodeOptions {
            unit_system,
            ..Default::default()
        }
    }
}

/// Run one decode pass over `payload`.
///
/// Never fails as a whole: readings that decode are returned, every key that
/// does not is listed in the outcome's failures or unknown keys.
pub fn decode(payload: &Payload, options: &DecodeOptions) -> DecodeOutcome {
    let system = options.unit_system;
    let mut pass = decoder::decode_readings(payload, system);

    if options.derive_missing {
        let derived = decoder::derive_missing(&pass.readings, system);
        pass.readings.extend(derived);
    }

    let scan = grouping::scan_iot_devices(payload);
    let assembly = grouping::assemble(pass.readings, system);
    let mut data = assembly.data;
    data.iot_devices = scan.devices;

    let mut failures = pass.failures;
    failures.extend(scan.failures);
    failures.sort_by(|a, b| a.key.cmp(&b.key));

    debug!(
        "Decoded {} keys: {} failures, {} unknown",
        payload.len(),
        failures.len(),
        pass.unknown_keys.len()
    );

    DecodeOutcome {
        data,
        failures,
        unknown_keys: pass.unknown_keys,
        superseded_keys: assembly.superseded,
    }
}

/// Parse a form-encoded body and decode it.
pub fn decode_form(body: &str, options: &DecodeOptions) -> DecodeOutcome {
    decode(&Payload::from_form(body), options)
}
