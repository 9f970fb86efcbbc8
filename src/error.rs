use thiserror::Error;

use crate::models::{QuantityKind, Unit};

/// Per-key decoding problems. None of these abort a decode pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed {kind} value {raw:?}: {reason}")]
    MalformedValue {
        kind: QuantityKind,
        raw: String,
        reason: String,
    },

    #[error("no conversion from {from} to {to} for {kind}")]
    UnsupportedUnitConversion {
        kind: QuantityKind,
        from: Unit,
        to: Unit,
    },

    #[error("IoT device {index} is missing its {field} key")]
    IncompleteIotDevice { index: u8, field: &'static str },
}

impl DecodeError {
    pub fn malformed(kind: QuantityKind, raw: &str, reason: impl Into<String>) -> Self {
        DecodeError::MalformedValue {
            kind,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Control command encoding errors. Encoding is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unsupported IoT device model: {0:?}")]
    UnsupportedDeviceModel(String),

    #[error("invalid IoT device id: {0:?}")]
    InvalidDeviceId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown unit system {0:?} (expected metric or imperial)")]
    InvalidUnitSystem(String),

    #[error("invalid value {value:?} for {name}")]
    InvalidFlag { name: String, value: String },
}
