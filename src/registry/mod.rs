pub mod resolver;
pub mod table;

pub use resolver::{is_iot_key, parse_iot_key, SensorRegistry, IOT_ATTRIBUTES, IOT_KEY_PREFIX};
pub use table::MAX_CHANNEL;

use crate::models::SensorDefinition;

/// Resolve a key against the process-wide registry.
pub fn lookup(key: &str) -> Option<SensorDefinition> {
    SensorRegistry::global().lookup(key)
}
