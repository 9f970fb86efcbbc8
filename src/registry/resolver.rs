/// Key resolution: verbatim lookups plus `<prefix><index><suffix>` channel patterns
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::SensorDefinition;
use crate::registry::table::{ChannelSpec, KeySpec, CHANNEL_KEYS, FIXED_KEYS, MAX_CHANNEL};

/// Prefix shared by every key of an IoT device cluster (`dev_id1`, `dev_state1`, ...).
pub const IOT_KEY_PREFIX: &str = "dev_";

/// Attribute names that may follow [`IOT_KEY_PREFIX`].
pub const IOT_ATTRIBUTES: &[&str] = &[
    "id", "model", "state", "nickname", "rfnet", "rssi", "batt", "running", "runtime", "total",
    "flow", "voltage", "position",
];

/// Read-only map from protocol keys to sensor definitions.
///
/// Lookups never fail: a key the registry does not know yields `None` and is
/// meant to be skipped, since station firmware keeps adding keys.
#[derive(Debug)]
pub struct SensorRegistry {
    fixed: HashMap<&'static str, &'static KeySpec>,
    patterns: Vec<&'static ChannelSpec>,
}

impl SensorRegistry {
    fn build() -> Self {
        let fixed = FIXED_KEYS.iter().map(|spec| (spec.key, spec)).collect();

        // Longest prefix first so resolution order never depends on table order
        let mut patterns: Vec<&'static ChannelSpec> = CHANNEL_KEYS.iter().collect();
        patterns.sort_by(|a, b| {
            b.prefix
                .len()
                .cmp(&a.prefix.len())
                .then_with(|| b.suffix.len().cmp(&a.suffix.len()))
                .then_with(|| a.prefix.cmp(b.prefix))
                .then_with(|| a.suffix.cmp(b.suffix))
        });

        SensorRegistry { fixed, patterns }
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static SensorRegistry {
        static REGISTRY: OnceLock<SensorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(SensorRegistry::build)
    }

    /// Resolve a protocol key to its definition.
    ///
    /// Channel keys carry the parsed index in [`SensorDefinition::channel`].
    pub fn lookup(&self, key: &str) -> Option<SensorDefinition> {
        if let Some(spec) = self.fixed.get(key) {
            return Some(fixed_definition(spec));
        }

        self.patterns.iter().find_map(|spec| {
            split_channel(key, spec.prefix, spec.suffix)
                .filter(|channel| *channel <= spec.max_channel)
                .map(|channel| channel_definition(spec, channel))
        })
    }

    /// Every key the registry resolves, channel keys expanded, sorted.
    pub fn known_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fixed.keys().map(|key| key.to_string()).collect();
        for spec in &self.patterns {
            for channel in 1..=spec.max_channel {
                keys.push(format!("{}{}{}", spec.prefix, channel, spec.suffix));
            }
        }
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.fixed.len()
            + self
                .patterns
                .iter()
                .map(|spec| spec.max_channel as usize)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fixed_definition(spec: &KeySpec) -> SensorDefinition {
    SensorDefinition {
        sensor: spec.sensor,
        label: spec.label,
        kind: spec.kind,
        native_unit: spec.unit,
        group: spec.group,
        channel: None,
    }
}

fn channel_definition(spec: &ChannelSpec, channel: u8) -> SensorDefinition {
    SensorDefinition {
        sensor: spec.sensor,
        label: spec.label,
        kind: spec.kind,
        native_unit: spec.unit,
        group: spec.group,
        channel: Some(channel),
    }
}

/// Extract the channel index from `<prefix><index><suffix>`.
///
/// The index must be written canonically (no sign, no leading zero) and lie
/// within 1..=[`MAX_CHANNEL`].
pub fn split_channel(key: &str, prefix: &str, suffix: &str) -> Option<u8> {
    let digits = key.strip_prefix(prefix)?.strip_suffix(suffix)?;
    parse_index(digits)
}

fn parse_index(digits: &str) -> Option<u8> {
    if digits.is_empty() || digits.len() > 2 || digits.starts_with('0') {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u8>()
        .ok()
        .filter(|index| (1..=MAX_CHANNEL).contains(index))
}

/// Split an IoT cluster key such as `dev_state2` into `("state", 2)`.
pub fn parse_iot_key(key: &str) -> Option<(&'static str, u8)> {
    let rest = key.strip_prefix(IOT_KEY_PREFIX)?;
    let split = rest.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (name, digits) = rest.split_at(split);
    let index = parse_index(digits)?;
    IOT_ATTRIBUTES
        .iter()
        .find(|attribute| **attribute == name)
        .map(|attribute| (*attribute, index))
}

pub fn is_iot_key(key: &str) -> bool {
    parse_iot_key(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayGroup, QuantityKind, Unit};
    use std::collections::HashSet;

    #[test]
    fn resolves_fixed_keys() {
        let definition = SensorRegistry::global().lookup("tempf").unwrap();
        assert_eq!(definition.sensor, "temperature");
        assert_eq!(definition.kind, QuantityKind::Temperature);
        assert_eq!(definition.native_unit, Unit::Fahrenheit);
        assert_eq!(definition.group, DisplayGroup::Primary);
        assert_eq!(definition.channel, None);
    }

    #[test]
    fn resolves_channel_keys_by_stripping_the_index() {
        let registry = SensorRegistry::global();

        let soil = registry.lookup("soilmoisture3").unwrap();
        assert_eq!(soil.sensor, "soil_moisture");
        assert_eq!(soil.channel, Some(3));

        let temp = registry.lookup("temp7c").unwrap();
        assert_eq!(temp.sensor, "temperature");
        assert_eq!(temp.native_unit, Unit::Celsius);
        assert_eq!(temp.channel, Some(7));

        let rssi = registry.lookup("pm25_ch2_rssi").unwrap();
        assert_eq!(rssi.sensor, "wh41");
        assert_eq!(rssi.kind, QuantityKind::SignalStrength);
        assert_eq!(rssi.channel, Some(2));

        let pm = registry.lookup("pm25_ch2").unwrap();
        assert_eq!(pm.sensor, "pm25");
        assert_eq!(pm.group, DisplayGroup::Channel);
    }

    #[test]
    fn rejects_out_of_range_and_non_canonical_indices() {
        let registry = SensorRegistry::global();
        assert!(registry.lookup("humidity9").is_none());
        assert!(registry.lookup("soilmoisture17").is_none());
        assert!(registry.lookup("soilmoisture0").is_none());
        assert!(registry.lookup("soilmoisture01").is_none());
        assert!(registry.lookup("temp1").is_none());
        assert!(registry.lookup("pm25_ch5").is_none());
    }

    #[test]
    fn unknown_keys_are_not_found() {
        let registry = SensorRegistry::global();
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("totally_new_sensor").is_none());
        assert!(registry.lookup("TEMPF").is_none());
    }

    #[test]
    fn every_known_key_resolves_to_exactly_one_definition() {
        let registry = SensorRegistry::global();
        let keys = registry.known_keys();
        assert_eq!(keys.len(), registry.len());

        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len(), "expanded channel keys collide");

        for key in &keys {
            let matches = CHANNEL_KEYS
                .iter()
                .filter(|spec| {
                    split_channel(key, spec.prefix, spec.suffix)
                        .is_some_and(|channel| channel <= spec.max_channel)
                })
                .count()
                + usize::from(FIXED_KEYS.iter().any(|spec| spec.key == key.as_str()));
            assert_eq!(matches, 1, "{key} is ambiguous");
            assert!(registry.lookup(key).is_some(), "{key} does not resolve");
        }
    }

    #[test]
    fn channel_groups_carry_indices() {
        let registry = SensorRegistry::global();
        for key in registry.known_keys() {
            let definition = registry.lookup(&key).unwrap();
            match definition.group {
                DisplayGroup::Channel => assert!(definition.channel.is_some(), "{key}"),
                DisplayGroup::Primary | DisplayGroup::DeviceMeta => {
                    assert!(definition.channel.is_none(), "{key}")
                }
                DisplayGroup::Diagnostic => {}
            }
        }
    }

    #[test]
    fn parses_iot_cluster_keys() {
        assert_eq!(parse_iot_key("dev_id1"), Some(("id", 1)));
        assert_eq!(parse_iot_key("dev_state12"), Some(("state", 12)));
        assert_eq!(parse_iot_key("dev_runtime3"), Some(("runtime", 3)));
        assert_eq!(parse_iot_key("dev_running3"), Some(("running", 3)));
        assert_eq!(parse_iot_key("dev_id"), None);
        assert_eq!(parse_iot_key("dev_colour1"), None);
        assert_eq!(parse_iot_key("dev_id0"), None);
        assert!(!is_iot_key("tempf"));
    }

    #[test]
    fn iot_keys_are_not_sensor_keys() {
        let registry = SensorRegistry::global();
        assert!(registry.known_keys().iter().all(|key| !is_iot_key(key)));
    }
}
