/// Raw push payloads as received from a station
use std::collections::BTreeMap;

/// Flat key/value map of one station push.
///
/// Keys are kept in byte order so every walk over a payload is deterministic,
/// whatever order the station sent them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: BTreeMap<String, String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body or query string.
    ///
    /// When a key repeats, the first occurrence is kept.
    pub fn from_form(body: &str) -> Self {
        url::form_urlencoded::parse(body.trim().as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Insert a field unless the key is already present.
    ///
    /// Returns `false` when the field was ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.fields.contains_key(&key) {
            return false;
        }
        self.fields.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
