use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Credential key to secret bytes, as handed to the secret store.
///
/// A fresh map is built for every projection and owned by the caller.
/// Iteration is sorted by key; the order carries no meaning.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionDetails {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ConnectionDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Value as UTF-8, `None` if missing or not valid UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<u8>> {
        self.entries
    }
}

// Values are secrets: only key names and sizes are printed.
impl std::fmt::Debug for ConnectionDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(k, v)| (k, format!("<{} bytes>", v.len()))),
            )
            .finish()
    }
}

/// Serialized as `key: base64(value)`, the shape of a Kubernetes `Secret.data`.
impl Serialize for ConnectionDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, &STANDARD.encode(value))?;
        }
        map.end()
    }
}

impl IntoIterator for ConnectionDetails {
    type Item = (String, Vec<u8>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_values() {
        let mut details = ConnectionDetails::new();
        details.insert("clientSecret", "s3cr3t");
        let rendered = format!("{details:?}");
        assert!(rendered.contains("clientSecret"));
        assert!(rendered.contains("<6 bytes>"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn get_str_rejects_invalid_utf8() {
        let mut details = ConnectionDetails::new();
        details.insert("raw", vec![0xff, 0xfe]);
        assert_eq!(details.get("raw"), Some(&[0xff, 0xfe][..]));
        assert_eq!(details.get_str("raw"), None);
    }
}
