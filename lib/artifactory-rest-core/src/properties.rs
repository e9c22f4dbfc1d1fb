//! Property collections and their wire encoding.
//!
//! Artifactory attaches multi-valued properties to stored items. On the
//! wire a property travels as `key=value1,value2`: values are joined with
//! `,`, spaces become `%20`, keys are trimmed and entries whose key is
//! blank are dropped.
//!
//! # Example
//!
//! ```
//! use artifactory_rest_core::{PropertyCodec, PropertyMap};
//!
//! let map = PropertyMap::from_iter([
//!     ("key1", vec!["value1"]),
//!     ("key2", vec!["value2", "value3"]),
//! ]);
//!
//! let encoded = PropertyCodec::encode_map(&map);
//! assert_eq!(encoded[1].key(), "key2");
//! assert_eq!(encoded[1].value(), "value2,value3");
//! ```

use std::fmt::{self, Write as _};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{Error, Result};

/// Characters escaped when an encoded property is placed in a query or
/// matrix parameter. `%` and `,` are left alone: they are part of the
/// property convention itself.
const PROPERTY_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// Property Map
// ============================================================================

/// Ordered mapping from property key to its values.
///
/// Keys are stored as given. Trimming and blank-key removal happen when
/// the map is encoded, so `len` counts entries before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl PropertyMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the values for `key`, keeping its original position.
    pub fn insert<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        let values = values.into_iter().map(Into::into).collect();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Values for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K, I, V> FromIterator<(K, I)> for PropertyMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, I, V> Extend<(K, I)> for PropertyMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, values) in iter {
            self.insert(key, values);
        }
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// A property value as the server may send it.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireValues {
    Many(Vec<Option<String>>),
    One(String),
    Null(()),
}

impl From<WireValues> for Vec<String> {
    fn from(values: WireValues) -> Self {
        match values {
            WireValues::Many(values) => values.into_iter().map(Option::unwrap_or_default).collect(),
            WireValues::One(value) => vec![value],
            WireValues::Null(()) => Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PropertyMapVisitor;

        impl<'de> Visitor<'de> for PropertyMapVisitor {
            type Value = PropertyMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property keys to value lists")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut map = PropertyMap::new();
                while let Some((key, values)) = access.next_entry::<String, WireValues>()? {
                    map.insert(key, Vec::from(values));
                }
                Ok(map)
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(PropertyMap::new())
            }
        }

        deserializer.deserialize_any(PropertyMapVisitor)
    }
}

// ============================================================================
// Property List
// ============================================================================

/// Ordered list of property keys, used to delete properties by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyList {
    keys: Vec<String>,
}

impl PropertyList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Append a key.
    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the list has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<K> for PropertyList {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Properties (binder input)
// ============================================================================

/// A structured property argument handed to a [`Binder`](crate::Binder).
///
/// Each binder accepts exactly one shape and rejects the other with
/// [`Error::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Properties {
    /// Keys with their values.
    Map(PropertyMap),
    /// Keys only.
    List(PropertyList),
}

impl Properties {
    /// Borrow the map, checking shape then size.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a list, [`Error::EmptyInput`] for a map
    /// without entries.
    pub fn as_map(&self) -> Result<&PropertyMap> {
        match self {
            Self::Map(map) if map.is_empty() => {
                Err(Error::empty_input("properties map cannot be empty"))
            }
            Self::Map(map) => Ok(map),
            Self::List(_) => Err(Error::invalid_input("binder is only valid for a property map")),
        }
    }

    /// Borrow the list, checking shape then size.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a map, [`Error::EmptyInput`] for a list
    /// without keys.
    pub fn as_list(&self) -> Result<&PropertyList> {
        match self {
            Self::List(list) if list.is_empty() => {
                Err(Error::empty_input("properties list cannot be empty"))
            }
            Self::List(list) => Ok(list),
            Self::Map(_) => Err(Error::invalid_input("binder is only valid for a property list")),
        }
    }
}

impl From<PropertyMap> for Properties {
    fn from(map: PropertyMap) -> Self {
        Self::Map(map)
    }
}

impl From<PropertyList> for Properties {
    fn from(list: PropertyList) -> Self {
        Self::List(list)
    }
}

impl TryFrom<serde_json::Value> for Properties {
    type Error = Error;

    /// Objects become maps, arrays become lists. Anything else is not a
    /// property collection.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map(Self::Map)
                .map_err(|e| Error::invalid_input(format!("property map values: {e}"))),
            serde_json::Value::Array(_) => serde_json::from_value(value)
                .map(Self::List)
                .map_err(|e| Error::invalid_input(format!("property list keys: {e}"))),
            other => Err(Error::invalid_input(format!(
                "expected a property map or list, got {other}"
            ))),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// A property ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedParameter {
    key: String,
    value: String,
}

impl EncodedParameter {
    /// Trimmed property key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Comma-joined values with spaces as `%20`.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Key escaped for use inside a URL.
    #[must_use]
    pub fn wire_key(&self) -> String {
        utf8_percent_encode(&self.key, PROPERTY_SET).to_string()
    }

    /// Value escaped for use inside a URL, `%20` and `,` kept intact.
    #[must_use]
    pub fn wire_value(&self) -> String {
        utf8_percent_encode(&self.value, PROPERTY_SET).to_string()
    }
}

/// Encodes property collections to the Artifactory wire format and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyCodec;

impl PropertyCodec {
    /// Encode every entry whose trimmed key is not blank.
    ///
    /// When two keys trim to the same value, one parameter is produced at
    /// the first position and the later values win.
    #[must_use]
    pub fn encode_map(map: &PropertyMap) -> Vec<EncodedParameter> {
        let mut encoded: Vec<EncodedParameter> = Vec::with_capacity(map.len());
        for (raw_key, values) in map.iter() {
            let key = raw_key.trim();
            if key.is_empty() {
                debug!(key = raw_key, "dropping property with blank key");
                continue;
            }

            let value = Self::encode_value(values);
            match encoded.iter_mut().find(|param| param.key == key) {
                Some(existing) => existing.value = value,
                None => encoded.push(EncodedParameter {
                    key: key.to_string(),
                    value,
                }),
            }
        }
        encoded
    }

    /// Trim every key, dropping blank ones.
    #[must_use]
    pub fn encode_list(list: &PropertyList) -> Vec<String> {
        list.iter()
            .filter_map(|raw_key| {
                let key = raw_key.trim();
                if key.is_empty() {
                    debug!(key = raw_key, "dropping property with blank key");
                    None
                } else {
                    Some(key.to_string())
                }
            })
            .collect()
    }

    /// Join values with `,` and escape spaces as `%20`.
    ///
    /// Escaping is best effort: if it fails, the joined value is sent as is.
    #[must_use]
    pub fn encode_value(values: &[String]) -> String {
        let joined = values.join(",");
        escape_spaces(&joined).unwrap_or(joined)
    }

    /// Join trimmed keys with `,`, escaped for use inside a URL.
    #[must_use]
    pub fn wire_keys(keys: &[String]) -> String {
        let joined = Self::encode_value(keys);
        utf8_percent_encode(&joined, PROPERTY_SET).to_string()
    }

    /// Render parameters as matrix parameters: `;key1=value1;key2=value2`.
    #[must_use]
    pub fn to_matrix(params: &[EncodedParameter]) -> String {
        params.iter().fold(String::new(), |mut out, param| {
            let _ = write!(out, ";{}={}", param.wire_key(), param.wire_value());
            out
        })
    }

    /// Decode a JSON property document, optionally nested under `selector`.
    ///
    /// An empty body decodes to an empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON property document.
    pub fn decode(body: &[u8], selector: Option<&str>) -> Result<PropertyMap> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(PropertyMap::new());
        }
        crate::select_json(body, selector)
    }
}

fn escape_spaces(value: &str) -> std::result::Result<String, fmt::Error> {
    let mut out = String::with_capacity(value.len());
    for (index, part) in value.split(' ').enumerate() {
        if index > 0 {
            out.write_str("%20")?;
        }
        out.write_str(part)?;
    }
    Ok(out)
}
