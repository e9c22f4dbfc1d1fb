//! Body serialization utilities.

use bytes::Bytes;

use crate::{Error, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain`), used for AQL queries.
    PlainText,
    /// Binary content type (`application/octet-stream`), used for deploys.
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// `None` fields marked `skip_serializing_if` are left out.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use artifactory_rest_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Listing {
///     #[serde(skip_serializing_if = "Option::is_none")]
///     deep: Option<u8>,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     depth: Option<u32>,
/// }
///
/// let query = to_query_string(&Listing { deep: Some(1), depth: None }).expect("serialize");
/// assert_eq!(query, "deep=1");
/// ```
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "files[0].size").
///
/// # Example
///
/// ```
/// use artifactory_rest_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Version { version: String }
///
/// let version: Version = from_json(br#"{"version":"7.77.3"}"#).expect("deserialize");
/// assert_eq!(version.version, "7.77.3");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::json_deserialization(e.path().to_string(), e.inner().to_string()))
}

/// Deserialize JSON bytes, optionally unwrapping one top-level field first.
///
/// With `selector = Some("properties")`, `{"properties": {...}, "uri": ...}`
/// is decoded from the inner object only.
///
/// # Errors
///
/// Returns an error if the body is not JSON, the selected field is missing,
/// or the selected value does not match `T`.
pub fn select_json<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
    selector: Option<&str>,
) -> Result<T> {
    let Some(field) = selector else {
        return from_json(bytes);
    };

    let mut document: serde_json::Value = from_json(bytes)?;
    let selected = document
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| Error::json_deserialization(field, format!("missing field `{field}`")))?;

    serde_path_to_error::deserialize(selected).map_err(|e| {
        let path = e.path().to_string();
        let path = if path == "." {
            field.to_string()
        } else {
            format!("{field}.{path}")
        };
        Error::json_deserialization(path, e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::PlainText.as_str(), "text/plain");
        assert_eq!(
            ContentType::OctetStream.to_string(),
            "application/octet-stream"
        );
    }

    #[test]
    fn query_string_skips_none() {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Listing {
            #[serde(skip_serializing_if = "Option::is_none")]
            list_folders: Option<u8>,
            #[serde(skip_serializing_if = "Option::is_none")]
            include_root_path: Option<u8>,
        }

        let query = to_query_string(&Listing {
            list_folders: Some(1),
            include_root_path: None,
        })
        .expect("serialize");
        assert_eq!(query, "listFolders=1");
    }

    #[test]
    fn from_json_reports_field_path() {
        #[derive(Debug, serde::Deserialize)]
        struct File {
            #[allow(dead_code)]
            size: u64,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Listing {
            #[allow(dead_code)]
            files: Vec<File>,
        }

        let err = from_json::<Listing>(br#"{"files":[{"size":"big"}]}"#).expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("files[0].size"), "unexpected message: {msg}");
    }

    #[test]
    fn select_json_unwraps_field() {
        let body = br#"{"uri":"http://host/api/storage/libs/a","properties":{"os":["linux"]}}"#;
        let properties: BTreeMap<String, Vec<String>> =
            select_json(body, Some("properties")).expect("select");

        assert_eq!(properties.get("os"), Some(&vec!["linux".to_string()]));
    }

    #[test]
    fn select_json_keeps_object_order() {
        let body = br#"{"properties":{"zeta":["1"],"mid":["2"],"alpha":["3"]}}"#;
        let selected: serde_json::Map<String, serde_json::Value> =
            select_json(body, Some("properties")).expect("select");

        let keys: Vec<&str> = selected.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "mid", "alpha"]);
    }

    #[test]
    fn select_json_missing_field() {
        let err = select_json::<BTreeMap<String, Vec<String>>>(br#"{"uri":"x"}"#, Some("properties"))
            .expect_err("should fail");
        assert!(matches!(err, Error::JsonDeserialization { ref path, .. } if path == "properties"));
    }

    #[test]
    fn select_json_without_selector_decodes_whole_body() {
        let value: serde_json::Value = select_json(br#"{"a":1}"#, None).expect("decode");
        assert_eq!(value["a"], 1);
    }
}
