use serde::{Deserialize, Serialize};

/// Server version (`GET /api/system/version`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Release, e.g. `7.77.3`.
    pub version: String,
    /// Build revision.
    pub revision: String,
    /// Enabled add-ons. Absent or `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub addons: Vec<String>,
    /// License hash or edition.
    #[serde(default)]
    pub license: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
