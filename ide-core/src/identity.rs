//! Identity records returned by the identity service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Numeric or textual identifier as issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(i64),
    /// Fractional or out-of-range numbers, kept exactly as received.
    OtherNumber(serde_json::Number),
    Text(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::OtherNumber(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ExternalId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// The authenticated caller, as reported by the identity service.
///
/// Only the listed fields are kept; anything else in the response body is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: ExternalId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "bool_or_null")]
    pub readonly: bool,
    /// The authoritative session token; may differ from the one presented.
    pub token: String,
}

fn bool_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
