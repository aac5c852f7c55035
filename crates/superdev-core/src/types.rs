//! Common types for superdev-core

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Free-form key/value payload attached to traces, steps, results and alerts
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metric tags
pub type Tags = HashMap<String, String>;

/// NewType pattern for Trace ID
///
/// Trace ids are usually chosen by the caller (a request id, an agent run id).
/// `TraceId::new` generates one when the caller has nothing better.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    /// Create a new random TraceId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TraceId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<String> for TraceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// NewType pattern for Alert ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    /// Build an alert id from the creation time (unix seconds) and a sequence number
    pub fn from_parts(unix_seconds: i64, sequence: u64) -> Self {
        Self(format!("alert_{}_{}", unix_seconds, sequence))
    }

    /// Create from existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}
