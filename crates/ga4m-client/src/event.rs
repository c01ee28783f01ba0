//! Wire types for the Measurement Protocol collect endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One named analytics event with its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
    /// Event-level timestamp in microseconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_micros: Option<i64>,
}

impl EventParams {
    /// Create an event with a name and parameters, no explicit timestamp.
    pub fn new(name: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            params,
            timestamp_micros: None,
        }
    }
}

/// The request envelope POSTed to the collect endpoint.
///
/// Built only by the client, which guarantees a non-empty `client_id` and
/// 1..=25 events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub client_id: String,
    pub events: Vec<EventParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_micros: Option<i64>,
}
