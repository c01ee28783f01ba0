//! Per-call send configuration.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ga4m_session::Session;

/// Optional per-call settings for a send. Ephemeral: built for one call and
/// discarded. All fields default to unset.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Route the payload to the debug validation endpoint.
    pub debug: bool,
    /// User ID attached at the envelope top level.
    pub user_id: Option<String>,
    /// Explicit event timestamp; converted to microseconds on the wire.
    pub timestamp: Option<DateTime<Utc>>,
    /// Explicit session id, overriding the one carried by the [`Session`].
    pub session_id: Option<String>,
    /// Per-call transport timeout, overriding the client default.
    pub timeout: Option<Duration>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Session id to inject into outgoing events: the explicit override
    /// wins, then the session's own id, then nothing.
    pub(crate) fn resolve_session_id<'a>(&'a self, session: &'a Session) -> Option<&'a str> {
        match self.session_id.as_deref() {
            Some(id) => Some(id),
            None if !session.session_id.is_empty() => Some(&session.session_id),
            None => None,
        }
    }
}
