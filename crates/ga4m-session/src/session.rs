//! Session model — an immutable snapshot of one browser's GA4 identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known key under which request frameworks stash the parsed session
/// for downstream handlers. Attachment is unconditional: an empty session
/// is stored like any other, so consumers can always rely on the key being
/// present.
pub const CONTEXT_KEY: &str = "ga4m.session";

/// GA4 session tracking data for one user, reconstructed from cookies.
///
/// Constructed fresh on every inbound request and never mutated afterwards.
/// A session with nothing parsed equals `Session::default()`; use
/// [`Session::is_empty`] to test for "no analytics identity present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Client ID from the `_ga` cookie, `"<numeric-id>.<unix-epoch>"`.
    pub client_id: String,
    /// Schema version from the `_ga` cookie (e.g. "1").
    pub client_version: String,
    /// First-visit timestamp from the `_ga` cookie's trailing epoch field.
    pub first_visit: Option<DateTime<Utc>>,

    /// Identifier of the current session from the `_ga_*` cookie.
    pub session_id: String,
    /// Schema version from the `_ga_*` cookie.
    pub session_version: String,
    /// Ordinal count of sessions for this client.
    pub session_count: u32,
    /// Last-activity timestamp.
    pub last_session: Option<DateTime<Utc>>,
    /// Number of hits/interactions in the current session.
    pub hit_count: u32,
    /// Whether the user is actively engaged.
    pub is_engaged: bool,
    /// Whether this is the user's first session.
    pub is_first_session: bool,
    /// Whether this is a new session.
    pub is_new_session: bool,
}

impl Session {
    /// Whether no cookie field parsed successfully.
    pub fn is_empty(&self) -> bool {
        *self == Session::default()
    }
}

/// Pick the most recently active session from a slice.
///
/// Returns `Session::default()` for an empty slice. Ties on `last_session`
/// keep the earliest-indexed element: only a strictly later timestamp
/// replaces the current best.
pub fn latest(sessions: &[Session]) -> Session {
    let mut iter = sessions.iter();
    let Some(first) = iter.next() else {
        return Session::default();
    };
    let mut best = first;
    for session in iter {
        if session.last_session > best.last_session {
            best = session;
        }
    }
    best.clone()
}
