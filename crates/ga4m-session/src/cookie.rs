//! Parsers for the two GA4 cookie value grammars.
//!
//! Both grammars are dot-separated. The client cookie (`_ga`) carries the
//! stable client identity; the per-property session cookie (`_ga_*`)
//! carries the current session state. Parsing is best-effort: every field
//! is accepted or skipped independently, and nothing here ever fails.

use chrono::{DateTime, Utc};

use crate::session::Session;

/// Name of the GA4 client-identity cookie.
pub const CLIENT_COOKIE_NAME: &str = "_ga";

/// Name prefix of the per-property GA4 session-state cookie.
pub const SESSION_COOKIE_PREFIX: &str = "_ga_";

/// Minimum dot-separated field count for a client cookie.
const CLIENT_COOKIE_MIN_FIELDS: usize = 4;

/// Field count of the session cookie grammar
/// (`GS1.<ver>.<sid>.<count>.<engaged>.<epoch>.<hits>.<first>.<new>`).
const SESSION_COOKIE_MIN_FIELDS: usize = 9;

/// Reconstruct a [`Session`] from raw cookie values.
///
/// Absent or malformed input yields partially- or fully-empty fields rather
/// than an error. An empty client value and empty session value together
/// yield `Session::default()`.
pub fn parse_session(client_cookie: &str, session_cookie: &str) -> Session {
    let mut session = Session::default();
    parse_client_cookie(client_cookie, &mut session);
    parse_session_cookie(session_cookie, &mut session);
    session
}

/// Reconstruct a [`Session`] from an iterator of cookie (name, value) pairs.
///
/// Takes the `_ga` cookie as the client value and the first cookie whose
/// name starts with `_ga_` (the bare `_ga` cookie itself does not match) as
/// the session value; any further `_ga_*` cookies are ignored.
pub fn session_from_cookies<'a, I>(cookies: I) -> Session
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut client_value: Option<&str> = None;
    let mut session_value: Option<&str> = None;
    for (name, value) in cookies {
        if name == CLIENT_COOKIE_NAME && client_value.is_none() {
            client_value = Some(value);
        } else if name.starts_with(SESSION_COOKIE_PREFIX) && session_value.is_none() {
            session_value = Some(value);
        }
    }
    parse_session(client_value.unwrap_or(""), session_value.unwrap_or(""))
}

/// Parse the client cookie, canonical form `GA1.<version>.<id>.<epoch>`.
///
/// Some deployments prepend extra fields, so the client id anchors on the
/// LAST two fields instead of fixed positions.
fn parse_client_cookie(value: &str, session: &mut Session) {
    if value.is_empty() {
        return;
    }
    let fields: Vec<&str> = value.split('.').collect();
    if fields.len() < CLIENT_COOKIE_MIN_FIELDS || !fields[0].starts_with("GA") {
        tracing::trace!("ga4m: client cookie did not match grammar, skipping");
        return;
    }

    if !fields[1].is_empty() {
        session.client_version = fields[1].to_string();
    }

    let epoch = fields[fields.len() - 1];
    let id_part = fields[fields.len() - 2];
    if !id_part.is_empty() && !epoch.is_empty() {
        session.client_id = format!("{id_part}.{epoch}");
    }

    session.first_visit = parse_epoch(epoch);
}

/// Parse the session cookie, exactly
/// `GS1.<ver>.<sid>.<count>.<engaged>.<epoch>.<hits>.<first>.<new>`.
///
/// Below the minimum field count the whole contribution is skipped; at or
/// above it, each field is accepted or skipped on its own.
fn parse_session_cookie(value: &str, session: &mut Session) {
    if value.is_empty() {
        return;
    }
    let fields: Vec<&str> = value.split('.').collect();
    if fields.len() < SESSION_COOKIE_MIN_FIELDS || !fields[0].starts_with("GS") {
        tracing::trace!("ga4m: session cookie did not match grammar, skipping");
        return;
    }

    if !fields[1].is_empty() {
        session.session_version = fields[1].to_string();
    }
    if !fields[2].is_empty() {
        session.session_id = fields[2].to_string();
    }
    if let Ok(count) = fields[3].parse::<u32>() {
        session.session_count = count;
    }
    if let Ok(engaged) = fields[4].parse::<i64>() {
        session.is_engaged = engaged == 1;
    }
    session.last_session = parse_epoch(fields[5]);
    if let Ok(hits) = fields[6].parse::<u32>() {
        session.hit_count = hits;
    }
    if let Ok(first) = fields[7].parse::<i64>() {
        session.is_first_session = first == 1;
    }
    if let Ok(new) = fields[8].parse::<i64>() {
        session.is_new_session = new == 1;
    }
}

/// Parse a unix-epoch field, accepting only plausible values: strictly
/// positive and not in the future. Guards against corrupt or adversarial
/// cookie values.
fn parse_epoch(field: &str) -> Option<DateTime<Utc>> {
    let ts = field.parse::<i64>().ok()?;
    if ts <= 0 || ts > Utc::now().timestamp() {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}
