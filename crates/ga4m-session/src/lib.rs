//! # ga4m-session
//!
//! Best-effort reconstruction of a Google Analytics 4 session from the
//! opaque `_ga` / `_ga_*` cookies carried on inbound HTTP requests.
//!
//! Cookie parsing is total: malformed or adversarial cookie values degrade
//! to partially- or fully-empty [`Session`] fields instead of errors, so
//! session reconstruction can never block request handling.

pub mod cookie;
pub mod session;

pub use cookie::{parse_session, session_from_cookies, CLIENT_COOKIE_NAME, SESSION_COOKIE_PREFIX};
pub use session::{latest, Session, CONTEXT_KEY};
