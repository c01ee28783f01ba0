//! # ga4m-client
//!
//! Client-side library for submitting structured events to a GA4
//! Measurement Protocol collect endpoint.
//!
//! The pipeline is: reconstruct a [`Session`] from cookies (see
//! `ga4m-session`), validate event names and parameters locally, assemble
//! one envelope with derived parameters injected, and hand it to an
//! [`EventSink`]. Validation failures never reach the network; transport
//! and server errors are surfaced to the caller unchanged. No retries, no
//! rate limiting, no persistence.

pub mod client;
pub mod errors;
pub mod event;
pub mod options;
pub mod transport;
pub mod validation;

pub use client::AnalyticsClient;
pub use errors::{AnalyticsError, AnalyticsResult};
pub use event::{AnalyticsEvent, EventParams};
pub use ga4m_session::Session;
pub use options::SendOptions;
pub use transport::{ClientConfig, EventSink, HttpSink};
