//! The analytics client: validates events, assembles the envelope, and
//! hands it to the sink.

use std::collections::HashMap;

use ga4m_session::Session;

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::event::{AnalyticsEvent, EventParams};
use crate::options::SendOptions;
use crate::transport::{ClientConfig, EventSink, HttpSink};
use crate::validation::{validate_event_name, validate_params, MAX_BATCH_EVENTS};

/// Default value for the injected `engagement_time_msec` parameter.
const DEFAULT_ENGAGEMENT_TIME_MSEC: &str = "100";

/// Client for sending events to a GA4 property.
///
/// Stateless across calls: validation and envelope assembly are pure, and a
/// send either fully succeeds or fully fails. Safe to share across threads.
pub struct AnalyticsClient {
    sink: Box<dyn EventSink>,
}

impl AnalyticsClient {
    /// Client delivering to the standard Google collect endpoints.
    pub fn new(
        measurement_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> AnalyticsResult<Self> {
        let sink = HttpSink::new(ClientConfig::new(measurement_id, api_secret))?;
        Ok(Self {
            sink: Box::new(sink),
        })
    }

    /// Client delivering to a caller-supplied sink.
    pub fn with_sink(sink: Box<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Send a single event on behalf of `session`.
    ///
    /// The session must carry a client id; the caller's params map is
    /// copied, never mutated. Validation failures are returned before the
    /// sink is touched.
    pub fn send_event(
        &self,
        session: &Session,
        name: &str,
        params: &HashMap<String, String>,
        opts: &SendOptions,
    ) -> AnalyticsResult<()> {
        if session.client_id.is_empty() {
            return Err(AnalyticsError::MissingIdentity);
        }
        validate_event_name(name)?;
        validate_params(params)?;

        let timestamp_micros = opts.timestamp.map(|t| t.timestamp_micros());
        let event = EventParams {
            name: name.to_string(),
            params: with_injected_params(params.clone(), session, opts),
            timestamp_micros,
        };

        let payload = AnalyticsEvent {
            client_id: session.client_id.clone(),
            events: vec![event],
            user_id: opts.user_id.clone(),
            timestamp_micros,
        };

        tracing::debug!("ga4m: sending event '{name}' for client {}", session.client_id);
        self.sink.send(&payload, opts.debug, opts.timeout)
    }

    /// Send up to 25 events in one batch request.
    ///
    /// Every event is validated before any is sent; there is no
    /// partial-batch success.
    pub fn send_events(
        &self,
        session: &Session,
        events: &[EventParams],
        opts: &SendOptions,
    ) -> AnalyticsResult<()> {
        if events.len() > MAX_BATCH_EVENTS {
            return Err(AnalyticsError::TooManyEvents {
                count: events.len(),
                max: MAX_BATCH_EVENTS,
            });
        }
        if session.client_id.is_empty() {
            return Err(AnalyticsError::MissingIdentity);
        }
        for event in events {
            validate_event_name(&event.name)?;
            validate_params(&event.params)?;
        }

        let timestamp_micros = opts.timestamp.map(|t| t.timestamp_micros());
        let events: Vec<EventParams> = events
            .iter()
            .map(|event| EventParams {
                name: event.name.clone(),
                params: with_injected_params(event.params.clone(), session, opts),
                // An event's own timestamp wins over the per-call option.
                timestamp_micros: event.timestamp_micros.or(timestamp_micros),
            })
            .collect();

        let payload = AnalyticsEvent {
            client_id: session.client_id.clone(),
            events,
            user_id: opts.user_id.clone(),
            timestamp_micros,
        };

        tracing::debug!(
            "ga4m: sending batch of {} events for client {}",
            payload.events.len(),
            session.client_id
        );
        self.sink.send(&payload, opts.debug, opts.timeout)
    }
}

/// Inject the derived parameters a collect payload needs: `session_id`
/// (explicit option over session-carried) and `engagement_time_msec`.
/// Caller-supplied values are left untouched.
fn with_injected_params(
    mut params: HashMap<String, String>,
    session: &Session,
    opts: &SendOptions,
) -> HashMap<String, String> {
    if let Some(session_id) = opts.resolve_session_id(session) {
        params
            .entry("session_id".to_string())
            .or_insert_with(|| session_id.to_string());
    }
    params
        .entry("engagement_time_msec".to_string())
        .or_insert_with(|| DEFAULT_ENGAGEMENT_TIME_MSEC.to_string());
    params
}
