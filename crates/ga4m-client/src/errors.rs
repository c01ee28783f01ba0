//! Delivery error taxonomy.
//!
//! Validation errors are raised locally, before any network attempt;
//! transport and server errors are surfaced verbatim to the caller. The
//! client never retries or suppresses either kind.

/// Errors raised while validating or delivering analytics events.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("missing identity: session has no client id")]
    MissingIdentity,

    #[error("invalid event or parameter name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("too many events in batch: {count}, maximum is {max}")]
    TooManyEvents { count: usize, max: usize },

    #[error("transport failure: {source}")]
    TransportFailure {
        #[from]
        source: reqwest::Error,
    },

    #[error("rejected by server: HTTP {status}, body: {body}")]
    RejectedByServer { status: u16, body: String },
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
