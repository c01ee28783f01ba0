//! Naming and size constraints enforced before any network interaction.
//!
//! Both checks are pure. Each returns the first violation it encounters;
//! when several parameters are invalid at once, which one is reported
//! depends on map iteration order and is not part of the contract.

use std::collections::HashMap;

use crate::errors::{AnalyticsError, AnalyticsResult};

/// Maximum length of an event name.
pub const MAX_EVENT_NAME_LEN: usize = 40;
/// Maximum length of a parameter name.
pub const MAX_PARAM_NAME_LEN: usize = 40;
/// Maximum length of a parameter value.
pub const MAX_PARAM_VALUE_LEN: usize = 100;
/// Maximum number of parameters per event.
pub const MAX_EVENT_PARAMS: usize = 25;
/// Maximum number of events per batch request.
pub const MAX_BATCH_EVENTS: usize = 25;

/// Validate an event name: non-empty, at most 40 characters, an ASCII
/// letter followed by ASCII letters, digits, or underscores.
pub fn validate_event_name(name: &str) -> AnalyticsResult<()> {
    check_name(name, MAX_EVENT_NAME_LEN).map_err(|reason| AnalyticsError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Validate an event's parameter map: at most 25 entries, keys under the
/// same grammar as event names, values at most 100 characters.
pub fn validate_params(params: &HashMap<String, String>) -> AnalyticsResult<()> {
    if params.len() > MAX_EVENT_PARAMS {
        return Err(AnalyticsError::InvalidParams {
            reason: format!("events can have a maximum of {MAX_EVENT_PARAMS} parameters"),
        });
    }
    for (name, value) in params {
        if let Err(reason) = check_name(name, MAX_PARAM_NAME_LEN) {
            return Err(AnalyticsError::InvalidName {
                name: name.clone(),
                reason,
            });
        }
        if value.len() > MAX_PARAM_VALUE_LEN {
            return Err(AnalyticsError::InvalidParams {
                reason: format!(
                    "value for '{name}' exceeds maximum length of {MAX_PARAM_VALUE_LEN}"
                ),
            });
        }
    }
    Ok(())
}

/// Shared name grammar for event names and parameter keys.
fn check_name(name: &str, max_len: usize) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if name.len() > max_len {
        return Err(format!("name must be {max_len} characters or fewer"));
    }
    let mut chars = name.chars();
    // Non-empty, checked above.
    let first = chars.next().unwrap_or_default();
    if !first.is_ascii_alphabetic() {
        return Err("name must start with a letter".to_string());
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("name must contain only alphanumeric characters and underscores".to_string());
    }
    Ok(())
}
