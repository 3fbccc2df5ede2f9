//! Clients for the two remote backends: intent classification and menu
//! fetching.
//!
//! Both are fail-soft: every failure kind maps to the documented default
//! return value, and the reason is only distinguishable through the shipped
//! error-level log entry.

pub mod intent;
pub mod menu;

pub use intent::{IntentClassifierClient, IntentResult};
pub use menu::{Menu, MenuClient};

use crate::domain::{FieldValue, Payload, RequestContext};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Elapsed wall-clock milliseconds, rounded to 3 decimal places, the way
/// every collaborator reports `latency_ms`.
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1_000_000.0).round() / 1000.0
}

/// Payload seeded with the caller identity fields every collaborator logs.
pub(crate) fn context_payload(ctx: &RequestContext) -> Payload {
    let mut payload = Payload::new();
    payload.insert("user".to_string(), FieldValue::from(ctx.user_id.clone()));
    payload.insert("channel".to_string(), FieldValue::from(ctx.channel.clone()));
    payload.insert(
        "session_id".to_string(),
        FieldValue::from(ctx.session_id.clone()),
    );
    payload
}
