use super::envelope::{PushEnvelope, now_nanos};
use super::labels::{build_label_set, parse_static_labels};
use crate::config::LokiConfig;
use crate::domain::LogEvent;
use reqwest::header::HeaderValue;
use reqwest::{Client, ClientBuilder};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Tenant-scope header understood by the aggregation backend.
const TENANT_HEADER: &str = "X-Scope-OrgID";

#[derive(Error, Debug)]
pub enum ShipError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Client for the log-aggregation push endpoint.
///
/// Holds the pre-built HTTP client, the parsed static label set and the
/// tenant header. All state is resolved at construction and immutable
/// afterwards; cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LogShipper {
    client: Client,
    endpoint: Option<Url>,
    tenant: HeaderValue,
    static_labels: Vec<(String, String)>,
}

impl LogShipper {
    pub fn new(config: &LokiConfig) -> Result<Self, ShipError> {
        let endpoint = config
            .url
            .as_deref()
            .map(|raw| {
                raw.parse::<Url>().map_err(|e| {
                    ShipError::InvalidConfiguration(format!("Invalid push URL '{raw}': {e}"))
                })
            })
            .transpose()?;

        let tenant = HeaderValue::from_str(&config.tenant).map_err(|e| {
            ShipError::InvalidConfiguration(format!("Invalid tenant id '{}': {e}", config.tenant))
        })?;

        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ShipError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            tenant,
            static_labels: parse_static_labels(&config.static_labels),
        })
    }

    /// Whether a push endpoint is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Deliver one event, best-effort. Every failure is dropped here; the
    /// caller's flow never observes the outcome.
    pub async fn ship(&self, event: LogEvent) {
        if let Err(err) = self.push(&event).await {
            debug!(
                error = %err,
                service_type = %event.service_type,
                "dropped log push"
            );
        }
    }

    /// Fallible single push attempt. At most one network call, no retry.
    ///
    /// Returns immediately with `Ok` when no endpoint is configured.
    pub async fn push(&self, event: &LogEvent) -> Result<(), ShipError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };

        if event.level.is_empty() {
            return Err(ShipError::InvalidEvent("level must be non-empty".to_string()));
        }
        if event.service_type.is_empty() {
            return Err(ShipError::InvalidEvent(
                "service_type must be non-empty".to_string(),
            ));
        }

        let labels = build_label_set(event, &self.static_labels);
        let line = serde_json::to_string(&event.payload)?;
        let envelope = PushEnvelope::single(labels, now_nanos(), line);

        let response = self
            .client
            .post(endpoint.clone())
            .header(TENANT_HEADER, self.tenant.clone())
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ShipError::HttpError {
                status: status.as_u16(),
            })
        }
    }
}
