use super::{ServiceError, context_payload, elapsed_ms};
use crate::config::Config;
use crate::domain::{FieldValue, Io, LogEvent, RequestContext};
use crate::shipper::LogShipper;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;
use url::Url;

const SERVICE_TYPE: &str = "intent_service";

/// Classification outcome. `confidence` is whatever the backend reported,
/// expected in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    pub intent: String,
    pub confidence: f64,
}

impl IntentResult {
    /// Safe default substituted whenever classification cannot complete.
    pub fn fallback() -> Self {
        Self {
            intent: "unknown".to_string(),
            confidence: 0.0,
        }
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
    user_id: &'a str,
    channel: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    intent: String,
    #[serde(default)]
    confidence: f64,
}

/// Client for the remote intent classification backend.
#[derive(Debug, Clone)]
pub struct IntentClassifierClient {
    client: Client,
    endpoint: Option<Url>,
    shipper: LogShipper,
}

impl IntentClassifierClient {
    pub fn new(config: &Config, shipper: LogShipper) -> Result<Self, ServiceError> {
        let endpoint = config
            .intent_url
            .as_deref()
            .map(|raw| {
                raw.parse::<Url>().map_err(|e| {
                    ServiceError::InvalidConfiguration(format!("Invalid intent URL '{raw}': {e}"))
                })
            })
            .transpose()?;

        let client = ClientBuilder::new()
            .timeout(config.intent_timeout())
            .build()
            .map_err(|e| {
                ServiceError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            shipper,
        })
    }

    /// Classify the user text. Never fails: unconfigured, unreachable,
    /// timed-out and malformed backends all yield the `("unknown", 0.0)`
    /// fallback.
    pub async fn classify(&self, text: &str, ctx: &RequestContext) -> IntentResult {
        let start = Instant::now();

        let Some(endpoint) = &self.endpoint else {
            return IntentResult::fallback();
        };

        match self.call_backend(endpoint, text, ctx).await {
            Ok(result) => {
                let mut payload = context_payload(ctx);
                payload.insert(
                    "event_type".to_string(),
                    FieldValue::from("intent_classified"),
                );
                payload.insert("intent".to_string(), FieldValue::from(result.intent.clone()));
                payload.insert("confidence".to_string(), FieldValue::from(result.confidence));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));

                self.shipper
                    .ship(
                        LogEvent::new("info", SERVICE_TYPE, payload)
                            .with_io(Io::Out)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                result
            }
            Err(err) => {
                warn!(error = %err, user_id = %ctx.user_id, "intent classification failed");

                let mut payload = context_payload(ctx);
                payload.insert("event_type".to_string(), FieldValue::from("intent_error"));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));
                payload.insert("error".to_string(), FieldValue::from(err.to_string()));

                self.shipper
                    .ship(
                        LogEvent::new("error", SERVICE_TYPE, payload)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                IntentResult::fallback()
            }
        }
    }

    async fn call_backend(
        &self,
        endpoint: &Url,
        text: &str,
        ctx: &RequestContext,
    ) -> Result<IntentResult, ServiceError> {
        let request = ClassifyRequest {
            text,
            user_id: &ctx.user_id,
            channel: &ctx.channel,
            session_id: &ctx.session_id,
        };

        let response = self
            .client
            .post(endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Http {
                status: status.as_u16(),
            });
        }

        // A body without the `intent` field counts as malformed, same as
        // unparsable JSON
        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        Ok(IntentResult {
            intent: body.intent,
            confidence: body.confidence,
        })
    }
}
