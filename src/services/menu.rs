use super::{ServiceError, context_payload, elapsed_ms};
use crate::config::Config;
use crate::domain::{FieldValue, Io, LogEvent, RequestContext};
use crate::shipper::LogShipper;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Instant;
use tracing::warn;
use url::Url;

const SERVICE_TYPE: &str = "menu_service";

/// Free-form menu document as returned by the backend.
pub type Menu = serde_json::Map<String, Value>;

/// Client for the remote menu backend.
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: Client,
    endpoint: Option<Url>,
    shipper: LogShipper,
}

impl MenuClient {
    pub fn new(config: &Config, shipper: LogShipper) -> Result<Self, ServiceError> {
        let endpoint = config
            .menu_url
            .as_deref()
            .map(|raw| {
                raw.parse::<Url>().map_err(|e| {
                    ServiceError::InvalidConfiguration(format!("Invalid menu URL '{raw}': {e}"))
                })
            })
            .transpose()?;

        let client = ClientBuilder::new()
            .timeout(config.menu_timeout())
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

    /// Fetch the menu document. Never fails: every failure kind yields an
    /// empty mapping, with the reason visible only in the shipped error log.
    pub async fn fetch(&self, ctx: &RequestContext) -> Menu {
        let start = Instant::now();

        let Some(endpoint) = &self.endpoint else {
            let err = ServiceError::NotConfigured("MENU_SERVICE_URL");
            let mut payload = context_payload(ctx);
            payload.insert("event_type".to_string(), FieldValue::from("service_error"));
            payload.insert("error".to_string(), FieldValue::from(err.to_string()));

            self.shipper
                .ship(
                    LogEvent::new("error", SERVICE_TYPE, payload)
                        .with_trace_id(ctx.trace_id.clone()),
                )
                .await;

            return Menu::new();
        };

        match self.call_backend(endpoint).await {
            Ok((menu, http_status)) => {
                let mut payload = context_payload(ctx);
                payload.insert("event_type".to_string(), FieldValue::from("service_called"));
                payload.insert("service".to_string(), FieldValue::from(SERVICE_TYPE));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));
                payload.insert("status".to_string(), FieldValue::from("success"));
                payload.insert("http_status".to_string(), FieldValue::from(http_status));

                self.shipper
                    .ship(
                        LogEvent::new("info", SERVICE_TYPE, payload)
                            .with_io(Io::Out)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                menu
            }
            Err(err) => {
                warn!(error = %err, user_id = %ctx.user_id, "menu fetch failed");

                let mut payload = context_payload(ctx);
                payload.insert("event_type".to_string(), FieldValue::from("service_error"));
                payload.insert("service".to_string(), FieldValue::from(SERVICE_TYPE));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));
                payload.insert("error".to_string(), FieldValue::from(err.to_string()));

                self.shipper
                    .ship(
                        LogEvent::new("error", SERVICE_TYPE, payload)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                Menu::new()
            }
        }
    }

    async fn call_backend(&self, endpoint: &Url) -> Result<(Menu, u16), ServiceError> {
        let response = self.client.get(endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Http {
                status: status.as_u16(),
            });
        }

        // An empty body is a legal empty menu, not an error
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok((Menu::new(), status.as_u16()));
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        match value {
            Value::Object(menu) => Ok((menu, status.as_u16())),
            other => Err(ServiceError::Malformed(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LokiConfig;

    fn shipper() -> LogShipper {
        LogShipper::new(&LokiConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_backend_url() {
        let config = Config {
            menu_url: Some("::broken::".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            MenuClient::new(&config, shipper()),
            Err(ServiceError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_backend_yields_empty_menu() {
        let client = MenuClient::new(&Config::default(), shipper()).unwrap();
        let ctx = RequestContext::new("u-1", "web", "sess-1");

        let menu = client.fetch(&ctx).await;
        assert!(menu.is_empty());
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&Value::Null), "null");
        assert_eq!(json_type_name(&serde_json::json!([1, 2])), "an array");
        assert_eq!(json_type_name(&serde_json::json!("x")), "a string");
    }
}
