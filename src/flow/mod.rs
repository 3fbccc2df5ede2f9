//! Intent dispatch for domain-specific flows.
//!
//! Pure routing: given a classified intent, either render the menu or fall
//! back to a static reply. Internal failures never escape; they are mapped
//! to the `system.error` reply at the boundary and logged.

use crate::domain::{FieldValue, Io, LogEvent, RequestContext};
use crate::services::menu::{Menu, MenuClient};
use crate::services::{context_payload, elapsed_ms};
use crate::shipper::LogShipper;
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::warn;

const SERVICE_TYPE: &str = "flow_service";

const ROUTE_MENU: &str = "food_ordering.menu";
const ROUTE_FALLBACK: &str = "fallback.unknown";
const ROUTE_ERROR: &str = "system.error";

const REPLY_FALLBACK: &str = "I’m not sure how to help with that right now.";
const REPLY_ERROR: &str = "There was an issue processing your request.";
const REPLY_MENU_UNAVAILABLE: &str = "Menu is temporarily unavailable.";
const REPLY_MENU_FORMAT_ERROR: &str = "Menu format error.";
const MENU_HEADER: &str = "Here is the menu:";

#[derive(Error, Debug)]
enum FlowError {
    #[error("menu `items` is not an array")]
    ItemsNotArray,
    #[error("menu item is not an object")]
    ItemNotObject,
}

/// Routing outcome handed back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReply {
    pub reply_text: String,
    pub route: String,
}

/// Dispatch table keyed by the classified intent string.
#[derive(Debug, Clone)]
pub struct FlowRouter {
    menu: MenuClient,
    shipper: LogShipper,
}

impl FlowRouter {
    pub fn new(menu: MenuClient, shipper: LogShipper) -> Self {
        Self { menu, shipper }
    }

    /// Route one classified utterance. Never fails: an internal error is
    /// substituted with the static error reply and logged before returning.
    pub async fn route(&self, intent: &str, text: &str, ctx: &RequestContext) -> FlowReply {
        let start = Instant::now();

        match self.dispatch(intent, text, ctx).await {
            Ok(reply) => {
                let mut payload = context_payload(ctx);
                payload.insert("event_type".to_string(), FieldValue::from("flow_output"));
                payload.insert("intent".to_string(), FieldValue::from(intent));
                payload.insert("route".to_string(), FieldValue::from(reply.route.clone()));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));

                self.shipper
                    .ship(
                        LogEvent::new("info", SERVICE_TYPE, payload)
                            .with_io(Io::Out)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                reply
            }
            Err(err) => {
                warn!(error = %err, intent, "flow routing failed");

                let mut payload = context_payload(ctx);
                payload.insert("event_type".to_string(), FieldValue::from("flow_error"));
                payload.insert("intent".to_string(), FieldValue::from(intent));
                payload.insert("latency_ms".to_string(), FieldValue::from(elapsed_ms(start)));
                payload.insert("error".to_string(), FieldValue::from(err.to_string()));

                self.shipper
                    .ship(
                        LogEvent::new("error", SERVICE_TYPE, payload)
                            .with_trace_id(ctx.trace_id.clone()),
                    )
                    .await;

                FlowReply {
                    reply_text: REPLY_ERROR.to_string(),
                    route: ROUTE_ERROR.to_string(),
                }
            }
        }
    }

    async fn dispatch(
        &self,
        intent: &str,
        _text: &str,
        ctx: &RequestContext,
    ) -> Result<FlowReply, FlowError> {
        match intent {
            "get_menu" => {
                let menu = self.menu.fetch(ctx).await;
                Ok(FlowReply {
                    reply_text: render_menu(&menu)?,
                    route: ROUTE_MENU.to_string(),
                })
            }
            _ => Ok(FlowReply {
                reply_text: REPLY_FALLBACK.to_string(),
                route: ROUTE_FALLBACK.to_string(),
            }),
        }
    }
}

/// Render the menu document as user-facing text: a header line followed by
/// one `- name – price` line per item.
fn render_menu(menu: &Menu) -> Result<String, FlowError> {
    if menu.is_empty() {
        return Ok(REPLY_MENU_UNAVAILABLE.to_string());
    }

    let Some(items) = menu.get("items") else {
        return Ok(REPLY_MENU_FORMAT_ERROR.to_string());
    };
    let items = items.as_array().ok_or(FlowError::ItemsNotArray)?;

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(MENU_HEADER.to_string());
    for item in items {
        let item = item.as_object().ok_or(FlowError::ItemNotObject)?;
        let name = item_text(item, "name", "Unknown");
        let price = item_text(item, "price", "N/A");
        lines.push(format!("- {name} – {price}"));
    }

    Ok(lines.join("\n"))
}

fn item_text(item: &serde_json::Map<String, Value>, key: &str, default: &str) -> String {
    match item.get(key) {
        None => default.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
