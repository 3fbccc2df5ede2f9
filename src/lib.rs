#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_precision_loss,     // Acceptable for latency reporting
    clippy::missing_errors_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. ShipError in shipper module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod config;
pub mod domain;
pub mod flow;
pub mod services;
pub mod shipper;
pub mod telemetry;

// Re-export main types for easy access
pub use config::{Config, ConfigError, LokiConfig};
pub use domain::{FieldValue, Io, LogEvent, Payload, RequestContext, SyncMode};
pub use flow::{FlowReply, FlowRouter};
pub use services::{IntentClassifierClient, IntentResult, MenuClient};
pub use shipper::LogShipper;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
