//! Domain layer for flow-adapter.
//!
//! Contains the canonical types shared across all modules:
//! - `FieldValue` / `Payload`: the closed scalar set allowed in log payloads
//! - `LogEvent`, `Io`, `SyncMode`: the structured event handed to the shipper
//! - `RequestContext`: caller identity threaded through every collaborator

pub mod context;
pub mod event;
pub mod field_value;

pub use context::RequestContext;
pub use event::{Io, LogEvent, SyncMode};
pub use field_value::{FieldValue, Payload};
