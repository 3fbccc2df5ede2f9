//! Best-effort delivery of structured events to the log-aggregation backend.
//!
//! One labeled stream with one timestamped entry per call, fire-and-forget:
//! the caller never sees a delivery error and never waits longer than the
//! configured push timeout.

pub mod client;
pub mod envelope;
pub mod labels;

pub use client::{LogShipper, ShipError};
pub use envelope::{LogStream, PushEnvelope, now_nanos};
pub use labels::{LabelSet, build_label_set, parse_static_labels};
