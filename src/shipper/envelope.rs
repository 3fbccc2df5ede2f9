use super::labels::LabelSet;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wire structure pushed to the backend:
/// `{"streams":[{"stream": labels, "values": [[ns, line]]}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEnvelope {
    pub streams: Vec<LogStream>,
}

/// One labeled group of log entries. Each value is a
/// `[nanosecond-timestamp, serialized-payload]` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogStream {
    pub stream: LabelSet,
    pub values: Vec<[String; 2]>,
}

impl PushEnvelope {
    /// Envelope for exactly one entry, the only shape this crate ever sends.
    pub fn single(labels: LabelSet, timestamp_ns: String, line: String) -> Self {
        Self {
            streams: vec![LogStream {
                stream: labels,
                values: vec![[timestamp_ns, line]],
            }],
        }
    }
}

/// Nanoseconds since the Unix epoch as a decimal string.
pub fn now_nanos() -> String {
    // timestamp_nanos_opt is None only for dates past the year 2262
    Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string()
}
