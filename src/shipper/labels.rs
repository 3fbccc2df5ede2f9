use crate::domain::LogEvent;
use std::collections::BTreeMap;

/// Indexed key/value tags attached to one log stream.
pub type LabelSet = BTreeMap<String, String>;

/// Parse a comma-separated `key=value` string into label pairs.
///
/// Pairs without a `=` are silently skipped; keys and values are trimmed.
/// The first `=` splits, so values may themselves contain `=`.
pub fn parse_static_labels(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Assemble the label set for one event.
///
/// Derived labels come first: `service_type`, `level`, `io`, plus `trace_id`
/// when a non-empty one was supplied and `session_id` when the payload
/// carries that key. Static labels are overlaid last and overwrite any
/// colliding derived key, including `level` — inherited precedence, kept
/// as documented behavior.
pub fn build_label_set(event: &LogEvent, static_labels: &[(String, String)]) -> LabelSet {
    let mut labels = LabelSet::new();
    labels.insert("service_type".to_string(), event.service_type.clone());
    labels.insert("level".to_string(), event.level.clone());
    labels.insert("io".to_string(), event.io.as_str().to_string());

    if let Some(trace_id) = &event.trace_id
        && !trace_id.is_empty()
    {
        labels.insert("trace_id".to_string(), trace_id.clone());
    }

    if let Some(session_id) = event.payload.get("session_id") {
        labels.insert("session_id".to_string(), session_id.as_label_value());
    }

    for (key, value) in static_labels {
        labels.insert(key.clone(), value.clone());
    }

    labels
}
