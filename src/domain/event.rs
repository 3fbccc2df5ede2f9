use super::field_value::Payload;

/// Direction marker for a logged operation, purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Io {
    In,
    Out,
    #[default]
    None,
}

impl Io {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::None => "none",
        }
    }
}

/// Advisory delivery-mode marker carried on events for label compatibility
/// with older consumers. Delivery is always fire-and-forget regardless of
/// this value; it is never consulted by the shipper and never emitted as a
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Async,
    Sync,
}

impl SyncMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Async => "async",
            Self::Sync => "sync",
        }
    }
}

/// One structured event handed to the shipper.
///
/// `level` is an open severity string ("info", "error", ...) passed through
/// verbatim; there is no enforced enum. `service_type` names the emitting
/// collaborator ("menu_service", "flow_service", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: String,
    pub payload: Payload,
    pub service_type: String,
    pub sync_mode: SyncMode,
    pub io: Io,
    pub trace_id: Option<String>,
}

impl LogEvent {
    pub fn new(
        level: impl Into<String>,
        service_type: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            level: level.into(),
            payload,
            service_type: service_type.into(),
            sync_mode: SyncMode::Async,
            io: Io::None,
            trace_id: None,
        }
    }

    pub fn with_io(mut self, io: Io) -> Self {
        self.io = io;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Attach the caller's trace id, if it has one. `None` leaves the event
    /// without one; a missing trace id is never defaulted.
    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        self.trace_id = trace_id;
        self
    }
}
