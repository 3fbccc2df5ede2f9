/// Caller identity threaded through every collaborator call.
///
/// `trace_id` is the end-to-end correlation id supplied by the orchestrator.
/// It is propagated verbatim into log labels when present and never
/// defaulted when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
    pub channel: String,
    pub session_id: String,
    pub trace_id: Option<String>,
}

impl RequestContext {
    pub fn new(
        user_id: impl Into<String>,
        channel: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            channel: channel.into(),
            session_id: session_id.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}
