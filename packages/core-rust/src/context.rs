/// Call-scoped context threaded from the transport through endpoints into the
/// service. The service layer carries it but never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Process-unique, monotonically increasing call identifier.
    pub call_id: u64,
    /// `X-Request-Id` of the inbound request, if the transport supplied one.
    pub request_id: Option<String>,
}

impl CallContext {
    #[must_use]
    pub fn new(call_id: u64) -> Self {
        Self {
            call_id,
            request_id: None,
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
