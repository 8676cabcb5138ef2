use crate::model::SearchResult;
use crate::view_model::DetailView;
use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the lookup endpoint with `id=<alert_id>`.
    LookupAlert { request_id: RequestId, alert_id: String },
    /// GET the search endpoint with an already serialized query string.
    SearchAlerts { request_id: RequestId, query: String },
    /// Invoke the caller's completion callback.
    NotifyLoaded(LoadOutcome),
    NavigateBack,
    ExportAlert(Box<DetailView>),
}

/// Payload of the search completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(SearchResult),
    Failed(String),
}

impl LoadOutcome {
    pub fn success(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}
