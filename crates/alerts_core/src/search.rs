use crate::model::SearchResult;
use crate::params::{SearchParams, FROM_KEY};
use crate::request::{RequestCounter, RequestId};
use crate::view_model::{SearchStatus, SearchView};
use crate::{Effect, LoadOutcome};

pub const SEARCH_ERROR_MESSAGE: &str = "An unexpected error occured while requesting alerts.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProps {
    pub params: SearchParams,
    /// Caller-supplied token; changing it signals that `params` changed.
    pub search_id: u64,
    /// Whether the caller registered a completion callback.
    pub notify_loaded: bool,
    pub show_loader: bool,
}

impl Default for SearchProps {
    fn default() -> Self {
        Self {
            params: SearchParams::new(),
            search_id: 0,
            notify_loaded: false,
            show_loader: true,
        }
    }
}

impl SearchProps {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }
}

/// State of one mounted, paginated search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSearchList {
    props: SearchProps,
    result: SearchResult,
    loading: bool,
    errors: Vec<String>,
    pending: Option<RequestId>,
}

impl AlertSearchList {
    pub fn mount(props: SearchProps, requests: &mut RequestCounter) -> (Self, Vec<Effect>) {
        let mut list = Self {
            props,
            result: SearchResult::default(),
            loading: false,
            errors: Vec::new(),
            pending: None,
        };
        let effect = list.fetch(requests);
        (list, vec![effect])
    }

    /// New props from the caller. Params are always taken over; only a changed
    /// `search_id` triggers a fetch.
    pub fn props_changed(
        &mut self,
        search_id: u64,
        params: SearchParams,
        requests: &mut RequestCounter,
    ) -> Vec<Effect> {
        self.props.params = params;
        if self.props.search_id == search_id {
            return Vec::new();
        }
        self.props.search_id = search_id;
        vec![self.fetch(requests)]
    }

    /// Moves to the page starting at `offset` and fetches it.
    pub fn page_selected(&mut self, offset: u64, requests: &mut RequestCounter) -> Vec<Effect> {
        self.props.params.set(FROM_KEY, offset);
        vec![self.fetch(requests)]
    }

    pub fn search_completed(
        &mut self,
        request_id: RequestId,
        result: Result<SearchResult, String>,
    ) -> Option<Vec<Effect>> {
        if self.pending != Some(request_id) {
            return None;
        }
        self.pending = None;
        self.loading = false;

        let outcome = match result {
            Ok(body) => {
                self.result = body.clone();
                self.errors.clear();
                LoadOutcome::Loaded(body)
            }
            Err(message) => {
                self.result = SearchResult::default();
                self.errors = vec![SEARCH_ERROR_MESSAGE.to_string()];
                LoadOutcome::Failed(message)
            }
        };

        let effects = if self.props.notify_loaded {
            vec![Effect::NotifyLoaded(outcome)]
        } else {
            Vec::new()
        };
        Some(effects)
    }

    pub fn params(&self) -> &SearchParams {
        &self.props.params
    }

    pub fn search_id(&self) -> u64 {
        self.props.search_id
    }

    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn view(&self) -> SearchView {
        let status = if self.loading {
            SearchStatus::Loading
        } else if !self.errors.is_empty() {
            SearchStatus::Failed
        } else {
            SearchStatus::Loaded
        };
        SearchView::new(
            status,
            self.props.show_loader,
            &self.result,
            &self.errors,
            self.props.params.from_offset(),
            self.props.params.page_size(),
        )
    }

    /// Clears the visible page before the request goes out so the loading
    /// state shows immediately.
    fn fetch(&mut self, requests: &mut RequestCounter) -> Effect {
        self.result = SearchResult::default();
        self.loading = true;
        self.errors.clear();

        let request_id = requests.next_id();
        self.pending = Some(request_id);
        Effect::SearchAlerts {
            request_id,
            query: self.props.params.to_query_string(),
        }
    }
}
