use url::Url;

use crate::detail::{AlertDetail, AlertModal};
use crate::request::RequestCounter;
use crate::search::AlertSearchList;
use crate::view_model::AppViewModel;

/// Where mirrored alert resources are served from unless configured otherwise.
pub const DEFAULT_RESOURCE_BASE: &str =
    "https://www2.csclub.uwaterloo.ca/~ztseguin/alerts/resources/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    resource_base: Url,
    pub(crate) requests: RequestCounter,
    pub(crate) search: Option<AlertSearchList>,
    pub(crate) detail: Option<AlertDetail>,
    pub(crate) modal: Option<AlertModal>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let resource_base =
            Url::parse(DEFAULT_RESOURCE_BASE).expect("default resource base is a valid URL");
        Self::with_resource_base(resource_base)
    }

    pub fn with_resource_base(resource_base: Url) -> Self {
        Self {
            resource_base,
            requests: RequestCounter::new(),
            search: None,
            detail: None,
            modal: None,
            dirty: false,
        }
    }

    pub fn resource_base(&self) -> &Url {
        &self.resource_base
    }

    pub fn search(&self) -> Option<&AlertSearchList> {
        self.search.as_ref()
    }

    pub fn detail(&self) -> Option<&AlertDetail> {
        self.detail.as_ref()
    }

    pub fn modal(&self) -> Option<&AlertModal> {
        self.modal.as_ref()
    }

    /// True while any mounted component waits for a response.
    pub fn is_busy(&self) -> bool {
        self.search.as_ref().is_some_and(AlertSearchList::is_loading)
            || self.detail.as_ref().is_some_and(AlertDetail::is_loading)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            search: self.search.as_ref().map(AlertSearchList::view),
            detail: self
                .detail
                .as_ref()
                .map(|detail| detail.view(&self.resource_base)),
            modal: self
                .modal
                .as_ref()
                .map(|modal| modal.view(&self.resource_base)),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
