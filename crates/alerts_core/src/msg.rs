use crate::detail::DetailProps;
use crate::model::{LookupResponse, SearchResult};
use crate::params::SearchParams;
use crate::search::SearchProps;
use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Search list mounted with its initial props.
    SearchMounted(SearchProps),
    /// Caller re-rendered the search list; a new `search_id` means "fetch again".
    SearchPropsChanged {
        search_id: u64,
        params: SearchParams,
    },
    /// User clicked a page button carrying this offset.
    PageSelected { offset: u64 },
    NextPage,
    PreviousPage,
    /// Engine completion for a search request.
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchResult, String>,
    },
    /// Detail card mounted.
    DetailMounted(DetailProps),
    /// Engine completion for a lookup request.
    LookupCompleted {
        request_id: RequestId,
        result: Result<LookupResponse, String>,
    },
    /// User opened a hit from the list (0-based position on the current page).
    HitOpened { index: usize },
    /// User dismissed the modal.
    ModalClosed,
    /// User asked to save the alert currently on screen.
    ExportRequested,
    NoOp,
}
