//! Alert viewer core: CAP data model, pure state machines and view-model derivation.
mod colour;
mod detail;
mod display;
mod effect;
mod identifier;
mod model;
mod msg;
mod params;
mod request;
mod resource;
mod search;
mod state;
mod update;
mod view_model;

pub use colour::{
    certainty_colour, message_type_colour, severity_colour, urgency_colour, Colour,
};
pub use detail::{AlertDetail, AlertModal, DetailError, DetailPhase, DetailProps};
pub use display::{display_lines, format_timestamp};
pub use effect::{Effect, LoadOutcome};
pub use identifier::{CompoundId, IdentifierError};
pub use model::{AlertRecord, Area, HistoryState, InfoBlock, LookupResponse, Resource, SearchResult};
pub use msg::Msg;
pub use params::{ParamError, ParamValue, SearchParams, DEFAULT_PAGE_SIZE, FROM_KEY, SIZE_KEY};
pub use request::{RequestCounter, RequestId};
pub use resource::{resource_link, ResourceLink};
pub use search::{AlertSearchList, SearchProps, SEARCH_ERROR_MESSAGE};
pub use state::{AppState, DEFAULT_RESOURCE_BASE};
pub use update::update;
pub use view_model::{
    AppViewModel, DetailRender, DetailView, Label, ModalBody, ModalView, PageButton, Pagination,
    SearchStatus, SearchView, Sender, DETAIL_ERROR_MESSAGE, DETAIL_LOADING_MESSAGE,
    DETAIL_NOT_FOUND_MESSAGE, MAX_PAGINATED_TOTAL, MODAL_TITLE, MODAL_UNAVAILABLE_MESSAGE,
    PAGE_WINDOW,
};
