use url::Url;

use crate::colour::{
    certainty_colour, message_type_colour, severity_colour, urgency_colour, Colour,
};
use crate::display::{display_lines, format_timestamp};
use crate::model::{AlertRecord, SearchResult};
use crate::resource::{resource_link, ResourceLink};

/// Totals above this are not paginated; the search backend refuses deeper offsets.
pub const MAX_PAGINATED_TOTAL: u64 = 10_000;
/// Maximum number of numbered page buttons shown at once.
pub const PAGE_WINDOW: u64 = 5;

pub const DETAIL_ERROR_MESSAGE: &str = "An error occurred loading the alert.";
pub const DETAIL_LOADING_MESSAGE: &str = "Fetching alert";
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "The alert has no information at the requested index.";
pub const MODAL_TITLE: &str = "Alert details";
pub const MODAL_UNAVAILABLE_MESSAGE: &str = "Modal cannot load alert details at this time.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search: Option<SearchView>,
    pub detail: Option<DetailRender>,
    pub modal: Option<ModalView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub colour: Option<Colour>,
}

impl Label {
    fn classified(text: &str, classify: fn(&str) -> Option<Colour>) -> Self {
        Self {
            text: text.to_string(),
            colour: classify(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    Link { name: String, href: String },
    Plain(String),
}

/// Everything the detail card shows, derived from one alert record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub headline: String,
    pub message_type: Option<Label>,
    pub urgency: Label,
    pub severity: Label,
    pub certainty: Label,
    pub response_types: Vec<String>,
    pub sender: Sender,
    /// Start of validity: `effective`, or `sent` when the info block has none.
    pub effective: Option<String>,
    pub expires: String,
    pub areas: Vec<String>,
    pub description: Vec<String>,
    /// `None` when the instruction is blank.
    pub instruction: Option<Vec<String>>,
    pub resources: Vec<ResourceLink>,
}

impl DetailView {
    pub fn from_record(record: &AlertRecord, resource_base: &Url) -> Self {
        let info = &record.info;

        let sender = match info.web.as_deref().filter(|web| !web.is_empty()) {
            Some(web) => Sender::Link {
                name: info.sender_name.clone(),
                href: web.to_string(),
            },
            None => Sender::Plain(info.sender_name.clone()),
        };

        let effective = info
            .effective
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| info.sent.as_deref().filter(|value| !value.is_empty()))
            .map(format_timestamp);

        let mut areas: Vec<String> = info
            .areas
            .iter()
            .map(|area| area.description.clone())
            .collect();
        areas.sort();

        let instruction = Some(display_lines(&info.instruction)).filter(|lines| !lines.is_empty());

        // Links that cannot be resolved against the base are left out.
        let resources = info
            .resources
            .iter()
            .filter_map(|resource| resource_link(resource, resource_base).ok())
            .collect();

        Self {
            id: record.id.clone(),
            headline: info.headline.to_uppercase(),
            message_type: record
                .msg_type
                .as_deref()
                .map(|msg_type| Label::classified(msg_type, message_type_colour)),
            urgency: Label::classified(&info.urgency, urgency_colour),
            severity: Label::classified(&info.severity, severity_colour),
            certainty: Label::classified(&info.certainty, certainty_colour),
            response_types: info.response_types.clone(),
            sender,
            effective,
            expires: format_timestamp(&info.expires),
            areas,
            description: display_lines(&info.description),
            instruction,
            resources,
        }
    }
}

/// Exactly one of the three render states of a detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRender {
    Error(String),
    Loading(String),
    Ready(Box<DetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Detail(Box<DetailView>),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub body: ModalBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Loading,
    Failed,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub status: SearchStatus,
    pub show_loader: bool,
    /// Hits in server order, handed to the list renderer untouched.
    pub hits: Vec<AlertRecord>,
    pub errors: Vec<String>,
    pub pagination: Pagination,
}

impl SearchView {
    pub(crate) fn new(
        status: SearchStatus,
        show_loader: bool,
        result: &SearchResult,
        errors: &[String],
        offset: u64,
        limit: u64,
    ) -> Self {
        Self {
            status,
            show_loader,
            hits: result.hits.clone(),
            errors: errors.to_vec(),
            pagination: Pagination::new(offset, limit, result.total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// 1-based page number.
    pub number: u64,
    pub offset: u64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
    /// Server total capped at [`MAX_PAGINATED_TOTAL`].
    pub total: u64,
    /// 1-based page containing `offset`.
    pub current_page: u64,
    pub page_count: u64,
    pub pages: Vec<PageButton>,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl Pagination {
    pub fn new(offset: u64, limit: u64, total: u64) -> Self {
        let limit = limit.max(1);
        let total = total.min(MAX_PAGINATED_TOTAL);
        // An empty result still shows one (empty) page.
        let page_count = total.div_ceil(limit).max(1);
        let current = offset / limit;

        let end = (current.saturating_sub(PAGE_WINDOW / 2) + PAGE_WINDOW).min(page_count);
        let start = end.saturating_sub(PAGE_WINDOW);
        let pages = (start..end)
            .map(|page| PageButton {
                number: page + 1,
                offset: page * limit,
                active: page == current,
            })
            .collect();

        Self {
            offset,
            limit,
            total,
            current_page: current + 1,
            page_count,
            pages,
            previous: (offset > 0).then(|| offset.saturating_sub(limit)),
            next: (offset.saturating_add(limit) < total).then(|| offset + limit),
        }
    }
}
