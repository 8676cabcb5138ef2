use url::Url;

use crate::identifier::{CompoundId, IdentifierError};
use crate::model::{AlertRecord, HistoryState, LookupResponse};
use crate::request::{RequestCounter, RequestId};
use crate::view_model::{
    DetailRender, DetailView, ModalBody, ModalView, DETAIL_ERROR_MESSAGE,
    DETAIL_LOADING_MESSAGE, DETAIL_NOT_FOUND_MESSAGE, MODAL_TITLE, MODAL_UNAVAILABLE_MESSAGE,
};
use crate::Effect;

/// Inputs a detail card can be mounted with, in resolution priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailProps {
    /// An already-resolved record handed over by the caller.
    pub hit: Option<AlertRecord>,
    /// Navigation state, which may carry a record under `hit`.
    pub history: Option<HistoryState>,
    /// `"<alert_id>:<info_index>"`, used when neither of the above has a record.
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error(transparent)]
    MalformedIdentifier(#[from] IdentifierError),
    #[error("alert lookup failed: {0}")]
    Fetch(String),
    #[error("alert has {available} info block(s), none at index {index}")]
    InfoMissing { index: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    Loading { id: CompoundId, request_id: RequestId },
    Ready(Box<AlertRecord>),
    Failed(DetailError),
}

/// State of one mounted alert detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDetail {
    phase: DetailPhase,
}

impl AlertDetail {
    /// Resolves the record from props, falling back to a lookup by parent id.
    pub fn mount(props: DetailProps, requests: &mut RequestCounter) -> (Self, Vec<Effect>) {
        let provided = props
            .hit
            .or_else(|| props.history.and_then(|history| history.hit));
        if let Some(record) = provided {
            return (Self::ready(record), Vec::new());
        }

        let raw = props.identifier.unwrap_or_default();
        match raw.parse::<CompoundId>() {
            Ok(id) => {
                let request_id = requests.next_id();
                let effect = Effect::LookupAlert {
                    request_id,
                    alert_id: id.alert_id.clone(),
                };
                let detail = Self {
                    phase: DetailPhase::Loading { id, request_id },
                };
                (detail, vec![effect])
            }
            Err(err) => {
                let detail = Self {
                    phase: DetailPhase::Failed(err.into()),
                };
                (detail, Vec::new())
            }
        }
    }

    pub fn ready(record: AlertRecord) -> Self {
        Self {
            phase: DetailPhase::Ready(Box::new(record)),
        }
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, DetailPhase::Loading { .. })
    }

    pub fn record(&self) -> Option<&AlertRecord> {
        match &self.phase {
            DetailPhase::Ready(record) => Some(record),
            _ => None,
        }
    }

    /// Applies a lookup response. Returns `false` when the response belongs to
    /// a request this card is no longer waiting for.
    pub fn lookup_completed(
        &mut self,
        request_id: RequestId,
        result: Result<LookupResponse, String>,
    ) -> bool {
        let id = match &self.phase {
            DetailPhase::Loading {
                id,
                request_id: pending,
            } if *pending == request_id => id.clone(),
            _ => return false,
        };

        self.phase = match result {
            Err(message) => DetailPhase::Failed(DetailError::Fetch(message)),
            Ok(mut response) => {
                let available = response.infos.len();
                if id.info_index < available {
                    let info = response.infos.swap_remove(id.info_index);
                    DetailPhase::Ready(Box::new(AlertRecord {
                        id: id.to_string(),
                        alert_id: id.alert_id,
                        info,
                        msg_type: response.msg_type,
                    }))
                } else {
                    DetailPhase::Failed(DetailError::InfoMissing {
                        index: id.info_index,
                        available,
                    })
                }
            }
        };
        true
    }

    pub fn view(&self, resource_base: &Url) -> DetailRender {
        match &self.phase {
            DetailPhase::Failed(DetailError::InfoMissing { .. }) => {
                DetailRender::Error(DETAIL_NOT_FOUND_MESSAGE.to_string())
            }
            DetailPhase::Failed(_) => DetailRender::Error(DETAIL_ERROR_MESSAGE.to_string()),
            DetailPhase::Loading { .. } => {
                DetailRender::Loading(DETAIL_LOADING_MESSAGE.to_string())
            }
            DetailPhase::Ready(record) => {
                DetailRender::Ready(Box::new(DetailView::from_record(record, resource_base)))
            }
        }
    }
}

/// Overlay variant of the detail card. It only takes its record from
/// navigation state; without one it shows an inline failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertModal {
    hit: Option<AlertRecord>,
}

impl AlertModal {
    pub fn open(history: Option<HistoryState>) -> Self {
        Self {
            hit: history.and_then(|history| history.hit),
        }
    }

    pub fn record(&self) -> Option<&AlertRecord> {
        self.hit.as_ref()
    }

    /// Closing navigates back to wherever the modal was opened from.
    pub fn close(self) -> Effect {
        Effect::NavigateBack
    }

    pub fn view(&self, resource_base: &Url) -> ModalView {
        let body = match &self.hit {
            Some(record) => {
                ModalBody::Detail(Box::new(DetailView::from_record(record, resource_base)))
            }
            None => ModalBody::Unavailable(MODAL_UNAVAILABLE_MESSAGE.to_string()),
        };
        ModalView {
            title: MODAL_TITLE.to_string(),
            body,
        }
    }
}
