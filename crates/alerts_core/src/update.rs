use crate::detail::{AlertDetail, AlertModal};
use crate::model::HistoryState;
use crate::search::AlertSearchList;
use crate::view_model::{DetailRender, DetailView, ModalBody};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchMounted(props) => {
            let (list, effects) = AlertSearchList::mount(props, &mut state.requests);
            state.search = Some(list);
            state.mark_dirty();
            effects
        }
        Msg::SearchPropsChanged { search_id, params } => {
            let AppState {
                search, requests, ..
            } = &mut state;
            match search {
                Some(list) => {
                    let effects = list.props_changed(search_id, params, requests);
                    if !effects.is_empty() {
                        state.mark_dirty();
                    }
                    effects
                }
                None => Vec::new(),
            }
        }
        Msg::PageSelected { offset } => select_page(&mut state, |_| Some(offset)),
        Msg::NextPage => select_page(&mut state, |list| list.view().pagination.next),
        Msg::PreviousPage => select_page(&mut state, |list| list.view().pagination.previous),
        Msg::SearchCompleted { request_id, result } => {
            let applied = state
                .search
                .as_mut()
                .and_then(|list| list.search_completed(request_id, result));
            match applied {
                Some(effects) => {
                    state.mark_dirty();
                    effects
                }
                None => Vec::new(),
            }
        }
        Msg::DetailMounted(props) => {
            let (detail, effects) = AlertDetail::mount(props, &mut state.requests);
            state.detail = Some(detail);
            state.mark_dirty();
            effects
        }
        Msg::LookupCompleted { request_id, result } => {
            let applied = state
                .detail
                .as_mut()
                .is_some_and(|detail| detail.lookup_completed(request_id, result));
            if applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::HitOpened { index } => {
            let hit = state
                .search
                .as_ref()
                .and_then(|list| list.result().hits.get(index).cloned());
            state.modal = Some(AlertModal::open(hit.map(HistoryState::with_hit)));
            state.mark_dirty();
            Vec::new()
        }
        Msg::ModalClosed => match state.modal.take() {
            Some(modal) => {
                state.mark_dirty();
                vec![modal.close()]
            }
            None => Vec::new(),
        },
        Msg::ExportRequested => match exportable_view(&state) {
            Some(view) => vec![Effect::ExportAlert(view)],
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_page(
    state: &mut AppState,
    offset: impl FnOnce(&AlertSearchList) -> Option<u64>,
) -> Vec<Effect> {
    let AppState {
        search, requests, ..
    } = &mut *state;
    let Some(offset) = search.as_ref().and_then(offset) else {
        return Vec::new();
    };
    let Some(list) = search.as_mut() else {
        return Vec::new();
    };
    let effects = list.page_selected(offset, requests);
    state.mark_dirty();
    effects
}

/// The alert on top of the screen: the modal's if one is open, else the card's.
fn exportable_view(state: &AppState) -> Option<Box<DetailView>> {
    if let Some(modal) = &state.modal {
        return match modal.view(state.resource_base()).body {
            ModalBody::Detail(view) => Some(view),
            ModalBody::Unavailable(_) => None,
        };
    }
    match state.detail.as_ref()?.view(state.resource_base()) {
        DetailRender::Ready(view) => Some(view),
        DetailRender::Error(_) | DetailRender::Loading(_) => None,
    }
}
