use std::sync::Once;

use alerts_core::{
    update, AlertRecord, AppState, DetailError, DetailPhase, DetailProps, DetailRender, Effect,
    HistoryState, IdentifierError, InfoBlock, LookupResponse, ModalBody, Msg,
    DETAIL_ERROR_MESSAGE, DETAIL_LOADING_MESSAGE, DETAIL_NOT_FOUND_MESSAGE,
    MODAL_UNAVAILABLE_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(alerts_logging::initialize_for_tests);
}

fn info(headline: &str) -> InfoBlock {
    InfoBlock {
        headline: headline.to_string(),
        urgency: "Immediate".to_string(),
        severity: "Severe".to_string(),
        certainty: "Observed".to_string(),
        expires: "2018-06-20T18:00:00-04:00".to_string(),
        ..InfoBlock::default()
    }
}

fn record(alert_id: &str, index: usize, headline: &str) -> AlertRecord {
    AlertRecord {
        alert_id: alert_id.to_string(),
        id: format!("{alert_id}:{index}"),
        info: info(headline),
        msg_type: None,
    }
}

fn mount_with_identifier(identifier: &str) -> (AppState, Vec<Effect>) {
    update(
        AppState::new(),
        Msg::DetailMounted(DetailProps {
            identifier: Some(identifier.to_string()),
            ..DetailProps::default()
        }),
    )
}

fn lookup_request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LookupAlert { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("lookup effect")
}

#[test]
fn malformed_identifiers_fail_without_a_lookup() {
    init_logging();
    for raw in ["", "abc", "a:b:c", "a:1:", ":::"] {
        let (state, effects) = mount_with_identifier(raw);
        assert!(effects.is_empty(), "no lookup expected for {raw:?}");
        assert_eq!(
            state.view().detail,
            Some(DetailRender::Error(DETAIL_ERROR_MESSAGE.to_string())),
            "error render expected for {raw:?}"
        );
        assert!(matches!(
            state.detail().unwrap().phase(),
            DetailPhase::Failed(DetailError::MalformedIdentifier(
                IdentifierError::Malformed { .. }
            ))
        ));
    }
}

#[test]
fn non_numeric_index_is_malformed() {
    let (state, effects) = mount_with_identifier("abc:first");
    assert!(effects.is_empty());
    assert!(matches!(
        state.detail().unwrap().phase(),
        DetailPhase::Failed(DetailError::MalformedIdentifier(
            IdentifierError::InvalidIndex { .. }
        ))
    ));
}

#[test]
fn valid_identifier_issues_one_lookup_for_parent_id() {
    init_logging();
    let (state, effects) = mount_with_identifier("urn:oid:2.49.0.1.124:1");
    // Three colons: not a compound identifier.
    assert!(effects.is_empty());
    assert!(!state.is_busy());

    let (state, effects) = mount_with_identifier("cap-2018-0042:3");
    assert_eq!(
        effects,
        vec![Effect::LookupAlert {
            request_id: 1,
            alert_id: "cap-2018-0042".to_string(),
        }]
    );
    assert!(state.is_busy());
    assert_eq!(
        state.view().detail,
        Some(DetailRender::Loading(DETAIL_LOADING_MESSAGE.to_string()))
    );
}

#[test]
fn lookup_selects_info_block_by_index() {
    init_logging();
    let (state, effects) = mount_with_identifier("X:1");
    let request_id = lookup_request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Ok(LookupResponse {
                infos: vec![info("first block"), info("second block")],
                msg_type: Some("Update".to_string()),
            }),
        },
    );
    assert!(effects.is_empty());

    let record = state.detail().unwrap().record().expect("ready");
    assert_eq!(record.id, "X:1");
    assert_eq!(record.alert_id, "X");
    assert_eq!(record.info.headline, "second block");
    assert_eq!(record.msg_type.as_deref(), Some("Update"));

    match state.view().detail {
        Some(DetailRender::Ready(view)) => assert_eq!(view.headline, "SECOND BLOCK"),
        other => panic!("expected ready view, got {other:?}"),
    }
}

#[test]
fn transport_failure_renders_error_and_stays_there() {
    init_logging();
    let (state, effects) = mount_with_identifier("X:0");
    let request_id = lookup_request_id(&effects);

    let (mut state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Err("network error: connection refused".to_string()),
        },
    );
    assert!(state.consume_dirty());
    assert!(!state.is_busy());
    assert_eq!(
        state.view().detail,
        Some(DetailRender::Error(DETAIL_ERROR_MESSAGE.to_string()))
    );

    // A duplicate or late completion does not bring the loader back.
    let (mut state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Ok(LookupResponse {
                infos: vec![info("late")],
                msg_type: None,
            }),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(
        state.view().detail,
        Some(DetailRender::Error(DETAIL_ERROR_MESSAGE.to_string()))
    );
}

#[test]
fn out_of_range_index_is_not_found_rather_than_loading() {
    let (state, effects) = mount_with_identifier("X:5");
    let request_id = lookup_request_id(&effects);

    let (state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Ok(LookupResponse {
                infos: vec![info("only")],
                msg_type: None,
            }),
        },
    );
    assert_eq!(
        state.detail().unwrap().phase(),
        &DetailPhase::Failed(DetailError::InfoMissing {
            index: 5,
            available: 1
        })
    );
    assert_eq!(
        state.view().detail,
        Some(DetailRender::Error(DETAIL_NOT_FOUND_MESSAGE.to_string()))
    );
}

#[test]
fn provided_record_wins_over_history_and_identifier() {
    let (state, effects) = update(
        AppState::new(),
        Msg::DetailMounted(DetailProps {
            hit: Some(record("A", 0, "from props")),
            history: Some(HistoryState::with_hit(record("B", 0, "from history"))),
            identifier: Some("C:0".to_string()),
        }),
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.detail().unwrap().record().unwrap().info.headline,
        "from props"
    );
}

#[test]
fn history_record_is_used_before_fetching() {
    let (state, effects) = update(
        AppState::new(),
        Msg::DetailMounted(DetailProps {
            hit: None,
            history: Some(HistoryState::with_hit(record("B", 2, "from history"))),
            identifier: Some("B:2".to_string()),
        }),
    );
    assert!(effects.is_empty());
    assert_eq!(state.detail().unwrap().record().unwrap().id, "B:2");

    // Empty history state falls through to the lookup.
    let (_, effects) = update(
        AppState::new(),
        Msg::DetailMounted(DetailProps {
            hit: None,
            history: Some(HistoryState::default()),
            identifier: Some("B:2".to_string()),
        }),
    );
    assert_eq!(effects.len(), 1);
}

#[test]
fn response_for_a_replaced_card_is_ignored() {
    let (state, effects) = mount_with_identifier("OLD:0");
    let stale = lookup_request_id(&effects);
    let (state, effects) = update(
        state,
        Msg::DetailMounted(DetailProps {
            identifier: Some("NEW:0".to_string()),
            ..DetailProps::default()
        }),
    );
    let fresh = lookup_request_id(&effects);
    assert!(fresh > stale);

    let (state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id: stale,
            result: Ok(LookupResponse {
                infos: vec![info("old alert")],
                msg_type: None,
            }),
        },
    );
    assert!(state.detail().unwrap().is_loading());

    let (state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id: fresh,
            result: Ok(LookupResponse {
                infos: vec![info("new alert")],
                msg_type: None,
            }),
        },
    );
    assert_eq!(
        state.detail().unwrap().record().unwrap().info.headline,
        "new alert"
    );
}

#[test]
fn modal_without_history_hit_shows_inline_failure() {
    let (state, _) = update(AppState::new(), Msg::HitOpened { index: 0 });
    let modal = state.view().modal.expect("modal open");
    assert_eq!(
        modal.body,
        ModalBody::Unavailable(MODAL_UNAVAILABLE_MESSAGE.to_string())
    );

    let (state, effects) = update(state, Msg::ModalClosed);
    assert_eq!(effects, vec![Effect::NavigateBack]);
    assert!(state.modal().is_none());

    let (_, effects) = update(state, Msg::ModalClosed);
    assert!(effects.is_empty());
}

#[test]
fn export_uses_ready_card_only() {
    let (state, effects) = mount_with_identifier("X:0");
    let request_id = lookup_request_id(&effects);
    let (state, effects) = update(state, Msg::ExportRequested);
    assert!(effects.is_empty(), "nothing to export while loading");

    let (state, _) = update(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Ok(LookupResponse {
                infos: vec![info("flood warning")],
                msg_type: None,
            }),
        },
    );
    let (_, effects) = update(state, Msg::ExportRequested);
    match effects.as_slice() {
        [Effect::ExportAlert(view)] => {
            assert_eq!(view.id, "X:0");
            assert_eq!(view.headline, "FLOOD WARNING");
        }
        other => panic!("expected one export effect, got {other:?}"),
    }
}
