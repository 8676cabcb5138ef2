use std::sync::{mpsc, Arc};
use std::time::Duration;

use alerts_core::{update, AppState, DetailProps, Effect, Msg, SearchParams, SearchProps};
use alerts_engine::{
    ApiEndpoints, CapClient, ChannelEventSink, EngineEvent, EngineHandle, FailureKind,
    FetchSettings, ReqwestFetcher,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CapClient {
    let endpoints = ApiEndpoints::parse(&format!("{}/function", server.uri())).unwrap();
    CapClient::new(
        endpoints,
        Arc::new(ReqwestFetcher::new(FetchSettings::default()).unwrap()),
    )
}

fn info(headline: &str) -> serde_json::Value {
    json!({
        "headline": headline,
        "urgency": "Immediate",
        "severity": "Severe",
        "certainty": "Observed",
        "sender_name": "Environment Canada",
        "expires": "2018-06-20T18:00:00-04:00",
        "areas": [],
        "description": "text",
        "instruction": ""
    })
}

#[test]
fn endpoints_append_function_names_to_base() {
    let endpoints = ApiEndpoints::parse("https://functions.example.org/function").unwrap();
    assert_eq!(
        endpoints.lookup_url("urn:oid:1 2").as_str(),
        "https://functions.example.org/function/cap-get?id=urn%3Aoid%3A1+2"
    );
    assert_eq!(
        endpoints.search_url("").as_str(),
        "https://functions.example.org/function/cap-search"
    );
    assert_eq!(
        endpoints.search_url("from=10&q=fire").as_str(),
        "https://functions.example.org/function/cap-search?from=10&q=fire"
    );

    let trailing = ApiEndpoints::parse("https://functions.example.org/function/").unwrap();
    assert_eq!(
        trailing.search_url("").as_str(),
        "https://functions.example.org/function/cap-search"
    );

    let err = ApiEndpoints::parse("mailto:alerts@example.org").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn lookup_sends_parent_id_and_decodes_infos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/function/cap-get"))
        .and(query_param("id", "X"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "infos": [info("first"), info("second")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).lookup("X").await.expect("lookup ok");
    assert_eq!(response.infos.len(), 2);
    assert_eq!(response.infos[1].headline, "second");
}

#[tokio::test]
async fn search_with_empty_params_has_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/function/cap-search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "hits": [] })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search(&SearchParams::new().to_query_string())
        .await
        .expect("search ok");
    assert_eq!(result.total, 0);
    assert!(result.hits.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/function/cap-search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("oops", "text/plain"))
        .mount(&server)
        .await;

    let err = client_for(&server).search("q=x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/function/cap-get"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).lookup("X").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

fn recv(events: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    events
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_drives_core_effects_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/function/cap-search"))
        .and(query_param("from", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 11,
            "hits": [{ "alert_id": "B", "id": "B:0", "info": info("page two") }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/function/cap-get"))
        .and(query_param("id", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "infos": [info("only")] })))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, events) = mpsc::channel();
    let engine = EngineHandle::with_client(
        client_for(&server),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .unwrap();

    let mut params = SearchParams::new();
    params.set("from", 10_u64);
    let (state, effects) = update(AppState::new(), Msg::SearchMounted(SearchProps::new(params)));
    let (search_id, query) = match effects.as_slice() {
        [Effect::SearchAlerts { request_id, query }] => (*request_id, query.clone()),
        other => panic!("unexpected effects {other:?}"),
    };
    engine.search(search_id, query);

    let state = match recv(&events) {
        EngineEvent::SearchCompleted { request_id, result } => {
            assert_eq!(request_id, search_id);
            let (state, _) = update(
                state,
                Msg::SearchCompleted {
                    request_id,
                    result: result.map_err(|err| err.to_string()),
                },
            );
            state
        }
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(state.search().unwrap().result().hits[0].id, "B:0");

    let (state, effects) = update(
        state,
        Msg::DetailMounted(DetailProps {
            identifier: Some("B:0".to_string()),
            ..DetailProps::default()
        }),
    );
    let lookup_id = match effects.as_slice() {
        [Effect::LookupAlert {
            request_id,
            alert_id,
        }] => {
            engine.lookup(*request_id, alert_id.clone());
            *request_id
        }
        other => panic!("unexpected effects {other:?}"),
    };

    match recv(&events) {
        EngineEvent::LookupCompleted { request_id, result } => {
            assert_eq!(request_id, lookup_id);
            let (state, _) = update(
                state,
                Msg::LookupCompleted {
                    request_id,
                    result: result.map_err(|err| err.to_string()),
                },
            );
            assert_eq!(
                state.detail().unwrap().record().unwrap().info.headline,
                "only"
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_reports_transport_failures() {
    // Nothing listens on the discard port.
    let endpoints = ApiEndpoints::parse("http://127.0.0.1:9/function").unwrap();
    let (tx, events) = mpsc::channel();
    let settings = FetchSettings {
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(1),
        ..FetchSettings::default()
    };
    let engine =
        EngineHandle::new(settings, endpoints, Arc::new(ChannelEventSink::new(tx))).unwrap();

    engine.lookup(7, "X");
    match recv(&events) {
        EngineEvent::LookupCompleted { request_id, result } => {
            assert_eq!(request_id, 7);
            let err = result.unwrap_err();
            assert!(matches!(
                err.kind,
                FailureKind::Network | FailureKind::Timeout
            ));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
