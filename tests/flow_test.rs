use flow_adapter::config::{Config, LokiConfig};
use flow_adapter::domain::RequestContext;
use flow_adapter::flow::FlowRouter;
use flow_adapter::services::MenuClient;
use flow_adapter::shipper::{LogShipper, PushEnvelope};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ctx() -> RequestContext {
    RequestContext::new("u-1", "web", "sess-1").with_trace_id("trace-9")
}

fn disabled_shipper() -> LogShipper {
    LogShipper::new(&LokiConfig::default()).unwrap()
}

async fn router_with_menu_body(body: serde_json::Value) -> (FlowRouter, MockServer) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let config = Config {
        menu_url: Some(format!("{}/menu", mock_server.uri())),
        ..Config::default()
    };
    let menu = MenuClient::new(&config, disabled_shipper()).unwrap();
    (FlowRouter::new(menu, disabled_shipper()), mock_server)
}

#[tokio::test]
async fn test_get_menu_renders_listing_with_header() {
    let (router, _server) = router_with_menu_body(serde_json::json!({
        "items": [{"name": "Tea", "price": "2.50"}]
    }))
    .await;

    let reply = router.route("get_menu", "show me the menu", &ctx()).await;

    assert_eq!(reply.route, "food_ordering.menu");
    let lines: Vec<&str> = reply.reply_text.lines().collect();
    assert_eq!(lines, vec!["Here is the menu:", "- Tea – 2.50"]);
}

#[tokio::test]
async fn test_get_menu_with_unconfigured_backend_reports_unavailable() {
    // No menu URL configured: the client falls back to an empty mapping
    let menu = MenuClient::new(&Config::default(), disabled_shipper()).unwrap();
    let router = FlowRouter::new(menu, disabled_shipper());

    let reply = router.route("get_menu", "menu?", &ctx()).await;

    assert_eq!(reply.route, "food_ordering.menu");
    assert_eq!(reply.reply_text, "Menu is temporarily unavailable.");
}

#[tokio::test]
async fn test_menu_without_items_key_reports_format_error() {
    let (router, _server) =
        router_with_menu_body(serde_json::json!({"currency": "EUR"})).await;

    let reply = router.route("get_menu", "menu?", &ctx()).await;

    assert_eq!(reply.route, "food_ordering.menu");
    assert_eq!(reply.reply_text, "Menu format error.");
}

#[tokio::test]
async fn test_unrecognized_intent_maps_to_static_fallback() {
    let menu = MenuClient::new(&Config::default(), disabled_shipper()).unwrap();
    let router = FlowRouter::new(menu, disabled_shipper());

    let reply = router.route("book_flight", "fly me to Lisbon", &ctx()).await;

    assert_eq!(reply.route, "fallback.unknown");
    assert_eq!(
        reply.reply_text,
        "I’m not sure how to help with that right now."
    );
}

#[tokio::test]
async fn test_malformed_items_hits_error_boundary_and_ships_error() {
    let backend = MockServer::start().await;
    let loki = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/menu"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": "Tea"})),
        )
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/loki/api/v1/push"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&loki)
        .await;

    let mut config = Config {
        menu_url: Some(format!("{}/menu", backend.uri())),
        ..Config::default()
    };
    config.loki.url = Some(format!("{}/loki/api/v1/push", loki.uri()));
    let shipper = LogShipper::new(&config.loki).unwrap();

    let menu = MenuClient::new(&config, shipper.clone()).unwrap();
    let router = FlowRouter::new(menu, shipper);

    let reply = router.route("get_menu", "menu?", &ctx()).await;

    assert_eq!(reply.route, "system.error");
    assert_eq!(
        reply.reply_text,
        "There was an issue processing your request."
    );

    // Menu fetch succeeded (one info event), routing failed (one error event)
    let requests = loki.received_requests().await.unwrap();
    let flow_error = requests
        .iter()
        .filter_map(|request| serde_json::from_slice::<PushEnvelope>(&request.body).ok())
        .find(|envelope| {
            envelope.streams[0]
                .stream
                .get("service_type")
                .is_some_and(|s| s == "flow_service")
        })
        .expect("flow_service event was shipped");

    let labels = &flow_error.streams[0].stream;
    assert_eq!(labels.get("level").unwrap(), "error");
    assert_eq!(labels.get("trace_id").unwrap(), "trace-9");

    let line: serde_json::Value =
        serde_json::from_str(&flow_error.streams[0].values[0][1]).unwrap();
    assert_eq!(line["event_type"], "flow_error");
    assert_eq!(line["intent"], "get_menu");
    assert!(line["error"].as_str().unwrap().contains("items"));
}

#[tokio::test]
async fn test_success_path_ships_flow_output_event() {
    let backend = MockServer::start().await;
    let loki = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"items": [{"name": "Tea", "price": "2.50"}]}),
        ))
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&loki)
        .await;

    let mut config = Config {
        menu_url: Some(backend.uri()),
        ..Config::default()
    };
    config.loki.url = Some(format!("{}/push", loki.uri()));
    let shipper = LogShipper::new(&config.loki).unwrap();

    // Keep the menu client's own logging out of the way to isolate the
    // router's event
    let menu = MenuClient::new(&config, disabled_shipper()).unwrap();
    let router = FlowRouter::new(menu, shipper);

    let reply = router.route("get_menu", "menu?", &ctx()).await;
    assert_eq!(reply.route, "food_ordering.menu");

    let requests = loki.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let envelope: PushEnvelope = serde_json::from_slice(&requests[0].body).unwrap();
    let labels = &envelope.streams[0].stream;
    assert_eq!(labels.get("service_type").unwrap(), "flow_service");
    assert_eq!(labels.get("level").unwrap(), "info");
    assert_eq!(labels.get("io").unwrap(), "out");

    let line: serde_json::Value = serde_json::from_str(&envelope.streams[0].values[0][1]).unwrap();
    assert_eq!(line["event_type"], "flow_output");
    assert_eq!(line["intent"], "get_menu");
    assert_eq!(line["route"], "food_ordering.menu");
    assert!(line["latency_ms"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_routing_is_idempotent_against_a_stubbed_backend() {
    let (router, _server) = router_with_menu_body(serde_json::json!({
        "items": [{"name": "Tea", "price": "2.50"}]
    }))
    .await;

    let first = router.route("get_menu", "menu?", &ctx()).await;
    let second = router.route("get_menu", "menu?", &ctx()).await;
    assert_eq!(first, second);
}
