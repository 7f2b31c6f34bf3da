use std::time::Duration;

use urlsource_engine::{
    OutputType, RequestConfig, ReqwestTransport, Transport, TransportFailureKind,
    TransportSettings, USER_AGENT,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    source_logging::initialize_for_tests();
}

#[tokio::test]
async fn sends_method_body_user_agent_and_every_header() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let config = RequestConfig::new(format!("{}/submit", server.uri()), OutputType::Text)
        .with_method("POST")
        .with_body("payload=1")
        .with_header("X-Dup", "first")
        .with_header("X-Dup", "second")
        .with_header("Accept", "text/plain");

    let output = ReqwestTransport::default()
        .execute(&config)
        .await
        .expect("request ok");
    assert_eq!(output.status, 200);
    assert_eq!(output.bytes, b"ok");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.body, b"payload=1");
    let dup = request
        .headers
        .get_all("x-dup")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(dup, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(
        request.headers.get("user-agent").unwrap().to_str().unwrap(),
        USER_AGENT
    );
    assert_eq!(
        request.headers.get("accept").unwrap().to_str().unwrap(),
        "text/plain"
    );
}

#[tokio::test]
async fn body_is_sent_on_get_and_empty_method_means_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/q"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = RequestConfig::new(format!("{}/q", server.uri()), OutputType::Text)
        .with_method("")
        .with_body("{\"query\":1}");

    ReqwestTransport::default()
        .execute(&config)
        .await
        .expect("request ok");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].method.as_str(), "GET");
    assert_eq!(requests[0].body, b"{\"query\":1}");
}

#[tokio::test]
async fn error_status_is_reported_not_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let config = RequestConfig::new(format!("{}/missing", server.uri()), OutputType::Text);
    let output = ReqwestTransport::default().execute(&config).await.unwrap();
    assert_eq!(output.status, 404);
    assert_eq!(output.bytes, b"not here");
}

#[tokio::test]
async fn redirects_are_returned_as_is_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/new")
                .set_body_string("moved"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .mount(&server)
        .await;

    let config = RequestConfig::new(format!("{}/old", server.uri()), OutputType::Text);

    let output = ReqwestTransport::default().execute(&config).await.unwrap();
    assert_eq!(output.status, 302);
    assert_eq!(output.bytes, b"moved");

    let following = ReqwestTransport::new(TransportSettings {
        redirect_limit: 3,
        ..TransportSettings::default()
    });
    let output = following.execute(&config).await.unwrap();
    assert_eq!(output.status, 200);
    assert_eq!(output.bytes, b"fresh");
}

#[tokio::test]
async fn content_type_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let config = RequestConfig::new(server.uri(), OutputType::Json);
    let output = ReqwestTransport::default().execute(&config).await.unwrap();
    assert_eq!(
        output.content_type.as_deref(),
        Some("application/json; charset=utf-8")
    );
}

#[tokio::test]
async fn times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..TransportSettings::default()
    });
    let config = RequestConfig::new(format!("{}/slow", server.uri()), OutputType::Text);

    let err = transport.execute(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let config = RequestConfig::new("http://127.0.0.1:1/", OutputType::Text);
    let err = ReqwestTransport::default().execute(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn malformed_url_is_rejected_before_sending() {
    let config = RequestConfig::new("not a url", OutputType::Text);
    let err = ReqwestTransport::default().execute(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::InvalidUrl);
}

#[tokio::test]
async fn invalid_header_name_is_invalid_request() {
    let server = MockServer::start().await;
    let config =
        RequestConfig::new(server.uri(), OutputType::Text).with_header("Bad Header", "x");
    let err = ReqwestTransport::default().execute(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::InvalidRequest);
}
