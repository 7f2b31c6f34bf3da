use std::time::Duration;

use urlsource_engine::{OutputType, RequestConfig, RequestWorker, TransportSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn completes_submissions_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_string("slow=1"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast=2"))
        .mount(&server)
        .await;

    let worker = RequestWorker::new(TransportSettings::default());
    assert!(worker.submit(
        1,
        RequestConfig::new(format!("{}/slow", server.uri()), OutputType::Text)
            .with_selector(r"=(\d)"),
    ));
    assert!(worker.submit(
        2,
        RequestConfig::new(format!("{}/fast", server.uri()), OutputType::Text)
            .with_selector(r"=(\d)"),
    ));

    let completed = tokio::task::spawn_blocking(move || {
        let first = worker.recv_timeout(Duration::from_secs(10));
        let second = worker.recv_timeout(Duration::from_secs(10));
        (first, second)
    })
    .await
    .unwrap();

    let first = completed.0.expect("first completion");
    let second = completed.1.expect("second completion");
    assert_eq!(first.request_id, 1);
    assert_eq!(first.response.body_parsed(), Some("1"));
    assert_eq!(second.request_id, 2);
    assert_eq!(second.response.body_parsed(), Some("2"));
}

#[test]
fn failures_are_delivered_as_responses() {
    let worker = RequestWorker::new(TransportSettings::default());
    worker.submit(9, RequestConfig::new("http://127.0.0.1:1/", OutputType::Json));

    let completed = worker
        .recv_timeout(Duration::from_secs(10))
        .expect("completion");
    assert_eq!(completed.request_id, 9);
    assert!(!completed.response.is_success());
    assert!(worker.try_recv().is_none());
}
