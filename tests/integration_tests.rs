//! Integration tests using mock HTTP server
//!
//! Tests the full flow: SearchConfig → Paginator → reqwest transport → pages

use bing_image_search::http::{HttpClientConfig, ReqwestTransport};
use bing_image_search::pagination::{API_KEY_HEADER, CLIENT_ID_HEADER};
use bing_image_search::{
    search, Error, ImageType, Paginator, SafeSearch, SearchConfig, Transport,
};
use futures::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn images(start: u64, n: u64) -> Vec<Value> {
    (start..start + n)
        .map(|i| {
            json!({
                "name": format!("image {i}"),
                "contentUrl": format!("https://img.example/{i}.jpg"),
                "thumbnailUrl": format!("https://tse.example/{i}"),
                "encodingFormat": "jpeg",
            })
        })
        .collect()
}

fn body(start: u64, n: u64, next_offset: u64, total: u64) -> Value {
    json!({
        "_type": "Images",
        "readLink": "https://api.cognitive.microsoft.com/api/v7/images/search?q=puffins",
        "value": images(start, n),
        "nextOffset": next_offset,
        "totalEstimatedMatches": total,
    })
}

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig::builder()
        .key("test-key")
        .query("puffins")
        .endpoint(format!("{}/bing/v7.0/images/search", server.uri()))
        .build()
}

// ============================================================================
// Pagination over HTTP
// ============================================================================

#[tokio::test]
async fn test_two_page_run_with_session_affinity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/images/search"))
        .and(query_param("q", "puffins"))
        .and(query_param("offset", "0"))
        .and(query_param("count", "150"))
        .and(header(API_KEY_HEADER, "test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(CLIENT_ID_HEADER, "session-42")
                .set_body_json(body(0, 150, 150, 300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/images/search"))
        .and(query_param("offset", "150"))
        .and(query_param("count", "150"))
        .and(header(CLIENT_ID_HEADER, "session-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(150, 150, 300, 300)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SearchConfig {
        amount: 300,
        ..config_for(&mock_server)
    };
    let mut paginator = Paginator::new(config).unwrap();

    let first = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 150);
    assert_eq!(first.extra["_type"], "Images");
    assert_eq!(
        paginator.state().client_id.as_deref(),
        Some("session-42")
    );

    let second = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(second.next_offset, 300);
    assert_eq!(
        second.value[0].content_url.as_deref(),
        Some("https://img.example/150.jpg")
    );

    assert!(paginator.next_page().await.unwrap().is_none());
    assert!(paginator.is_done());
}

#[tokio::test]
async fn test_filters_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/images/search"))
        .and(query_param("q", "puffins"))
        .and(query_param("mkt", "en-GB"))
        .and(query_param("safeSearch", "Strict"))
        .and(query_param("imageType", "Photo"))
        .and(query_param("minWidth", "1024"))
        .and(query_param("cc", "GB"))
        .and(query_param_is_missing("color"))
        .and(query_param_is_missing("license"))
        .and(query_param_is_missing("maxWidth"))
        .and(header("X-Search-Location", "lat:51.5;long:-0.1;re:50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, 20, 20, 20)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SearchConfig::builder()
        .key("test-key")
        .query("puffins")
        .market("en-GB")
        .safe_search(SafeSearch::Strict)
        .image_type(ImageType::Photo)
        .width_range(Some(1024), None)
        .location("lat:51.5;long:-0.1;re:50")
        .query_param("cc", "GB")
        .amount(20)
        .endpoint(format!("{}/bing/v7.0/images/search", mock_server.uri()))
        .build();

    let images = Paginator::new(config)
        .unwrap()
        .collect_images()
        .await
        .unwrap();
    assert_eq!(images.len(), 20);
    assert_eq!(images[0].encoding_format.as_deref(), Some("jpeg"));
}

#[tokio::test]
async fn test_upstream_total_caps_the_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .and(query_param("count", "150"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, 150, 150, 170)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "150"))
        .and(query_param("count", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(150, 20, 170, 170)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new().unwrap());
    let pages: Vec<_> = search(config_for(&mock_server), transport)
        .unwrap()
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    let total: usize = pages.iter().map(|p| p.as_ref().unwrap().len()).sum();
    assert_eq!(total, 170);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_forbidden_first_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": "InvalidAuthorization"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(config_for(&mock_server)).unwrap();
    let err = paginator.next_page().await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    assert_eq!(err.to_string(), "HTTP error 403: \"Forbidden\"");
    assert!(paginator.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_error_mid_run_stops_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, 10, 10, 1000)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SearchConfig {
        count: 10,
        amount: 100,
        ..config_for(&mock_server)
    };
    let results: Vec<_> = Paginator::new(config)
        .unwrap()
        .into_stream()
        .collect()
        .await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().status(), Some(503));
}

#[tokio::test]
async fn test_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(config_for(&mock_server)).unwrap();
    let err = paginator.next_page().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_timeout_comes_from_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body(0, 10, 10, 10))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::with_config(
        HttpClientConfig::builder()
            .timeout(Duration::from_millis(200))
            .build(),
    )
    .unwrap();
    let mut paginator =
        Paginator::with_transport(config_for(&mock_server), Arc::new(transport)).unwrap();

    let err = paginator.next_page().await.unwrap_err();
    match err {
        Error::Http(e) => assert!(e.is_timeout()),
        other => panic!("Expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_amount_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = SearchConfig {
        amount: 0,
        ..config_for(&mock_server)
    };
    let mut paginator = Paginator::new(config).unwrap();
    assert!(paginator.next_page().await.unwrap().is_none());
}
