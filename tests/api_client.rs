//! Integration tests for the news API client against a mock server.
//!
//! Each test starts its own wiremock server, so tests are isolated and run
//! in parallel.

use newsdesk::api::{ApiError, NewsClient};
use newsdesk::view::ImagePolicy;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NewsClient {
    NewsClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_fetch_categories_preserves_order() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/categories",
        json!({ "categories": [
            { "id": "1", "title": "Sports" },
            { "id": "2", "title": "Tech" }
        ]}),
    )
    .await;

    let categories = client_for(&server).fetch_categories().await.unwrap();
    let titles: Vec<_> = categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Sports", "Tech"]);
    assert_eq!(categories[0].id, "1");
}

#[tokio::test]
async fn test_fetch_categories_numeric_ids() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/categories",
        json!({ "categories": [{ "id": 12, "title": "World" }] }),
    )
    .await;

    let categories = client_for(&server).fetch_categories().await.unwrap();
    assert_eq!(categories[0].id, "12");
}

#[tokio::test]
async fn test_fetch_categories_missing_envelope_is_decode_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/categories", json!({ "items": [] })).await;

    let err = client_for(&server).fetch_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_categories_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus(500)), "got {:?}", err);
}

// ============================================================================
// Articles
// ============================================================================

#[tokio::test]
async fn test_fetch_articles_for_category() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/categories/1",
        json!({ "articles": [{
            "id": "42",
            "title": "Cup final tonight",
            "time": "2024-05-01T10:00:00Z",
            "image": { "url": "https://img.example.com/full.jpg", "srcset": [
                { "url": "https://img.example.com/s.jpg" },
                { "url": "https://img.example.com/m.jpg" }
            ]}
        }]}),
    )
    .await;

    let articles = client_for(&server).fetch_articles("1").await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "42");
    let image = articles[0].image.as_ref().unwrap();
    assert_eq!(image.srcset.len(), 2);
}

#[tokio::test]
async fn test_fetch_articles_tolerates_nulls() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/categories/1",
        json!({ "articles": [
            {
                "id": "42",
                "title": "Cup final tonight",
                "time": null,
                "image": { "url": "https://img.example.com/full.jpg", "srcset": null }
            },
            {
                "id": "43",
                "title": null,
                "time": "",
                "image": { "url": "https://img.example.com/other.jpg", "srcset": [null, null, null, null, null, null] }
            }
        ]}),
    )
    .await;

    let articles = client_for(&server).fetch_articles("1").await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].time, "");
    assert_eq!(articles[1].title, "");

    let policy = ImagePolicy::default();
    assert_eq!(
        policy.resolve(articles[0].image.as_ref()),
        "https://img.example.com/full.jpg"
    );
    assert_eq!(
        policy.resolve(articles[1].image.as_ref()),
        "https://img.example.com/other.jpg"
    );
}

#[tokio::test]
async fn test_fetch_articles_empty_list() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/categories/9", json!({ "articles": [] })).await;

    let articles = client_for(&server).fetch_articles("9").await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_fetch_articles_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_articles("404").await.unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus(404)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_articles_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_articles("1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_category_id_is_percent_encoded() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/categories/a%2Fb", json!({ "articles": [] })).await;

    let articles = client_for(&server).fetch_articles("a/b").await.unwrap();
    assert!(articles.is_empty());
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_fetch_article_detail() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/news/42",
        json!({ "article": {
            "id": 42,
            "title": "Cup final tonight",
            "images": [{ "url": "https://img.example.com/hero.jpg" }],
            "content": ["First paragraph.", "Second paragraph."]
        }}),
    )
    .await;

    let detail = client_for(&server).fetch_article_detail("42").await.unwrap();
    assert_eq!(detail.id, "42");
    assert_eq!(detail.images[0].url, "https://img.example.com/hero.jpg");
    assert_eq!(detail.content.len(), 2);
}

#[tokio::test]
async fn test_fetch_article_detail_missing_article_field() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/news/42", json!({ "id": 42 })).await;

    let err = client_for(&server)
        .fetch_article_detail("42")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "categories": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = NewsClient::new(&server.uri(), Duration::from_secs(1)).unwrap();
    let err = client.fetch_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(1)), "got {:?}", err);
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/v1/api/categories",
        json!({ "categories": [{ "id": "1", "title": "Sports" }] }),
    )
    .await;

    let client = NewsClient::new(&format!("{}/v1", server.uri()), Duration::from_secs(5)).unwrap();
    let categories = client.fetch_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
}
