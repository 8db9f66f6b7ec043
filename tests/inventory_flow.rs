//! Integration tests for the inventory endpoint family using wiremock.
//!
//! - GET    /inventory/tags/            : list (with and without filters)
//! - GET    /inventory/tags/?name=...   : get_by_name (match and no match)
//! - GET    /inventory/tags/{id}/       : get_by_id
//! - POST   /inventory/tags/            : create
//! - PUT    /inventory/tags/{id}/       : update
//! - DELETE /inventory/tags/{id}/       : delete
//!
//! Argument validation is checked with a catch-all mock that expects zero
//! calls, so any request reaching the server fails the test on drop.

use reqwest::StatusCode;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zentral_client::client::Client;
use zentral_client::context::Context;
use zentral_client::error::Error;
use zentral_client::inventory::*;
use zentral_client::options::ListOptions;

/// Helper: creates a Client pointed at the given wiremock server.
fn mock_client(server: &MockServer) -> Client {
    Client::new(None, &format!("{}/", server.uri()), "mock-token").unwrap()
}

/// Mounts a mock that fails the test if any request reaches the server.
async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

// ── list ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_tags_returns_all_items() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "taxonomy": null, "name": "VIP", "color": "ff0000"},
            {"id": 2, "taxonomy": 3, "name": "Finance", "color": "00ff00"}
        ])))
        .mount(&server)
        .await;

    let (tags, resp) = client.tags().list(&Context::background(), None).await.unwrap();

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "VIP");
    assert_eq!(tags[0].taxonomy_id, None);
    assert_eq!(tags[1].taxonomy_id, Some(3));
}

#[tokio::test]
async fn list_tags_passes_paging_as_query() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/tags/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let opts = TagListOptions {
        paging: ListOptions::page(2, 10),
        ..Default::default()
    };
    let (tags, _) = client
        .tags()
        .list(&Context::background(), Some(&opts))
        .await
        .unwrap();
    assert!(tags.is_empty());

    let received = server.received_requests().await.unwrap();
    assert!(
        !received[0].url.query().unwrap_or_default().contains("name="),
        "empty name filter must not be sent"
    );
}

// ── get_by_name ────────────────────────────────────────────────────────

#[tokio::test]
async fn get_by_name_returns_first_match() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/tags/"))
        .and(query_param("name", "VIP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "taxonomy": null, "name": "VIP", "color": "ff0000"}
        ])))
        .mount(&server)
        .await;

    let (tag, _) = client
        .tags()
        .get_by_name(&Context::background(), "VIP")
        .await
        .unwrap();

    let tag = tag.expect("tag should be found");
    assert_eq!(tag.id, 7);
}

#[tokio::test]
async fn get_by_name_without_match_is_none_not_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/tags/"))
        .and(query_param("name", "nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (tag, resp) = client
        .tags()
        .get_by_name(&Context::background(), "nope")
        .await
        .expect("a missing name must not be an error");

    assert!(tag.is_none());
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn get_by_name_rejects_blank_name_without_io() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    forbid_requests(&server).await;

    let err = client
        .tags()
        .get_by_name(&Context::background(), "   ")
        .await
        .unwrap_err();

    match err {
        Error::Arg(arg) => assert_eq!(arg.parameter, "name"),
        other => panic!("expected ArgError, got {other:?}"),
    }
}

// ── get_by_id ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_by_id_returns_single_item() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/taxonomies/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4,
            "meta_business_unit": null,
            "name": "Departments",
            "created_at": "2022-07-22T01:02:03.444444",
            "updated_at": "2022-07-22T01:02:03.444444"
        })))
        .mount(&server)
        .await;

    let (taxonomy, _) = client
        .taxonomies()
        .get_by_id(&Context::background(), 4)
        .await
        .unwrap();

    assert_eq!(taxonomy.name, "Departments");
    assert_eq!(taxonomy.meta_business_unit_id, None);
}

#[tokio::test]
async fn get_by_id_rejects_zero_without_io() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    forbid_requests(&server).await;

    let err = client
        .tags()
        .get_by_id(&Context::background(), 0)
        .await
        .unwrap_err();

    match err {
        Error::Arg(arg) => {
            assert_eq!(arg.parameter, "id");
            assert_eq!(arg.reason, "must be greater than or equal to 1");
        }
        other => panic!("expected ArgError, got {other:?}"),
    }
}

#[tokio::test]
async fn get_by_id_not_found_is_api_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/meta_business_units/404/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Not found."
        })))
        .mount(&server)
        .await;

    let err = client
        .meta_business_units()
        .get_by_id(&Context::background(), 404)
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

// ── create / update / delete ───────────────────────────────────────────

#[tokio::test]
async fn create_tag_posts_request_body() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/inventory/tags/"))
        .and(body_json(serde_json::json!({
            "taxonomy": null,
            "name": "VIP",
            "color": "ff0000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 11,
            "taxonomy": null,
            "name": "VIP",
            "color": "ff0000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TagRequest {
        taxonomy_id: None,
        name: "VIP".to_string(),
        color: "ff0000".to_string(),
    };
    let (tag, resp) = client
        .tags()
        .create(&Context::background(), &request)
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(tag.id, 11);
}

#[tokio::test]
async fn create_with_invalid_fields_surfaces_field_errors() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/inventory/tags/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "name": ["This field may not be blank."]
        })))
        .mount(&server)
        .await;

    let request = TagRequest {
        taxonomy_id: None,
        name: String::new(),
        color: "ff0000".to_string(),
    };
    let err = client
        .tags()
        .create(&Context::background(), &request)
        .await
        .unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status(), StatusCode::BAD_REQUEST);
            assert!(api.field_errors.contains_key("name"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_tag_puts_to_item_path() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("PUT"))
        .and(path("/inventory/tags/11/"))
        .and(body_json(serde_json::json!({
            "taxonomy": 2,
            "name": "VIP",
            "color": "0000ff"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11,
            "taxonomy": 2,
            "name": "VIP",
            "color": "0000ff"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TagRequest {
        taxonomy_id: Some(2),
        name: "VIP".to_string(),
        color: "0000ff".to_string(),
    };
    let (tag, _) = client
        .tags()
        .update(&Context::background(), 11, &request)
        .await
        .unwrap();

    assert_eq!(tag.taxonomy_id, Some(2));
    assert_eq!(tag.color, "0000ff");
}

#[tokio::test]
async fn update_rejects_negative_id_without_io() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    forbid_requests(&server).await;

    let request = TagRequest {
        taxonomy_id: None,
        name: "VIP".to_string(),
        color: "ff0000".to_string(),
    };
    let err = client
        .tags()
        .update(&Context::background(), -3, &request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Arg(_)), "got {err:?}");
}

#[tokio::test]
async fn delete_tag_accepts_no_content() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("DELETE"))
        .and(path("/inventory/tags/11/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .tags()
        .delete(&Context::background(), 11)
        .await
        .unwrap();
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_rejects_zero_id_without_io() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    forbid_requests(&server).await;

    let err = client
        .tags()
        .delete(&Context::background(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Arg(_)), "got {err:?}");
}
