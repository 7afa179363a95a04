//! Integration tests for contact CRUD and search.
//!
//! These tests require a `PostgreSQL` database at `TEST_DATABASE_URL`.
//!
//! Run with: cargo test -p contact-book-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use contact_book_integration_tests::TestContext;
use reqwest::{Method, StatusCode, Url};
use serde_json::{Value, json};

async fn context_with_user() -> TestContext {
    let ctx = TestContext::new().await;
    ctx.create_test_user().await;
    ctx
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_create_contact() {
    let ctx = context_with_user().await;

    let resp = ctx
        .authed(Method::POST, "/api/contacts")
        .json(&json!({
            "first_name": "test",
            "last_name": "test",
            "email": "test@gmail.com",
            "phone": "081383837474"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["id"].is_i64());
    assert_eq!(body["data"]["first_name"], "test");
    assert_eq!(body["data"]["last_name"], "test");
    assert_eq!(body["data"]["email"], "test@gmail.com");
    assert_eq!(body["data"]["phone"], "081383837474");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_create_contact_rejects_null_character() {
    let ctx = context_with_user().await;

    let resp = ctx
        .authed(Method::POST, "/api/contacts")
        .json(&json!({ "first_name": "a\u{0}b" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "first_name");
    assert_eq!(body["errors"][0]["message"], "must not contain null characters");
    assert!(ctx.find_test_contact().await.is_none());

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_create_contact_rejects_invalid_request() {
    let ctx = context_with_user().await;

    let resp = ctx
        .authed(Method::POST, "/api/contacts")
        .json(&json!({
            "first_name": "",
            "last_name": "test",
            "email": "test@",
            "phone": "081383837474213232323"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    assert!(ctx.find_test_contact().await.is_none());

    ctx.cleanup().await;
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_get_contact() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(Method::GET, &format!("/api/contacts/{}", contact.id))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], contact.id.as_i32());
    assert_eq!(body["data"]["first_name"], contact.first_name.as_str());
    assert_eq!(body["data"]["email"], "test@pzn.com");
    assert_eq!(body["data"]["phone"], "080900000");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_get_contact_not_found() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    for path in [
        format!("/api/contacts/{}", contact.id.as_i32() + 1),
        "/api/contacts/abc".to_string(),
        "/api/contacts/0".to_string(),
    ] {
        let resp = ctx.authed(Method::GET, &path).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
    }

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_contacts_are_private_to_owner() {
    let owner = context_with_user().await;
    let contact = owner.create_test_contact().await;
    let stranger = context_with_user().await;

    let path = format!("/api/contacts/{}", contact.id);
    let resp = stranger.authed(Method::GET, &path).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = stranger
        .authed(Method::PUT, &path)
        .json(&json!({ "first_name": "stolen" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"], "contact is not found");

    let resp = stranger.authed(Method::DELETE, &path).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let unchanged = owner.find_test_contact().await.unwrap();
    assert_eq!(unchanged.first_name, "test");

    owner.cleanup().await;
    stranger.cleanup().await;
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_update_contact() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(Method::PUT, &format!("/api/contacts/{}", contact.id))
        .json(&json!({
            "first_name": "Alief",
            "last_name": "Mumtaz",
            "email": "alief@gmail.com",
            "phone": "08123123123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], contact.id.as_i32());
    assert_eq!(body["data"]["first_name"], "Alief");
    assert_eq!(body["data"]["last_name"], "Mumtaz");
    assert_eq!(body["data"]["email"], "alief@gmail.com");
    assert_eq!(body["data"]["phone"], "08123123123");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_update_contact_clears_omitted_fields() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(Method::PUT, &format!("/api/contacts/{}", contact.id))
        .json(&json!({ "first_name": "Solo" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["first_name"], "Solo");
    assert!(body["data"]["last_name"].is_null());
    assert!(body["data"]["email"].is_null());

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_update_contact_rejects_invalid_request() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(Method::PUT, &format!("/api/contacts/{}", contact.id))
        .json(&json!({ "first_name": "", "last_name": "", "email": "alief", "phone": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["errors"].is_array());

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_update_contact_not_found() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(
            Method::PUT,
            &format!("/api/contacts/{}", contact.id.as_i32() + 1),
        )
        .json(&json!({
            "first_name": "Alief",
            "last_name": "Mumtaz",
            "email": "alief@gmail.com",
            "phone": "08123123123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["errors"].is_string());

    ctx.cleanup().await;
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_delete_contact_and_its_addresses() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;
    ctx.create_test_address(contact.id).await;

    let resp = ctx
        .authed(Method::DELETE, &format!("/api/contacts/{}", contact.id))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], "Ok");

    assert!(ctx.find_test_contact().await.is_none());
    assert!(ctx.find_test_address(contact.id).await.is_none());

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_delete_contact_not_found() {
    let ctx = context_with_user().await;
    let contact = ctx.create_test_contact().await;

    let resp = ctx
        .authed(
            Method::DELETE,
            &format!("/api/contacts/{}", contact.id.as_i32() + 1),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

// ============================================================================
// Search
// ============================================================================

async fn search(ctx: &TestContext, query: &[(&str, &str)]) -> Value {
    let resp = search_request(ctx, query).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

fn search_request(ctx: &TestContext, query: &[(&str, &str)]) -> reqwest::RequestBuilder {
    let url = Url::parse_with_params(&ctx.url("/api/contacts"), query).unwrap();
    ctx.client
        .get(url)
        .header("Authorization", &ctx.token)
}

fn assert_paging(body: &Value, items: usize, page: i64, total_page: i64, total_item: i64) {
    assert_eq!(body["data"].as_array().unwrap().len(), items);
    assert_eq!(body["paging"]["page"], page);
    assert_eq!(body["paging"]["total_page"], total_page);
    assert_eq!(body["paging"]["total_item"], total_item);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_without_parameters() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[]).await;
    assert_paging(&body, 10, 1, 2, 15);
    assert_eq!(body["data"][0]["first_name"], "test 0");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_second_page() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[("page", "2")]).await;
    assert_paging(&body, 5, 2, 2, 15);
    assert_eq!(body["data"][0]["first_name"], "test 10");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_past_last_page() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[("page", "5")]).await;
    assert_paging(&body, 0, 5, 2, 15);

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_by_name() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[("name", "test 1")]).await;
    assert_paging(&body, 6, 1, 1, 6);

    // Case-insensitive
    let body = search(&ctx, &[("name", "TEST 1")]).await;
    assert_paging(&body, 6, 1, 1, 6);

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_by_email() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[("email", "test1@gmail.com")]).await;
    assert_paging(&body, 1, 1, 1, 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_by_phone() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    let body = search(&ctx, &[("phone", "08123456789")]).await;
    assert_paging(&body, 1, 1, 1, 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_wildcards_are_literal() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(3).await;

    let body = search(&ctx, &[("name", "%")]).await;
    assert_paging(&body, 0, 1, 0, 0);

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_rejects_invalid_paging() {
    let ctx = context_with_user().await;

    for query in [[("size", "0")], [("size", "101")], [("page", "0")], [("page", "abc")]] {
        let resp = search_request(&ctx, &query).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{query:?}");
    }

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_rejects_null_character() {
    let ctx = context_with_user().await;

    let resp = search_request(&ctx, &[("name", "\0")]).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "name");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_combines_filters() {
    let ctx = context_with_user().await;
    ctx.create_many_test_contacts(15).await;

    // "test 1" matches 1 and 10..=14, "test2" matches only 2
    let body = search(&ctx, &[("name", "test 1"), ("email", "test2")]).await;
    assert_paging(&body, 0, 1, 0, 0);

    let body = search(&ctx, &[("name", "test 1"), ("phone", "081234567812")]).await;
    assert_paging(&body, 1, 1, 1, 1);
    assert_eq!(body["data"][0]["first_name"], "test 12");

    ctx.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_search_only_returns_own_contacts() {
    let owner = context_with_user().await;
    owner.create_many_test_contacts(3).await;
    let stranger = context_with_user().await;

    let body = search(&stranger, &[]).await;
    assert_paging(&body, 0, 1, 0, 0);

    let body = search(&stranger, &[("name", "test")]).await;
    assert_paging(&body, 0, 1, 0, 0);

    let body = search(&owner, &[]).await;
    assert_paging(&body, 3, 1, 1, 3);

    owner.cleanup().await;
    stranger.cleanup().await;
}
