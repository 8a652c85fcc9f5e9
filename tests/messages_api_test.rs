//! Black-box tests for the messages REST API.
//!
//! Each test boots a real server instance on an ephemeral port with its
//! own database and drives it over HTTP.

use reqwest::StatusCode;
use serde_json::{json, Value};

use test_utils::spawn_app;

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to the API server!");
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_assigns_incrementing_order() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "a" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["content"], "a");
    assert_eq!(body["order"], 1);

    let response = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "b" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["order"], 2);
}

#[tokio::test]
async fn create_rejects_empty_content() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_rejects_missing_content() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_returns_messages_sorted_by_order() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for content in ["a", "b"] {
        client
            .post(format!("{}/messages/", app.address))
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap();
    }

    // Move "a" behind "b"
    let response = client
        .post(format!("{}/messages/reorder", app.address))
        .json(&json!([{ "id": 1, "order": 5 }]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Order updated successfully");

    let response = client
        .get(format!("{}/messages/", app.address))
        .send()
        .await
        .unwrap();
    let messages: Vec<Value> = response.json().await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "b");
    assert_eq!(messages[0]["order"], 2);
    assert_eq!(messages[1]["content"], "a");
    assert_eq!(messages[1]["order"], 5);
}

#[tokio::test]
async fn update_changes_content_only() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "before" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .put(format!("{}/messages/{}", app.address, created["id"]))
        .json(&json!({ "content": "after" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["order"], created["order"]);
    assert_eq!(updated["content"], "after");
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/messages/999", app.address))
        .json(&json!({ "content": "ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Message not found");
}

#[tokio::test]
async fn delete_removes_message() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "doomed" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .delete(format!("{}/messages/{}", app.address, created["id"]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Message deleted");

    // Gone from the API and from the table itself
    let messages: Vec<Value> = client
        .get(format!("{}/messages/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(messages.is_empty());

    let rows = message_api::db::list_messages(&app.db_pool).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/messages/999", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Message not found");
}

#[tokio::test]
async fn delete_preserves_remaining_order_values() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for content in ["a", "b", "c"] {
        client
            .post(format!("{}/messages/", app.address))
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap();
    }

    client
        .delete(format!("{}/messages/2", app.address))
        .send()
        .await
        .unwrap();

    let messages: Vec<Value> = client
        .get(format!("{}/messages/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let orders: Vec<i64> = messages
        .iter()
        .map(|m| m["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 3]);

    // The next create still picks up from the maximum, not the gap
    let created: Value = client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "d" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["order"], 4);
}

#[tokio::test]
async fn reorder_skips_unknown_ids() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/messages/", app.address))
        .json(&json!({ "content": "a" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/messages/reorder", app.address))
        .json(&json!([
            { "id": 1, "order": 3 },
            { "id": 999, "order": 1 }
        ]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Order updated successfully");

    let messages: Vec<Value> = client
        .get(format!("{}/messages/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["order"], 3);
}

#[tokio::test]
async fn reorder_rejects_malformed_entries() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/messages/reorder", app.address))
        .json(&json!([{ "id": "not-a-number", "order": 1 }]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
