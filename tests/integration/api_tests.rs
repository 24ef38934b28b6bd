//! API integration tests
//!
//! These run against a live server (memory store is enough):
//! `DATABASE_URL=memory cargo run`, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to create an author and return its id
async fn create_author(client: &Client, first: &str, family: &str) -> String {
    let response = client
        .post(format!("{}/catalog/author", BASE_URL))
        .json(&json!({
            "first_name": first,
            "family_name": family
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No author ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_catalog_home_counts() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Local Library Home");
    assert!(body["data"]["book_count"].is_number());
    assert!(body["data"]["book_instance_available_count"].is_number());
    assert!(body["data"]["author_count"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Book List");
    assert!(body["book_list"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_book() {
    let client = Client::new();
    let author_id = create_author(&client, "Smoke", "Test").await;

    // Create book
    let response = client
        .post(format!("{}/catalog/book", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "author": author_id,
            "summary": "A smoke test record",
            "isbn": "978-0-00-000000-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_str().expect("No book ID").to_string();

    // Detail expands the author reference
    let response = client
        .get(format!("{}/catalog/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["author"]["family_name"], "Test");

    // Delete book, then the author
    let response = client
        .delete(format!("{}/catalog/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/catalog/author/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_invalid_book_submission_is_unprocessable() {
    let client = Client::new();

    let response = client
        .post(format!("{}/catalog/book", BASE_URL))
        .json(&json!({
            "title": "",
            "author": "",
            "summary": "",
            "isbn": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"].is_array());
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_blocked_author_delete_reports_dependents() {
    let client = Client::new();
    let author_id = create_author(&client, "Blocked", "Delete").await;

    let response = client
        .post(format!("{}/catalog/book", BASE_URL))
        .json(&json!({
            "title": "Dependent Book",
            "author": author_id,
            "summary": "Keeps its author alive",
            "isbn": "978-0-00-000000-1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_str().expect("No book ID").to_string();

    let response = client
        .delete(format!("{}/catalog/author/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["author_books"].is_array());

    // Cleanup
    let _ = client
        .delete(format!("{}/catalog/book/{}", BASE_URL, book_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/catalog/author/{}", BASE_URL, author_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_book_is_a_noop() {
    let client = Client::new();

    let response = client
        .delete(format!(
            "{}/catalog/book/00000000-0000-0000-0000-000000000000",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_unknown_book_detail_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/catalog/book/00000000-0000-0000-0000-000000000000",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_instance_form_carries_status_options() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/bookinstance/create", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["book_list"].is_array());
    assert_eq!(body["status_list"][0], "Maintenance");
}
