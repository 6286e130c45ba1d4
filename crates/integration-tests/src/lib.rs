//! Integration tests for Regalia.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p regalia-cli -- migrate
//!
//! # Start the API
//! cargo run -p regalia-backoffice
//!
//! # Run the tests against it
//! cargo test -p regalia-integration-tests -- --ignored
//! ```
//!
//! The tests are `#[ignore]`d by default because they need a running
//! server and database; fixtures use random emails and numbers so suites
//! can be re-run without cleanup.

use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

/// Base URL for the backoffice API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BACKOFFICE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Plain HTTP client for the API.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email address for fixture accounts.
#[must_use]
pub fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

/// Test helper: create a user account and return its JSON body.
///
/// # Panics
///
/// Panics if the request fails or does not return 201.
pub async fn create_test_user(client: &Client, email: &str) -> Value {
    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&serde_json::json!({
            "email": email,
            "first_name": "Integration",
            "last_name": "Test"
        }))
        .send()
        .await
        .expect("Failed to create test user");

    assert_eq!(resp.status(), 201, "user creation should return 201");
    resp.json().await.expect("Failed to parse user response")
}

/// Test helper: create an event owned by the given account.
///
/// # Panics
///
/// Panics if the request fails or does not return 201.
pub async fn create_test_event(client: &Client, account_id: &str, name: &str) -> Value {
    let resp = client
        .post(format!("{}/events", base_url()))
        .json(&serde_json::json!({
            "account_id": account_id,
            "name": name,
            "event_at": "2027-06-12T16:00:00Z",
            "event_type": "WEDDING"
        }))
        .send()
        .await
        .expect("Failed to create test event");

    assert_eq!(resp.status(), 201, "event creation should return 201");
    resp.json().await.expect("Failed to parse event response")
}

/// Test helper: add an active invited attendee to an event.
///
/// # Panics
///
/// Panics if the request fails or does not return 201.
pub async fn create_test_attendee(client: &Client, event_id: &str, first_name: &str) -> Value {
    let resp = client
        .post(format!("{}/attendees", base_url()))
        .json(&serde_json::json!({
            "event_id": event_id,
            "first_name": first_name,
            "last_name": "Attendee",
            "invited": true
        }))
        .send()
        .await
        .expect("Failed to create test attendee");

    assert_eq!(resp.status(), 201, "attendee creation should return 201");
    resp.json().await.expect("Failed to parse attendee response")
}

/// Extract the string `id` field from a response body.
///
/// # Panics
///
/// Panics if the field is absent.
#[must_use]
pub fn id_of(value: &Value) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .expect("response should carry an id")
        .to_owned()
}
