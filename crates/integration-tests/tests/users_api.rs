//! Integration tests for user accounts.
//!
//! These tests require a running backoffice server and database.
//! Run with: cargo test -p regalia-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use regalia_integration_tests::{base_url, client, create_test_user, id_of, unique_email};

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_user_create_and_get() {
    let client = client();
    let email = unique_email();

    let user = create_test_user(&client, &email).await;
    let id = id_of(&user);
    assert_eq!(user["email"], json!(email));
    // New accounts start disabled.
    assert_eq!(user["status"], json!("disabled"));

    let resp = client
        .get(format!("{}/users/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get user");

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to parse user");
    assert_eq!(fetched["id"], user["id"]);
    assert_eq!(fetched["email"], json!(email));
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_duplicate_email_conflicts_case_insensitively() {
    let client = client();
    let email = unique_email();

    create_test_user(&client, &email).await;

    // Same address with different casing must be rejected.
    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&json!({
            "email": email.to_uppercase(),
            "first_name": "Shadow",
            "last_name": "Copy"
        }))
        .send()
        .await
        .expect("Failed to attempt duplicate user");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_email_lookup_ignores_case() {
    let client = client();
    let email = unique_email();

    let user = create_test_user(&client, &email).await;

    let resp = client
        .get(format!("{}/users", base_url()))
        .query(&[("email", email.to_uppercase())])
        .send()
        .await
        .expect("Failed to look up user");

    assert_eq!(resp.status(), StatusCode::OK);
    let found: Vec<Value> = resp.json().await.expect("Failed to parse users");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], user["id"]);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_invalid_email_is_bad_request() {
    let client = client();

    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&json!({
            "email": "not-an-email",
            "first_name": "No",
            "last_name": "At"
        }))
        .send()
        .await
        .expect("Failed to attempt invalid user");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_user_activation_via_patch() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;
    let id = id_of(&user);

    let resp = client
        .patch(format!("{}/users/{id}", base_url()))
        .json(&json!({ "status": "enabled" }))
        .send()
        .await
        .expect("Failed to update user");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse user");
    assert_eq!(updated["status"], json!("enabled"));
}
