//! Integration tests for orders and order items.
//!
//! These tests require a running backoffice server and database.
//! Run with: cargo test -p regalia-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use regalia_integration_tests::{base_url, client, create_test_user, id_of, unique_email};

async fn create_order(client: &reqwest::Client, body: Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to post order");

    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_duplicate_shopify_order_id_conflicts() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;
    let shopify_order_id = format!("it-{}", uuid::Uuid::new_v4());

    let (status, _) = create_order(
        &client,
        json!({
            "account_id": id_of(&user),
            "shopify_order_id": shopify_order_id,
            "order_types": ["NEW_ORDER"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = create_order(
        &client,
        json!({
            "account_id": id_of(&user),
            "shopify_order_id": shopify_order_id,
            "order_types": ["NEW_ORDER"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_order_types_preserve_insertion_order() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;

    let (status, order) = create_order(
        &client,
        json!({
            "account_id": id_of(&user),
            "order_types": ["RESIZE", "MISSED_ITEM", "NEW_ORDER"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        order["order_types"],
        json!(["RESIZE", "MISSED_ITEM", "NEW_ORDER"])
    );
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_order_without_types_is_rejected() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;

    let (status, _) = create_order(
        &client,
        json!({
            "account_id": id_of(&user),
            "order_types": []
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_item_status_overwrites_in_place() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;

    let (status, order) = create_order(
        &client,
        json!({
            "account_id": id_of(&user),
            "order_types": ["NEW_ORDER"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = id_of(&order);

    let resp = client
        .post(format!("{}/orders/{order_id}/items", base_url()))
        .json(&json!({
            "variant_sku": "101-CHR-40R",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Value = resp.json().await.expect("Failed to parse item");
    assert_eq!(item["status"], json!("ORDERED"));
    let item_id = id_of(&item);

    let resp = client
        .patch(format!("{}/order-items/{item_id}", base_url()))
        .json(&json!({ "status": "SHIPPED" }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse item");
    assert_eq!(updated["status"], json!("SHIPPED"));

    // Only the current value is stored.
    let resp = client
        .get(format!("{}/orders/{order_id}/items", base_url()))
        .send()
        .await
        .expect("Failed to list items");
    let items: Vec<Value> = resp.json().await.expect("Failed to parse items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], json!("SHIPPED"));
}
