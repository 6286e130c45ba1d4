//! Integration tests for the discount lifecycle.
//!
//! These tests require a running backoffice server and database.
//! Run with: cargo test -p regalia-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use regalia_integration_tests::{
    base_url, client, create_test_attendee, create_test_event, create_test_user, id_of,
    unique_email,
};

async fn create_fixture_discount(client: &reqwest::Client, body: Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}/discounts", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to post discount");

    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn event_and_attendee(client: &reqwest::Client) -> (String, String) {
    let user = create_test_user(client, &unique_email()).await;
    let event = create_test_event(client, &id_of(&user), "Discount party").await;
    let event_id = id_of(&event);
    let attendee = create_test_attendee(client, &event_id, "Credited").await;
    (event_id, id_of(&attendee))
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_discount_against_missing_attendee_is_rejected() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;
    let event = create_test_event(&client, &id_of(&user), "Lonely party").await;

    let (status, _) = create_fixture_discount(
        &client,
        json!({
            "event_id": id_of(&event),
            "attendee_id": uuid::Uuid::new_v4(),
            "amount": "25.00",
            "discount_type": "GIFT"
        }),
    )
    .await;

    // ReferentialIntegrity: nothing persisted.
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_party_of_four_has_no_amount() {
    let client = client();
    let (event_id, attendee_id) = event_and_attendee(&client).await;

    let (status, discount) = create_fixture_discount(
        &client,
        json!({
            "event_id": event_id,
            "attendee_id": attendee_id,
            "amount": "99.00",
            "discount_type": "PARTY_OF_FOUR"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let amount: f64 = discount["amount"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("amount should be a decimal string");
    assert!(amount.abs() < f64::EPSILON, "party-of-four stores no amount");
    assert_eq!(discount["used"], json!(false));
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_redeem_is_one_way() {
    let client = client();
    let (event_id, attendee_id) = event_and_attendee(&client).await;

    let (status, discount) = create_fixture_discount(
        &client,
        json!({
            "event_id": event_id,
            "attendee_id": attendee_id,
            "amount": "50.00",
            "discount_type": "GIFT"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&discount);

    // Redeem.
    let resp = client
        .post(format!("{}/discounts/{id}/redeem", base_url()))
        .send()
        .await
        .expect("Failed to redeem");
    assert_eq!(resp.status(), StatusCode::OK);
    let redeemed: Value = resp.json().await.expect("Failed to parse discount");
    assert_eq!(redeemed["used"], json!(true));

    // There is no un-use operation in the contract: no PATCH route exists
    // on discounts at all.
    let resp = client
        .patch(format!("{}/discounts/{id}", base_url()))
        .json(&json!({ "used": false }))
        .send()
        .await
        .expect("Failed to attempt un-use");
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Redeeming again is a no-op and the flag stays set.
    let resp = client
        .post(format!("{}/discounts/{id}/redeem", base_url()))
        .send()
        .await
        .expect("Failed to re-redeem");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/discounts/{id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch discount");
    let fetched: Value = resp.json().await.expect("Failed to parse discount");
    assert_eq!(fetched["used"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_used_prefix_filter_orders_newest_first() {
    let client = client();
    let (event_id, attendee_id) = event_and_attendee(&client).await;

    // Two generated personal codes, redeem both.
    for _ in 0..2 {
        let (status, discount) = create_fixture_discount(
            &client,
            json!({
                "event_id": event_id,
                "attendee_id": attendee_id,
                "amount": "10.00",
                "discount_type": "GIFT"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(
            discount["code"]
                .as_str()
                .is_some_and(|c| c.starts_with("IND-")),
            "generated codes carry the personal prefix"
        );

        let id = id_of(&discount);
        let resp = client
            .post(format!("{}/discounts/{id}/redeem", base_url()))
            .send()
            .await
            .expect("Failed to redeem");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .get(format!("{}/discounts", base_url()))
        .query(&[
            ("event_id", event_id.as_str()),
            ("used", "true"),
            ("code_prefix", "IND-"),
        ])
        .send()
        .await
        .expect("Failed to list used discounts");

    assert_eq!(resp.status(), StatusCode::OK);
    let discounts: Vec<Value> = resp.json().await.expect("Failed to parse discounts");
    assert_eq!(discounts.len(), 2);

    // Newest first.
    let stamps: Vec<&str> = discounts
        .iter()
        .filter_map(|d| d["created_at"].as_str())
        .collect();
    let mut sorted = stamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted, "results must be creation-time descending");
}
