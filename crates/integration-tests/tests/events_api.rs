//! Integration tests for events and the group-size query.
//!
//! These tests require a running backoffice server and database.
//! Run with: cargo test -p regalia-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use regalia_integration_tests::{
    base_url, client, create_test_attendee, create_test_event, create_test_user, id_of,
    unique_email,
};

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_event_requires_existing_owner() {
    let client = client();

    let resp = client
        .post(format!("{}/events", base_url()))
        .json(&json!({
            "account_id": uuid::Uuid::new_v4(),
            "name": "Orphan event",
            "event_at": "2027-06-12T16:00:00Z",
            "event_type": "PROM"
        }))
        .send()
        .await
        .expect("Failed to attempt orphan event");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_deactivated_event_leaves_listings() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;
    let event = create_test_event(&client, &id_of(&user), "Fading event").await;
    let event_id = id_of(&event);

    let resp = client
        .patch(format!("{}/events/{event_id}", base_url()))
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .expect("Failed to deactivate event");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/events", base_url()))
        .query(&[("account_id", id_of(&user))])
        .send()
        .await
        .expect("Failed to list events");

    let events: Vec<Value> = resp.json().await.expect("Failed to parse events");
    assert!(
        events.iter().all(|e| e["id"] != event["id"]),
        "deactivated event must not appear in listings"
    );
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_group_threshold_needs_four_attendees() {
    let client = client();
    let user = create_test_user(&client, &unique_email()).await;
    let event = create_test_event(&client, &id_of(&user), "Threshold party").await;
    let event_id = id_of(&event);

    for name in ["First", "Second", "Third"] {
        create_test_attendee(&client, &event_id, name).await;
    }

    // Below the threshold the event must not qualify.
    let resp = client
        .get(format!("{}/events", base_url()))
        .query(&[("min_invited", "4")])
        .send()
        .await
        .expect("Failed to query group events");
    let events: Vec<Value> = resp.json().await.expect("Failed to parse events");
    assert!(events.iter().all(|e| e["id"] != event["id"]));

    // The fourth qualifying attendee tips it over.
    create_test_attendee(&client, &event_id, "Fourth").await;

    let resp = client
        .get(format!("{}/events", base_url()))
        .query(&[("min_invited", "4")])
        .send()
        .await
        .expect("Failed to query group events");
    let events: Vec<Value> = resp.json().await.expect("Failed to parse events");
    let hits = events.iter().filter(|e| e["id"] == event["id"]).count();
    assert_eq!(hits, 1, "qualifying event must appear exactly once");
}

#[tokio::test]
#[ignore = "Requires running backoffice server and database"]
async fn test_group_customers_skips_unlinked_owners() {
    let client = client();
    // Owner has no shopify_customer_id, so the event can qualify without
    // ever producing a customer id.
    let user = create_test_user(&client, &unique_email()).await;
    let event = create_test_event(&client, &id_of(&user), "Unlinked owner party").await;
    let event_id = id_of(&event);

    for name in ["First", "Second", "Third", "Fourth"] {
        create_test_attendee(&client, &event_id, name).await;
    }

    let resp = client
        .get(format!("{}/events/group-customers", base_url()))
        .query(&[("min_invited", "4")])
        .send()
        .await
        .expect("Failed to query group customers");

    assert_eq!(resp.status(), StatusCode::OK);
    let ids: Vec<String> = resp.json().await.expect("Failed to parse customer ids");
    assert!(ids.iter().all(|id| !id.is_empty()));
}
