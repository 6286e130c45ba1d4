//! Seed the database with a small demo dataset.
//!
//! Intended for local development only: one account, one wedding with a
//! full party, a look, an order and a party-of-four discount.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

use regalia_core::{DiscountType, Email, EventType, ItemStatus, OrderType};

use regalia_backoffice::config::BackofficeConfig;
use regalia_backoffice::db::accounts::NewAccount;
use regalia_backoffice::db::attendees::NewAttendee;
use regalia_backoffice::db::discounts::{GROUP_CODE_PREFIX, NewDiscount, generate_code};
use regalia_backoffice::db::events::NewEvent;
use regalia_backoffice::db::looks::NewLook;
use regalia_backoffice::db::orders::{NewOrder, NewOrderItem};
use regalia_backoffice::db::{
    self, AccountRepository, AttendeeRepository, DiscountRepository, EventRepository,
    LookRepository, OrderRepository, RepositoryError,
};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] regalia_backoffice::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid seed data: {0}")]
    InvalidData(String),
}

/// Insert the demo dataset.
///
/// # Errors
///
/// Returns `SeedError` if the configuration is incomplete, the database
/// is unreachable, or an insert fails (including re-running the seed
/// against a database that already holds it - the demo email collides).
pub async fn run() -> Result<(), SeedError> {
    let config = BackofficeConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let email = Email::parse("demo.groom@regalia.events")
        .map_err(|e| SeedError::InvalidData(e.to_string()))?;

    let account = AccountRepository::new(&pool)
        .create(&NewAccount {
            email,
            first_name: "Theo".to_owned(),
            last_name: "Walker".to_owned(),
            shopify_customer_id: None,
            metadata: json!({ "source": "seed" }),
        })
        .await?;
    tracing::info!(account = %account.id, "seeded account");

    let event = EventRepository::new(&pool)
        .create(&NewEvent {
            account_id: account.id,
            name: "Walker / Boone wedding".to_owned(),
            event_at: Utc::now() + Duration::days(120),
            event_type: EventType::Wedding,
            metadata: json!({ "venue": "Maple Grove" }),
        })
        .await?;
    tracing::info!(event = %event.id, "seeded event");

    let attendees = AttendeeRepository::new(&pool);
    let mut first_attendee = None;
    for (first, last) in [
        ("Theo", "Walker"),
        ("Jordan", "Boone"),
        ("Sam", "Fletcher"),
        ("Avery", "Park"),
    ] {
        let attendee = attendees
            .create(&NewAttendee {
                event_id: event.id,
                account_id: None,
                look_id: None,
                role_id: None,
                first_name: first.to_owned(),
                last_name: last.to_owned(),
                invited: true,
            })
            .await?;
        first_attendee.get_or_insert(attendee);
    }
    let Some(first_attendee) = first_attendee else {
        return Err(SeedError::InvalidData("no attendees seeded".to_owned()));
    };
    tracing::info!(event = %event.id, "seeded party of four");

    let look = LookRepository::new(&pool)
        .create(&NewLook {
            account_id: account.id,
            name: "Charcoal Shawl".to_owned(),
            product_specs: json!({
                "bundle": { "product_id": "8001", "variant_id": "44001" },
                "items": [
                    { "variant_sku": "101-CHR-40R" },
                    { "variant_sku": "405-WHT-M" },
                    { "variant_sku": "720-BLK-OS" }
                ]
            }),
            image_path: None,
        })
        .await?;
    tracing::info!(look = %look.id, "seeded look");

    let orders = OrderRepository::new(&pool);
    let order = orders
        .create(&NewOrder {
            account_id: account.id,
            event_id: Some(event.id),
            shopify_order_id: None,
            shopify_order_number: Some("#1001".to_owned()),
            order_types: vec![OrderType::NewOrder],
            meta: json!({}),
        })
        .await?;
    orders
        .add_item(
            order.id,
            &NewOrderItem {
                shopify_product_id: None,
                shopify_variant_id: None,
                variant_sku: "101-CHR-40R".to_owned(),
                quantity: 1,
                status: ItemStatus::Ordered,
            },
        )
        .await?;
    tracing::info!(order = %order.id, "seeded order");

    let discount = DiscountRepository::new(&pool)
        .create(&NewDiscount {
            event_id: event.id,
            attendee_id: first_attendee.id,
            amount: Decimal::ZERO,
            discount_type: DiscountType::PartyOfFour,
            code: Some(generate_code(GROUP_CODE_PREFIX)),
            shopify_discount_id: None,
            shopify_product_id: None,
            shopify_variant_id: None,
        })
        .await?;
    tracing::info!(discount = %discount.id, code = %discount.code, "seeded discount");

    tracing::info!("Seed complete!");
    Ok(())
}
