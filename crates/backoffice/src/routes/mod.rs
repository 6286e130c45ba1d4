//! HTTP route handlers for the backoffice API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (verifies database)
//!
//! # Users
//! POST /users                   - Create user account
//! GET  /users                   - List accounts (?email= looks one up)
//! GET  /users/{id}              - Account detail
//! PATCH /users/{id}             - Partial update
//!
//! # Events
//! POST /events                  - Create event
//! GET  /events                  - List active events (?account_id=)
//! GET  /events/group-customers  - Distinct Shopify customer ids for group
//!                                 events (?min_invited=&after=)
//! GET  /events/{id}             - Event detail
//! PATCH /events/{id}            - Partial update (incl. deactivation)
//!
//! # Attendees & roles
//! POST /attendees               - Create attendee
//! GET  /attendees?event_id=     - List attendees of an event
//! GET  /attendees/{id}          - Attendee detail
//! PATCH /attendees/{id}         - Partial update
//! GET  /roles                   - List party roles
//!
//! # Looks
//! POST /looks                   - Create look
//! GET  /looks                   - List active looks (?account_id=)
//! GET  /looks/{id}              - Look detail
//! PATCH /looks/{id}             - Partial update (specs, name, image)
//! POST /looks/{id}/deactivate   - Soft delete (one-way)
//! POST /looks/{id}/mark-fixed   - Record external cleanup (one-way)
//!
//! # Orders
//! POST /orders                  - Create order
//! GET  /orders                  - List orders (?account_id=&event_id=)
//! GET  /orders/{id}             - Order detail
//! PATCH /orders/{id}            - Partial update
//! POST /orders/{id}/items       - Add line item
//! GET  /orders/{id}/items       - List line items
//! PATCH /order-items/{id}       - Overwrite item status
//!
//! # Discounts
//! POST /discounts               - Create discount
//! GET  /discounts               - List (?used=&code_prefix=&event_id=),
//!                                 newest first
//! GET  /discounts/{id}          - Discount detail
//! POST /discounts/{id}/redeem   - Mark used (one-way; no un-use exists)
//!
//! # RMAs
//! POST /rmas                    - Open RMA
//! GET  /rmas                    - List RMAs (?order_id=)
//! GET  /rmas/{id}               - RMA detail
//! PATCH /rmas/{id}              - Status / types / totals
//! POST /rmas/{id}/items         - Add return item
//! GET  /rmas/{id}/items         - List return items
//!
//! # Catalog
//! POST /catalog                 - Create catalog item
//! GET  /catalog                 - List active items (?category=)
//! GET  /catalog/{id}            - Item detail
//! PATCH /catalog/{id}           - Partial update
//! ```

pub mod attendees;
pub mod catalog;
pub mod discounts;
pub mod events;
pub mod looks;
pub mod orders;
pub mod rmas;
pub mod users;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Build the API router. Health endpoints are mounted by `main`.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", post(users::create).get(users::list))
        .route("/users/{id}", get(users::show).patch(users::update))
        // Events
        .route("/events", post(events::create).get(events::list))
        .route("/events/group-customers", get(events::group_customers))
        .route("/events/{id}", get(events::show).patch(events::update))
        // Attendees & roles
        .route("/attendees", post(attendees::create).get(attendees::list))
        .route(
            "/attendees/{id}",
            get(attendees::show).patch(attendees::update),
        )
        .route("/roles", get(attendees::list_roles))
        // Looks
        .route("/looks", post(looks::create).get(looks::list))
        .route("/looks/{id}", get(looks::show).patch(looks::update))
        .route("/looks/{id}/deactivate", post(looks::deactivate))
        .route("/looks/{id}/mark-fixed", post(looks::mark_fixed))
        // Orders
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/{id}", get(orders::show).patch(orders::update))
        .route(
            "/orders/{id}/items",
            post(orders::add_item).get(orders::list_items),
        )
        .route("/order-items/{id}", patch(orders::update_item))
        // Discounts
        .route("/discounts", post(discounts::create).get(discounts::list))
        .route("/discounts/{id}", get(discounts::show))
        .route("/discounts/{id}/redeem", post(discounts::redeem))
        // RMAs
        .route("/rmas", post(rmas::create).get(rmas::list))
        .route("/rmas/{id}", get(rmas::show).patch(rmas::update))
        .route("/rmas/{id}/items", post(rmas::add_item).get(rmas::list_items))
        // Catalog
        .route("/catalog", post(catalog::create).get(catalog::list))
        .route("/catalog/{id}", get(catalog::show).patch(catalog::update))
}
