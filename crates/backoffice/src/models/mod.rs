//! Domain types for the backoffice.
//!
//! These are validated domain objects produced by the repositories in
//! [`crate::db`] and serialized directly as API responses. Request DTOs
//! live beside their handlers in [`crate::routes`].

pub mod account;
pub mod attendee;
pub mod catalog;
pub mod discount;
pub mod event;
pub mod look;
pub mod order;
pub mod rma;

pub use account::Account;
pub use attendee::{Attendee, Role};
pub use catalog::CatalogItem;
pub use discount::Discount;
pub use event::Event;
pub use look::Look;
pub use order::{Order, OrderItem};
pub use rma::{Rma, RmaItem};
