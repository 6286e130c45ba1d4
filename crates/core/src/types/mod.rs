//! Core types for Regalia.
//!
//! This module provides type-safe wrappers for common domain concepts.

mod email;
mod id;
mod specs;
mod status;

pub use email::{Email, EmailError};
pub use id::{
    AccountId, AttendeeId, CatalogItemId, DiscountId, EventId, LookId, OrderId, OrderItemId,
    RmaId, RmaItemId, RoleId,
};
pub use specs::{Bundle, ProductSpecs, SpecItem, SpecsError};
pub use status::{
    AccountStatus, DiscountType, EventType, ItemStatus, OrderType, RmaItemDisposition, RmaStatus,
    RmaType,
};
