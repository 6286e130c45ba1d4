//! Regalia Backoffice - domain model, REST API and reconciliation jobs.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON CRUD surface, one resource per
//!   aggregate (accounts, events, attendees, looks, orders, discounts,
//!   RMAs, suit-builder catalog)
//! - `PostgreSQL` via sqlx; repositories in [`db`] own all SQL
//! - Shopify Admin GraphQL client in [`shopify`], used only by the batch
//!   jobs in [`jobs`] that reconcile the database with the store
//!
//! The library surface exists so the CLI crate can run migrations, seed
//! data and drive the jobs without going through HTTP.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod shopify;
pub mod state;
