//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! The backoffice only talks to Shopify from the reconciliation jobs in
//! [`crate::jobs`]; the REST API itself never calls out. The calls are
//! fire-and-forget from the core's point of view: their failures are
//! logged by the jobs and never reflected back into core state except
//! through the explicit `fixed`/`used` flags.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents POSTed with `reqwest`
//! - Typed serde envelopes for responses; `userErrors` surfaced as
//!   [`ShopifyError::UserError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use regalia_backoffice::shopify::ShopifyClient;
//!
//! let client = ShopifyClient::new(config.require_shopify()?);
//!
//! client.add_customer_tags("gid://shopify/Customer/123", &["grp4"]).await?;
//! client.archive_product("gid://shopify/Product/456").await?;
//! client.deactivate_discount("gid://shopify/DiscountCodeNode/789").await?;
//! ```

mod client;

pub use client::ShopifyClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried no data for the requested field.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// User error from a mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),
}

/// Normalize a Shopify id into its GID form.
///
/// Stored external ids are sometimes bare numerics from older imports;
/// the Admin API only accepts GIDs.
#[must_use]
pub fn gid(kind: &str, id: &str) -> String {
    if id.starts_with("gid://") {
        id.to_owned()
    } else {
        format!("gid://shopify/{kind}/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_error_display() {
        let err = ShopifyError::UserError("Invalid tag".to_owned());
        assert_eq!(err.to_string(), "User error: Invalid tag");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let err = ShopifyError::GraphQL(vec![
            "Field not found".to_owned(),
            "Invalid ID".to_owned(),
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: Field not found; Invalid ID");
    }

    #[test]
    fn test_gid_passthrough() {
        assert_eq!(
            gid("Customer", "gid://shopify/Customer/42"),
            "gid://shopify/Customer/42"
        );
    }

    #[test]
    fn test_gid_from_numeric() {
        assert_eq!(gid("Product", "8001"), "gid://shopify/Product/8001");
    }
}
