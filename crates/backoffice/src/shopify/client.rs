//! Shopify Admin API GraphQL client.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::instrument;

use crate::config::ShopifyConfig;

use super::ShopifyError;

const TAGS_ADD: &str = "mutation tagsAdd($id: ID!, $tags: [String!]!) { \
     tagsAdd(id: $id, tags: $tags) { userErrors { field message } } }";

const PRODUCT_ARCHIVE: &str = "mutation productUpdate($input: ProductInput!) { \
     productUpdate(input: $input) { product { id status } userErrors { field message } } }";

const DISCOUNT_DEACTIVATE: &str = "mutation discountCodeDeactivate($id: ID!) { \
     discountCodeDeactivate(id: $id) { codeDiscountNode { id } userErrors { field message } } }";

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

/// A `userErrors` entry returned by Admin API mutations.
#[derive(Debug, Deserialize)]
struct UserError {
    #[serde(default)]
    field: Option<Vec<String>>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserErrorsPayload {
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

/// Shopify Admin API GraphQL client.
///
/// # Security
///
/// The token has HIGH PRIVILEGE access to the store. It is only handed to
/// the batch jobs, never to request handlers.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    endpoint: String,
    admin_token: String,
}

impl ShopifyClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(ShopifyClientInner {
                client: reqwest::Client::new(),
                endpoint,
                admin_token: config.admin_token.expose_secret().to_owned(),
            }),
        }
    }

    /// Execute a GraphQL document and deserialize the `data` payload.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", &self.inner.admin_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        let body: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = body.errors
            && !errors.is_empty()
        {
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        body.data
            .ok_or_else(|| ShopifyError::MissingData("empty data payload".to_owned()))
    }

    /// Surface mutation `userErrors` as a typed failure.
    fn check_user_errors(payload: &UserErrorsPayload) -> Result<(), ShopifyError> {
        if let Some(err) = payload.user_errors.first() {
            let field = err
                .field
                .as_ref()
                .map(|f| f.join("."))
                .unwrap_or_else(|| "input".to_owned());
            return Err(ShopifyError::UserError(format!(
                "{field}: {}",
                err.message
            )));
        }
        Ok(())
    }

    /// Add tags to a customer.
    ///
    /// Adding a tag the customer already carries is a no-op on Shopify's
    /// side, which is what makes the tagging job safe to re-run.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// user errors.
    #[instrument(skip(self))]
    pub async fn add_customer_tags(
        &self,
        customer_gid: &str,
        tags: &[&str],
    ) -> Result<(), ShopifyError> {
        #[derive(Debug, Deserialize)]
        struct Data {
            #[serde(rename = "tagsAdd")]
            tags_add: UserErrorsPayload,
        }

        let data: Data = self
            .execute(TAGS_ADD, json!({ "id": customer_gid, "tags": tags }))
            .await?;

        Self::check_user_errors(&data.tags_add)
    }

    /// Archive a product. Archiving an already-archived product succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// user errors.
    #[instrument(skip(self))]
    pub async fn archive_product(&self, product_gid: &str) -> Result<(), ShopifyError> {
        #[derive(Debug, Deserialize)]
        struct Data {
            #[serde(rename = "productUpdate")]
            product_update: UserErrorsPayload,
        }

        let data: Data = self
            .execute(
                PRODUCT_ARCHIVE,
                json!({ "input": { "id": product_gid, "status": "ARCHIVED" } }),
            )
            .await?;

        Self::check_user_errors(&data.product_update)
    }

    /// Deactivate a discount code. Deactivating an already-inactive code
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// user errors.
    #[instrument(skip(self))]
    pub async fn deactivate_discount(&self, discount_gid: &str) -> Result<(), ShopifyError> {
        #[derive(Debug, Deserialize)]
        struct Data {
            #[serde(rename = "discountCodeDeactivate")]
            discount_code_deactivate: UserErrorsPayload,
        }

        let data: Data = self
            .execute(DISCOUNT_DEACTIVATE, json!({ "id": discount_gid }))
            .await?;

        Self::check_user_errors(&data.discount_code_deactivate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_surface_first_error() {
        let payload: UserErrorsPayload = serde_json::from_value(json!({
            "userErrors": [
                { "field": ["input", "tags"], "message": "Tag is invalid" },
                { "field": null, "message": "Second error" }
            ]
        }))
        .unwrap();

        let err = ShopifyClient::check_user_errors(&payload).unwrap_err();
        assert_eq!(err.to_string(), "User error: input.tags: Tag is invalid");
    }

    #[test]
    fn test_empty_user_errors_ok() {
        let payload: UserErrorsPayload = serde_json::from_value(json!({})).unwrap();
        assert!(ShopifyClient::check_user_errors(&payload).is_ok());
    }

    #[test]
    fn test_graphql_response_parses_errors() {
        let body: GraphQLResponse<serde_json::Value> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "Throttled" }]
        }))
        .unwrap();

        assert!(body.data.is_none());
        assert_eq!(body.errors.unwrap()[0].message, "Throttled");
    }
}
