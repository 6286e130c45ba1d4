//! The `product_specs` JSON envelope carried by a Look.
//!
//! A Look's specs describe a bundle of apparel items. The document is
//! schema-less beyond a minimal envelope: a `bundle` with a Shopify product
//! id (and optional variant id), and an `items` list where each entry names
//! a `variant_sku`. Everything else in the document belongs to external
//! tooling (SKU-prefix categorization, sizing hints) and must round-trip
//! through us untouched, which is why every level keeps a flattened map
//! of the fields we do not model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors from validating a `product_specs` document.
#[derive(thiserror::Error, Debug)]
pub enum SpecsError {
    /// The document does not match the envelope shape.
    #[error("malformed product specs: {0}")]
    Malformed(#[from] serde_json::Error),
    /// `bundle.product_id` is present but empty.
    #[error("bundle product_id cannot be empty")]
    EmptyProductId,
    /// An items entry has an empty `variant_sku`.
    #[error("item {index} has an empty variant_sku")]
    EmptyVariantSku {
        /// Zero-based position of the offending item.
        index: usize,
    },
}

/// The validated envelope of a `product_specs` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecs {
    /// The Shopify bundle product this look is sold as.
    pub bundle: Bundle,
    /// The individual items making up the look.
    #[serde(default)]
    pub items: Vec<SpecItem>,
    /// Fields outside the envelope, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The bundle reference inside a specs document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Shopify product id of the bundle.
    pub product_id: String,
    /// Shopify variant id of the bundle, when one is pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Fields outside the envelope, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A single item entry inside a specs document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecItem {
    /// SKU of the chosen variant.
    pub variant_sku: String,
    /// Fields outside the envelope, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ProductSpecs {
    /// Validate a raw JSON document against the envelope.
    ///
    /// Only the envelope fields are checked; unknown fields at any level are
    /// accepted and preserved.
    ///
    /// # Errors
    ///
    /// Returns [`SpecsError`] if the document is not an object with a
    /// `bundle.product_id`, or if required strings are empty.
    pub fn from_value(value: &Value) -> Result<Self, SpecsError> {
        let specs: Self = serde_json::from_value(value.clone())?;

        if specs.bundle.product_id.is_empty() {
            return Err(SpecsError::EmptyProductId);
        }
        if let Some(index) = specs.items.iter().position(|i| i.variant_sku.is_empty()) {
            return Err(SpecsError::EmptyVariantSku { index });
        }

        Ok(specs)
    }

    /// Serialize back to a raw JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SpecsError::Malformed`] if serialization fails (cannot
    /// happen for envelopes produced by [`ProductSpecs::from_value`]).
    pub fn to_value(&self) -> Result<Value, SpecsError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "bundle": {
                "product_id": "gid://shopify/Product/8001",
                "variant_id": "gid://shopify/ProductVariant/44001"
            },
            "items": [
                { "variant_sku": "101-BLK-40R" },
                { "variant_sku": "405-WHT-M", "fit": "slim" }
            ],
            "palette": "midnight"
        })
    }

    #[test]
    fn test_valid_envelope() {
        let specs = ProductSpecs::from_value(&sample()).unwrap();
        assert_eq!(specs.bundle.product_id, "gid://shopify/Product/8001");
        assert_eq!(specs.items.len(), 2);
        assert_eq!(specs.items[1].variant_sku, "405-WHT-M");
    }

    #[test]
    fn test_missing_bundle_rejected() {
        let doc = json!({ "items": [] });
        assert!(matches!(
            ProductSpecs::from_value(&doc),
            Err(SpecsError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_product_id_rejected() {
        let doc = json!({ "bundle": { "product_id": "" }, "items": [] });
        assert!(matches!(
            ProductSpecs::from_value(&doc),
            Err(SpecsError::EmptyProductId)
        ));
    }

    #[test]
    fn test_empty_variant_sku_rejected() {
        let doc = json!({
            "bundle": { "product_id": "p1" },
            "items": [{ "variant_sku": "ok" }, { "variant_sku": "" }]
        });
        assert!(matches!(
            ProductSpecs::from_value(&doc),
            Err(SpecsError::EmptyVariantSku { index: 1 })
        ));
    }

    #[test]
    fn test_items_optional() {
        let doc = json!({ "bundle": { "product_id": "p1" } });
        let specs = ProductSpecs::from_value(&doc).unwrap();
        assert!(specs.items.is_empty());
    }

    #[test]
    fn test_unknown_fields_roundtrip() {
        let doc = sample();
        let specs = ProductSpecs::from_value(&doc).unwrap();
        let back = specs.to_value().unwrap();
        assert_eq!(back.get("palette"), doc.get("palette"));
        assert_eq!(
            back["items"][1].get("fit"),
            doc["items"][1].get("fit"),
            "item-level extras must survive"
        );
    }
}
