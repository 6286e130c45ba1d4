//! Status and type enums for domain entities.
//!
//! Two families live here:
//!
//! - Closed enums (`EventType`, `DiscountType`, `AccountStatus`) whose value
//!   sets are stable and exhaustively matched.
//! - Open enums defined with [`open_enum!`], for value sets that grow
//!   post-deployment (RMA statuses gained `WAREHOUSE_CANCELED` and
//!   `CS_COMPLETE` after launch, order types keep gaining reasons). Unknown
//!   stored values deserialize into an `Other(String)` variant and round-trip
//!   verbatim, so historic rows never need migrating when a value is added.

use serde::{Deserialize, Serialize};

/// Macro to define an open, append-only enum.
///
/// Creates an enum with the listed variants plus a trailing `Other(String)`
/// catch-all. Conversions are total: every string maps to a variant, and
/// `as_str()` returns the exact stored representation, so persisting and
/// re-reading any value (known or not) is lossless.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A value added after this build shipped, preserved verbatim.
            Other(String),
        }

        impl $name {
            /// The stored string representation of this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(s) => s,
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let s = ::std::string::String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }
    };
}

open_enum! {
    /// RMA workflow status.
    ///
    /// The usual progression is PENDING → {RECEIVED, PENDING_CS_ACTION} →
    /// {RESTOCKED, WAREHOUSE_COMPLETE, WAREHOUSE_CANCELED} → {COMPLETED,
    /// CS_COMPLETE, CLOSED}, but transitions are not enforced anywhere:
    /// warehouse tooling has historically written statuses out of order and
    /// stored rows must stay readable.
    RmaStatus {
        Pending => "PENDING",
        Received => "RECEIVED",
        Restocked => "RESTOCKED",
        Closed => "CLOSED",
        PendingCsAction => "PENDING_CS_ACTION",
        WarehouseComplete => "WAREHOUSE_COMPLETE",
        Completed => "COMPLETED",
        CsComplete => "CS_COMPLETE",
        WarehouseCanceled => "WAREHOUSE_CANCELED",
    }
}

impl Default for RmaStatus {
    fn default() -> Self {
        Self::Pending
    }
}

open_enum! {
    /// Why an RMA exists. An RMA can carry several of these at once
    /// (e.g. a shipment that is both DAMAGED and an EXCHANGE).
    RmaType {
        Resize => "RESIZE",
        Damaged => "DAMAGED",
        Cancellation => "CANCELLATION",
        Exchange => "EXCHANGE",
    }
}

open_enum! {
    /// Per-item return disposition, independent of the parent RMA's types.
    RmaItemDisposition {
        Disliked => "DISLIKED",
        TooBig => "TOO_BIG",
        TooSmall => "TOO_SMALL",
        Damaged => "DAMAGED",
        WrongItem => "WRONG_ITEM",
    }
}

open_enum! {
    /// Why an order exists. Multi-valued on the order; values are additive
    /// forever so historical reporting keeps working.
    OrderType {
        NewOrder => "NEW_ORDER",
        Resize => "RESIZE",
        DamagedReplacement => "DAMAGED_REPLACEMENT",
        MissedItem => "MISSED_ITEM",
    }
}

open_enum! {
    /// Current fulfillment state of a single order item. Overwritten in
    /// place; only the current value is stored.
    ItemStatus {
        Ordered => "ORDERED",
        Fulfilled => "FULFILLED",
        Shipped => "SHIPPED",
        Returned => "RETURNED",
        Refunded => "REFUNDED",
        Backorder => "BACKORDER",
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        Self::Ordered
    }
}

/// The kind of occasion an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Wedding,
    Prom,
    #[default]
    Other,
}

impl EventType {
    /// The stored string representation of this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "WEDDING",
            Self::Prom => "PROM",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEDDING" => Ok(Self::Wedding),
            "PROM" => Ok(Self::Prom),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("invalid event type: {s}")),
        }
    }
}

/// Type of a discount attached to an attendee within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// A monetary gift credit.
    Gift,
    /// The attendee's order was paid in full by someone else.
    FullPay,
    /// Qualifying condition for group events; carries no monetary amount
    /// by convention.
    PartyOfFour,
}

impl DiscountType {
    /// The stored string representation of this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gift => "GIFT",
            Self::FullPay => "FULL_PAY",
            Self::PartyOfFour => "PARTY_OF_FOUR",
        }
    }
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GIFT" => Ok(Self::Gift),
            "FULL_PAY" => Ok(Self::FullPay),
            "PARTY_OF_FOUR" => Ok(Self::PartyOfFour),
            _ => Err(format!("invalid discount type: {s}")),
        }
    }
}

/// Account lifecycle status. New accounts stay disabled until activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Disabled,
    Enabled,
}

impl AccountStatus {
    /// The stored string representation of this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "enabled" => Ok(Self::Enabled),
            _ => Err(format!("invalid account status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rma_status_known_roundtrip() {
        for text in [
            "PENDING",
            "RECEIVED",
            "RESTOCKED",
            "CLOSED",
            "PENDING_CS_ACTION",
            "WAREHOUSE_COMPLETE",
            "COMPLETED",
            "CS_COMPLETE",
            "WAREHOUSE_CANCELED",
        ] {
            let status = RmaStatus::from(text);
            assert!(!matches!(status, RmaStatus::Other(_)), "unmapped: {text}");
            assert_eq!(status.as_str(), text);
        }
    }

    #[test]
    fn test_rma_status_unknown_preserved() {
        let status = RmaStatus::from("QUALITY_HOLD");
        assert_eq!(status, RmaStatus::Other("QUALITY_HOLD".to_owned()));
        assert_eq!(status.as_str(), "QUALITY_HOLD");
    }

    #[test]
    fn test_rma_status_serde_roundtrip() {
        let json = serde_json::to_string(&RmaStatus::PendingCsAction).unwrap();
        assert_eq!(json, "\"PENDING_CS_ACTION\"");
        let back: RmaStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RmaStatus::PendingCsAction);

        // Unknown values survive a serde round-trip untouched
        let back: RmaStatus = serde_json::from_str("\"QUALITY_HOLD\"").unwrap();
        assert_eq!(serde_json::to_string(&back).unwrap(), "\"QUALITY_HOLD\"");
    }

    #[test]
    fn test_rma_status_default_is_pending() {
        assert_eq!(RmaStatus::default(), RmaStatus::Pending);
    }

    #[test]
    fn test_order_type_roundtrip() {
        let types = vec![OrderType::NewOrder, OrderType::Resize];
        let stored: Vec<&str> = types.iter().map(OrderType::as_str).collect();
        let back: Vec<OrderType> = stored.into_iter().map(OrderType::from).collect();
        assert_eq!(back, types);
    }

    #[test]
    fn test_item_status_default() {
        assert_eq!(ItemStatus::default(), ItemStatus::Ordered);
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!("WEDDING".parse::<EventType>().unwrap(), EventType::Wedding);
        assert!("GALA".parse::<EventType>().is_err());
    }

    #[test]
    fn test_event_type_serde() {
        assert_eq!(
            serde_json::to_string(&EventType::Wedding).unwrap(),
            "\"WEDDING\""
        );
    }

    #[test]
    fn test_discount_type_parse() {
        assert_eq!(
            "PARTY_OF_FOUR".parse::<DiscountType>().unwrap(),
            DiscountType::PartyOfFour
        );
        assert!("BOGO".parse::<DiscountType>().is_err());
    }

    #[test]
    fn test_account_status_defaults_disabled() {
        assert_eq!(AccountStatus::default(), AccountStatus::Disabled);
        assert_eq!(
            "disabled".parse::<AccountStatus>().unwrap(),
            AccountStatus::Disabled
        );
    }
}
