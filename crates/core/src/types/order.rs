//! Order snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::lenient;

/// Record of a placed order, kept until its confirmation has been shown.
///
/// `items` is a copy of the cart at placement; later cart changes do not
/// affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub items: Cart,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    pub total: Decimal,
}

impl OrderSnapshot {
    /// Snapshot `cart` with its total as of `created_at`.
    #[must_use]
    pub fn from_cart(cart: &Cart, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            items: cart.clone(),
            total: cart.total(),
        }
    }

    /// Whether the order has no line items to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::types::{Product, ProductId};

    #[test]
    fn test_from_cart_copies_items_and_total() {
        let mut cart = Cart::new();
        cart.add(
            &Product {
                id: ProductId::new("g1"),
                price: Some(Decimal::from(12)),
                ..Product::default()
            },
            2,
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let order = OrderSnapshot::from_cart(&cart, at);
        cart.remove("g1");

        assert_eq!(order.total, Decimal::from(24));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.created_at, at);
        assert!(!order.is_empty());
    }

    #[test]
    fn test_decodes_camel_case_record() {
        let order: OrderSnapshot = serde_json::from_value(json!({
            "createdAt": "2026-03-01T12:00:00.000Z",
            "items": [{ "id": "g1", "title": "Game One", "unitPrice": 15, "quantity": 3 }],
            "total": 45
        }))
        .unwrap();

        assert_eq!(order.total, Decimal::from(45));
        assert_eq!(order.items.get("g1").unwrap().quantity, 3);
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let result = serde_json::from_value::<OrderSnapshot>(json!({ "items": [], "total": 0 }));
        assert!(result.is_err());
    }
}
