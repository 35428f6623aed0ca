//! Shopping cart and line items.
//!
//! A cart is an ordered list of line items, unique by product id. Adding a
//! product that is already present merges into the existing line; the unit
//! price captured on the first add is never refreshed afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::id::ProductId;
use super::lenient;
use super::product::{Product, UNTITLED};
use crate::error::ValidationError;

/// One product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub title: String,
    /// Price at the moment the product was first added.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient::quantity_or_zero")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub image: LineItemImage,
}

/// Image shown next to a line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemImage {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub alt: String,
}

impl CartLineItem {
    /// Capture a product as a new line item.
    ///
    /// # Errors
    ///
    /// Returns `MissingProductId` if the product has no id, `InvalidQuantity`
    /// if `quantity` is zero, and `NegativePrice` if the product's effective
    /// price is below zero.
    pub fn from_product(product: &Product, quantity: u32) -> Result<Self, ValidationError> {
        if product.id.is_empty() {
            return Err(ValidationError::MissingProductId);
        }
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }

        let unit_price = product.effective_price();
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(ValidationError::NegativePrice);
        }

        let title = product.display_title().to_string();
        let url = product.image.url.clone();
        let alt = if product.image.alt.is_empty() {
            title.clone()
        } else {
            product.image.alt.clone()
        };

        Ok(Self {
            id: product.id.clone(),
            title,
            unit_price,
            quantity,
            image: LineItemImage { url, alt },
        })
    }

    /// `unit_price × quantity`, saturating instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// The title to show, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

/// An ordered collection of line items.
///
/// Persisted as a bare JSON array. Decoding requires an array; elements that
/// are not line-item records are skipped so the rest of the cart survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing line items, keeping their order.
    #[must_use]
    pub const fn from_items(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.items.iter()
    }

    /// Add `quantity` of `product`, merging into an existing line if present.
    ///
    /// A merged line keeps its original price, title and image.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` if `quantity` is zero or the merged quantity
    /// overflows, `MissingProductId` if the product has no id, and
    /// `NegativePrice` for a new line whose price is negative. The cart is
    /// unchanged on error.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        if product.id.is_empty() {
            return Err(ValidationError::MissingProductId);
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(ValidationError::InvalidQuantity)?;
            return Ok(());
        }

        self.items.push(CartLineItem::from_product(product, quantity)?);
        Ok(())
    }

    /// Drop every line item for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() != before
    }

    /// Σ `unit_price × quantity` over all line items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.line_total()))
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements = Vec::<Value>::deserialize(deserializer)?;
        let items = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                if !element.is_object() {
                    warn!(index, "Skipping cart entry that is not a line item");
                    return None;
                }
                match serde_json::from_value::<CartLineItem>(element) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping malformed cart entry");
                        None
                    }
                }
            })
            .collect();
        Ok(Self { items })
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }
}
