//! Catalog product records.
//!
//! Mirrors the GameHub catalog payload. Every field other than `id` is
//! optional and decoded leniently so a single odd field does not hide a
//! product from the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::lenient;

/// Title used when a product or line item has none.
pub const UNTITLED: &str = "Untitled";

/// A product as returned by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub released: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub age_rating: Option<String>,
    /// Base price.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient::optional_decimal"
    )]
    pub price: Option<Decimal>,
    /// Sale price; takes precedence over `price` when present.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient::optional_decimal"
    )]
    pub discounted_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub on_sale: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub image: ProductImage,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub favorite: bool,
}

/// Cover image for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub alt: String,
}

impl Product {
    /// The title to show, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// The price a shopper pays right now: the sale price if any, else the
    /// base price, else zero.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price
            .or(self.price)
            .unwrap_or(Decimal::ZERO)
    }

    /// The genre with surrounding whitespace removed, if non-blank.
    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_catalog_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": "f99cafd2-bd40-4694-8b33-a6052f36b435",
            "title": "Space War",
            "description": "Fight for the galaxy.",
            "genre": "Action",
            "released": "2005",
            "ageRating": "18+",
            "price": 59.99,
            "discountedPrice": 49.99,
            "onSale": true,
            "image": { "url": "https://example.com/space.jpg", "alt": "Space War cover" },
            "tags": ["space", "shooter"],
            "favorite": false
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "f99cafd2-bd40-4694-8b33-a6052f36b435");
        assert_eq!(product.display_title(), "Space War");
        assert_eq!(product.age_rating.as_deref(), Some("18+"));
        assert_eq!(product.effective_price(), Decimal::new(4999, 2));
        assert!(product.on_sale);
        assert_eq!(product.image.alt, "Space War cover");
        assert_eq!(product.tags, vec!["space", "shooter"]);
    }

    #[test]
    fn test_effective_price_fallbacks() {
        let mut product = Product {
            price: Some(Decimal::from(20)),
            ..Product::default()
        };
        assert_eq!(product.effective_price(), Decimal::from(20));

        product.discounted_price = Some(Decimal::from(15));
        assert_eq!(product.effective_price(), Decimal::from(15));

        assert_eq!(Product::default().effective_price(), Decimal::ZERO);
    }

    #[test]
    fn test_odd_fields_do_not_reject_product() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "title": "",
            "price": "oops",
            "image": "not-an-object",
            "tags": "single",
            "released": 1998
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.display_title(), UNTITLED);
        assert_eq!(product.price, None);
        assert_eq!(product.image, ProductImage::default());
        assert!(product.tags.is_empty());
        assert_eq!(product.released.as_deref(), Some("1998"));
    }

    #[test]
    fn test_genre_is_trimmed() {
        let product = Product {
            genre: Some("  Horror ".to_string()),
            ..Product::default()
        };
        assert_eq!(product.genre(), Some("Horror"));
    }
}
