//! Product detail page.

use askama::Template;
use gamehub_core::{Cart, Money, Product};
use tracing::{info, instrument};

use crate::error::Result;
use crate::state::AppState;

/// Status line shown after a successful add.
pub const ADDED_TO_CART: &str = "Added to cart.";

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub image_alt: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let title = product.display_title().to_string();
        let image_alt = if product.image.alt.is_empty() {
            title.clone()
        } else {
            product.image.alt.clone()
        };

        Self {
            id: product.id.to_string(),
            meta: meta_line(product),
            price: Money::new(product.effective_price()).to_string(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image.url.clone(),
            image_alt,
            title,
        }
    }
}

/// Product detail template.
#[derive(Template)]
#[template(path = "product.txt")]
pub struct ProductTemplate {
    pub product: ProductView,
}

/// `genre • released • ageRating`, skipping blank parts.
#[must_use]
pub fn meta_line(product: &Product) -> String {
    [&product.genre, &product.released, &product.age_rating]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Render the detail page for `product`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_product(product: &Product) -> Result<String> {
    let template = ProductTemplate {
        product: ProductView::from(product),
    };
    Ok(template.render()?)
}

/// Fetch a product and render its detail page.
///
/// # Errors
///
/// Returns the catalog error if the product cannot be loaded.
#[instrument(skip(state))]
pub async fn show(state: &AppState, id: &str) -> Result<String> {
    let product = state.catalog().fetch_product(id).await?;
    render_product(&product)
}

/// Fetch a product and add `quantity` of it to the cart.
///
/// # Errors
///
/// Returns the catalog error if the product cannot be loaded, the validation
/// error if it cannot be added, or a storage error if the cart cannot be
/// saved.
#[instrument(skip(state))]
pub async fn add_to_cart(state: &AppState, id: &str, quantity: u32) -> Result<Cart> {
    let product = state.catalog().fetch_product(id).await?;
    let cart = state.carts().add_to_cart(&product, quantity)?;
    info!(product_id = %product.id, quantity, "Added product to cart");
    Ok(cart)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gamehub_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    fn space_war() -> Product {
        Product {
            id: ProductId::new("g1"),
            title: Some("Space War".to_string()),
            description: Some("Defend the fleet.".to_string()),
            genre: Some("Action".to_string()),
            released: Some("2019".to_string()),
            age_rating: Some("16+".to_string()),
            price: Some(Decimal::from(20)),
            discounted_price: Some(Decimal::new(1499, 2)),
            ..Product::default()
        }
    }

    #[test]
    fn test_meta_line_skips_blanks() {
        assert_eq!(meta_line(&space_war()), "Action • 2019 • 16+");

        let product = Product {
            released: Some(String::new()),
            ..space_war()
        };
        assert_eq!(meta_line(&product), "Action • 16+");

        assert_eq!(meta_line(&Product::default()), "");
    }

    #[test]
    fn test_render_product() {
        let page = render_product(&space_war()).unwrap();
        assert!(page.contains("Space War"));
        assert!(page.contains("Action • 2019 • 16+"));
        assert!(page.contains("Price: $14.99"));
        assert!(page.contains("Defend the fleet."));
    }

    #[test]
    fn test_render_product_defaults() {
        let product = Product {
            id: ProductId::new("bare"),
            ..Product::default()
        };
        let page = render_product(&product).unwrap();
        assert!(page.contains("Untitled"));
        assert!(page.contains("Price: $0.00"));
    }
}
