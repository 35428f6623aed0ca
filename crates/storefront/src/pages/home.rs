//! Home page: the product listing.

use askama::Template;
use gamehub_core::{Money, Product};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Descriptions longer than this many characters are shortened on cards.
const DESCRIPTION_LIMIT: usize = 120;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.display_title().to_string(),
            description: truncate_description(product.description.as_deref().unwrap_or_default()),
            price: Money::new(product.effective_price()).to_string(),
            image_url: product.image.url.clone(),
        }
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.txt")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub genres: Vec<String>,
    pub selected_genre: String,
}

/// Shorten `description` to [`DESCRIPTION_LIMIT`] characters, marking the cut
/// with an ellipsis.
#[must_use]
pub fn truncate_description(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Distinct non-blank genres across `products`, trimmed and sorted.
#[must_use]
pub fn unique_genres(products: &[Product]) -> Vec<String> {
    let mut genres: Vec<String> = products
        .iter()
        .filter_map(Product::genre)
        .map(str::to_string)
        .collect();
    genres.sort();
    genres.dedup();
    genres
}

/// Render the listing, keeping only products of `genre` when one is given.
///
/// The genre choices are always computed from the full catalog.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_products(products: &[Product], genre: Option<&str>) -> Result<String> {
    let genre = genre.map(str::trim).filter(|g| !g.is_empty());
    let cards = products
        .iter()
        .filter(|product| genre.is_none_or(|g| product.genre() == Some(g)))
        .map(ProductCardView::from)
        .collect();

    let template = HomeTemplate {
        products: cards,
        genres: unique_genres(products),
        selected_genre: genre.unwrap_or("All games").to_string(),
    };
    Ok(template.render()?)
}

/// Fetch the catalog and render the home page.
///
/// # Errors
///
/// Returns the catalog error if products cannot be loaded.
#[instrument(skip(state))]
pub async fn show(state: &AppState, genre: Option<&str>) -> Result<String> {
    let products = state.catalog().fetch_products().await?;
    render_products(&products, genre)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gamehub_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, genre: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            title: Some(format!("Game {id}")),
            genre: genre.map(str::to_string),
            price: Some(Decimal::from(10)),
            ..Product::default()
        }
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("Short."), "Short.");

        let exact = "x".repeat(120);
        assert_eq!(truncate_description(&exact), exact);

        let long = "é".repeat(130);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), 121);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_unique_genres() {
        let products = vec![
            product("a", Some("Shooter")),
            product("b", Some(" Action ")),
            product("c", Some("Action")),
            product("d", Some("   ")),
            product("e", None),
        ];
        assert_eq!(unique_genres(&products), vec!["Action", "Shooter"]);
    }

    #[test]
    fn test_render_products_lists_cards() {
        let mut discounted = product("a", Some("Action"));
        discounted.discounted_price = Some(Decimal::new(750, 2));
        discounted.description = Some("A fast game.".to_string());

        let page = render_products(&[discounted, product("b", None)], None).unwrap();
        assert!(page.contains("Game a"));
        assert!(page.contains("Price: $7.50"));
        assert!(page.contains("A fast game."));
        assert!(page.contains("Game b"));
        assert!(page.contains("All games"));
    }

    #[test]
    fn test_render_products_filters_by_genre() {
        let products = vec![product("a", Some("Action")), product("b", Some("Horror"))];

        let page = render_products(&products, Some("Horror")).unwrap();
        assert!(page.contains("Game b"));
        assert!(!page.contains("Game a"));
        assert!(page.contains("Action"));
    }

    #[test]
    fn test_render_empty_listing() {
        let page = render_products(&[], None).unwrap();
        assert!(page.contains("No products found."));

        let page = render_products(&[product("a", Some("Action"))], Some("Puzzle")).unwrap();
        assert!(page.contains("No products found."));
    }
}
