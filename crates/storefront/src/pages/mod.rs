//! Storefront pages, rendered as plain text.
//!
//! Each page module pairs an askama template with the operations behind it:
//! - [`home`] - product listing with genre filter
//! - [`product`] - product detail and add-to-cart
//! - [`checkout`] - cart review, item removal, placing the order
//! - [`confirmation`] - the last placed order

pub mod checkout;
pub mod confirmation;
pub mod home;
pub mod product;

use gamehub_core::{CartLineItem, Money};

/// Line item display data for templates.
#[derive(Debug, Clone)]
pub struct LineItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image_url: String,
    pub image_alt: String,
}

impl From<&CartLineItem> for LineItemView {
    fn from(item: &CartLineItem) -> Self {
        let title = item.display_title().to_string();
        let image_alt = if item.image.alt.is_empty() {
            title.clone()
        } else {
            item.image.alt.clone()
        };

        Self {
            id: item.id.to_string(),
            title,
            quantity: item.quantity,
            price: Money::new(item.unit_price).to_string(),
            line_total: Money::new(item.line_total()).to_string(),
            image_url: item.image.url.clone(),
            image_alt,
        }
    }
}
