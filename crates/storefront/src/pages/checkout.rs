//! Checkout page: cart review and placing the order.

use askama::Template;
use chrono::{DateTime, Utc};
use gamehub_core::{Cart, Money, OrderSnapshot};
use tracing::{info, instrument};

use super::LineItemView;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template)]
#[template(path = "checkout.txt")]
pub struct CheckoutTemplate {
    pub items: Vec<LineItemView>,
    pub total: String,
}

/// Render the checkout page for `cart`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_cart(cart: &Cart) -> Result<String> {
    let template = CheckoutTemplate {
        items: cart.iter().map(LineItemView::from).collect(),
        total: Money::new(cart.total()).to_string(),
    };
    Ok(template.render()?)
}

/// Render the checkout page for the persisted cart.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn show(state: &AppState) -> Result<String> {
    render_cart(&state.carts().get_cart())
}

/// Remove `id` from the cart and render the updated page.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or the page fails to render.
#[instrument(skip(state))]
pub fn remove(state: &AppState, id: &str) -> Result<String> {
    let cart = state.carts().remove_from_cart(id)?;
    render_cart(&cart)
}

/// Snapshot the cart as the last order, then empty the cart.
///
/// The snapshot is written before the cart is cleared, so a failed write
/// leaves the cart intact.
///
/// # Errors
///
/// Returns `EmptyCart` if there is nothing to order, or a storage error if
/// either write fails.
#[instrument(skip(state))]
pub fn place_order(state: &AppState, now: DateTime<Utc>) -> Result<OrderSnapshot> {
    let cart = state.carts().get_cart();
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let order = OrderSnapshot::from_cart(&cart, now);
    state.orders().set_last_order(&order)?;
    state.carts().clear_cart()?;

    info!(
        lines = order.items.len(),
        total = %order.total,
        "Order placed"
    );
    Ok(order)
}
