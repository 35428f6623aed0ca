//! Order confirmation page.
//!
//! Rendering has no side effects. Once the page has been shown, the caller
//! acknowledges it, which forgets the order and empties the cart. A page
//! that failed to render therefore consumes nothing.

use askama::Template;
use gamehub_core::{Money, OrderSnapshot};
use tracing::{debug, instrument};

use super::LineItemView;
use crate::error::Result;
use crate::state::AppState;

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub placed_at: String,
    pub total: String,
    pub items: Vec<LineItemView>,
}

impl From<&OrderSnapshot> for OrderView {
    fn from(order: &OrderSnapshot) -> Self {
        Self {
            placed_at: order.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            total: Money::new(order.total).to_string(),
            items: order.items.iter().map(LineItemView::from).collect(),
        }
    }
}

/// Confirmation page template.
#[derive(Template)]
#[template(path = "confirmation.txt")]
pub struct ConfirmationTemplate {
    pub order: Option<OrderView>,
}

/// Render the confirmation page; an order without items counts as no order.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_order(order: Option<&OrderSnapshot>) -> Result<String> {
    let template = ConfirmationTemplate {
        order: order.filter(|o| !o.is_empty()).map(OrderView::from),
    };
    Ok(template.render()?)
}

/// Render the confirmation page for the last placed order.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn show(state: &AppState) -> Result<String> {
    render_order(state.orders().get_last_order().as_ref())
}

/// Forget the last order and empty the cart.
///
/// # Errors
///
/// Returns a storage error if either entry cannot be written.
#[instrument(skip(state))]
pub fn acknowledge(state: &AppState) -> Result<()> {
    state.orders().clear_last_order()?;
    state.carts().clear_cart()?;
    debug!("Confirmation acknowledged");
    Ok(())
}

/// Render the confirmation page, then acknowledge it.
///
/// # Errors
///
/// Returns the render error, leaving storage untouched, or a storage error
/// from the acknowledgement.
pub fn show_and_acknowledge(state: &AppState) -> Result<String> {
    let page = show(state)?;
    acknowledge(state)?;
    Ok(page)
}
