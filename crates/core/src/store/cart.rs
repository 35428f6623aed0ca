//! Cart store: sole owner of the persisted cart.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use super::json::{Decoded, JsonStore};
use super::{CART_KEY, KeyValueStore};
use crate::error::{Result, StorageError, ValidationError};
use crate::types::{Cart, CartLineItem, Product};

/// Reads and mutates the shopping cart.
///
/// Every mutation loads the whole cart, changes it in memory and writes it
/// back with a single write.
#[derive(Debug, Clone)]
pub struct CartStore {
    json: JsonStore,
}

impl CartStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            json: JsonStore::new(backend),
        }
    }

    /// Load the cart, reporting whether the stored entry was usable.
    #[must_use]
    pub fn load(&self) -> Decoded<Cart> {
        self.json.read(CART_KEY, Cart::new())
    }

    /// The persisted cart, or an empty cart if none is stored or the stored
    /// entry is malformed.
    #[must_use]
    pub fn get_cart(&self) -> Cart {
        self.load().into_inner()
    }

    /// Replace the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn set_cart(&self, cart: &Cart) -> std::result::Result<(), StorageError> {
        self.json.write(CART_KEY, cart)
    }

    /// Replace the persisted cart from untyped JSON.
    ///
    /// Nothing is written unless the whole value is a valid cart.
    ///
    /// # Errors
    ///
    /// Returns `CartNotSequence` if `value` is not an array,
    /// `MalformedLineItem` if an element is not a line-item record, or a
    /// storage error if the write fails.
    pub fn set_cart_value(&self, value: Value) -> Result<()> {
        let Value::Array(elements) = value else {
            return Err(ValidationError::CartNotSequence.into());
        };

        let items = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                if !element.is_object() {
                    return Err(ValidationError::MalformedLineItem { index });
                }
                serde_json::from_value::<CartLineItem>(element)
                    .map_err(|_| ValidationError::MalformedLineItem { index })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.set_cart(&Cart::from_items(items))?;
        Ok(())
    }

    /// Add `quantity` of `product` to the cart and persist it.
    ///
    /// If the product is already in the cart its quantity grows; its stored
    /// price, title and image stay as first captured.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero quantity, a product without an
    /// id or a negative price, or a storage error if the write fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<Cart> {
        let mut cart = self.get_cart();
        cart.add(product, quantity)?;
        self.set_cart(&cart)?;
        debug!(lines = cart.len(), "Added to cart");
        Ok(cart)
    }

    /// Remove every line item for `id` and persist the cart.
    ///
    /// Removing an id that is not in the cart changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: &str) -> std::result::Result<Cart, StorageError> {
        let mut cart = self.get_cart();
        let removed = cart.remove(id);
        self.set_cart(&cart)?;
        debug!(removed, "Removed from cart");
        Ok(cart)
    }

    /// Persist an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn clear_cart(&self) -> std::result::Result<(), StorageError> {
        self.set_cart(&Cart::new())
    }

    /// Σ `unit_price × quantity` over `cart`, or over the persisted cart when
    /// no cart is given. Never fails.
    #[must_use]
    pub fn get_cart_total(&self, cart: Option<&Cart>) -> Decimal {
        match cart {
            Some(cart) => cart.total(),
            None => self.get_cart().total(),
        }
    }

    /// Total quantity across the persisted cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.get_cart().item_count()
    }
}
