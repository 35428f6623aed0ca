//! Persisted cart and order state.
//!
//! # Layers
//!
//! - [`KeyValueStore`] - a synchronous string-to-string store (the storefront's
//!   equivalent of browser local storage)
//! - [`JsonStore`] - JSON encode/decode over a backend; decode failures fall
//!   back to a default instead of erroring
//! - [`CartStore`] and [`OrderStore`] - the only writers of their keys
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use gamehub_core::{CartStore, MemoryStore, Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! let carts = CartStore::new(Arc::new(MemoryStore::new()));
//! let product = Product {
//!     id: ProductId::new("g1"),
//!     price: Some(Decimal::from(20)),
//!     discounted_price: Some(Decimal::from(15)),
//!     ..Product::default()
//! };
//!
//! carts.add_to_cart(&product, 3)?;
//! assert_eq!(carts.get_cart_total(None), Decimal::from(45));
//! # Ok::<(), gamehub_core::StoreError>(())
//! ```

mod cart;
mod json;
mod memory;
mod order;

pub use cart::CartStore;
pub use json::{Decoded, FallbackReason, JsonStore};
pub use memory::MemoryStore;
pub use order::OrderStore;

use crate::error::StorageError;

/// Key holding the shopping cart.
pub const CART_KEY: &str = "gamehub-cart-v1";

/// Key holding the last placed order.
pub const LAST_ORDER_KEY: &str = "gamehub-last-order-v1";

/// A synchronous key-value store of raw strings.
///
/// Implementations must be safe to share, but callers never rely on
/// cross-process coordination: the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value under `key`, or `None` if there is no entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted (quota, I/O).
    fn set(&self, key: &str, raw: &str) -> Result<(), StorageError>;

    /// Delete the entry under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that `key` is non-empty and limited to `[A-Za-z0-9._-]`.
///
/// Keys double as file names in the file-backed store, so path separators
/// and leading dots are refused.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` for any other key.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(CART_KEY).is_ok());
        assert!(validate_key(LAST_ORDER_KEY).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }
}
