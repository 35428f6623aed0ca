//! Error types for cart and order state.
//!
//! Validation and storage failures always reach the caller. Decode failures
//! never do: they are absorbed by [`crate::store::JsonStore::read`].

use thiserror::Error;

/// The caller supplied structurally invalid input.
///
/// The messages are shown to shoppers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A cart replacement was not a JSON array.
    #[error("Cart must be an array.")]
    CartNotSequence,

    /// A cart replacement contained an element that is not a line item.
    #[error("Cart item at position {index} is not a valid line item.")]
    MalformedLineItem {
        /// Zero-based position of the offending element.
        index: usize,
    },

    /// The product being added has no identifier.
    #[error("Cannot add to cart: product is missing id.")]
    MissingProductId,

    /// Quantity was zero or the merged quantity overflowed.
    #[error("Quantity must be a number greater than 0.")]
    InvalidQuantity,

    /// The product's price resolved to a negative amount.
    #[error("Cannot add to cart: price must not be negative.")]
    NegativePrice,

    /// An order snapshot was null or not a JSON object.
    #[error("Last order must be an object.")]
    OrderNotRecord,

    /// An order snapshot object is missing required fields.
    #[error("Last order is not a valid order: {0}")]
    MalformedOrder(String),
}

/// The underlying key-value store could not persist a value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The value could not be serialized to JSON.
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store has no room for the value.
    #[error("Storage quota exceeded writing {key}: need {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend failed at the I/O level.
    #[error("Storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Error returned by cart and order mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
