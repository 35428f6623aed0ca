//! Unified error handling for storefront pages.
//!
//! Every page operation returns `Result<T, AppError>`. The binary reports an
//! error once, through [`AppError::report`], and shows the shopper
//! [`AppError::user_message`].

use gamehub_core::{StorageError, StoreError, ValidationError};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Shopper input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// A page template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => Self::Validation(e),
            StoreError::Storage(e) => Self::Storage(e),
        }
    }
}

impl AppError {
    /// The message shown to the shopper.
    ///
    /// Internal details of storage and rendering failures are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(StorageError::QuotaExceeded { .. }) => {
                "Could not save: local storage is full.".to_string()
            }
            Self::Storage(_) => "Could not save your cart. Try again.".to_string(),
            Self::Render(_) => "Something went wrong displaying this page.".to_string(),
            _ => self.to_string(),
        }
    }

    /// Log the error at a level matching its cause.
    pub fn report(&self) {
        match self {
            Self::Storage(_) | Self::Render(_) | Self::Config(_) => {
                tracing::error!(error = %self, "Storefront error");
            }
            Self::Catalog(_) => tracing::warn!(error = %self, "Catalog error"),
            Self::Validation(_) | Self::EmptyCart => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
