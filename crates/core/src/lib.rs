//! GameHub Core - Cart and order state for the GameHub storefront.
//!
//! This crate owns the parts of the storefront that have real invariants:
//! - the shopping cart (merge-on-add, price frozen at add time, totals)
//! - the "last placed order" snapshot shown on the confirmation page
//! - the JSON adapter over a synchronous key-value store that persists both
//!
//! # Architecture
//!
//! The core crate performs no network or filesystem I/O. Persistence goes
//! through the [`store::KeyValueStore`] trait; the storefront crate supplies a
//! file-backed implementation and tests use [`store::MemoryStore`].
//!
//! # Modules
//!
//! - [`types`] - Products, cart line items, order snapshots and money
//! - [`store`] - Key-value backends, the JSON adapter, cart and order stores
//! - [`error`] - Validation, storage and store error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StoreError, ValidationError};
pub use store::{
    CartStore, Decoded, FallbackReason, JsonStore, KeyValueStore, MemoryStore, OrderStore,
};
pub use types::*;
