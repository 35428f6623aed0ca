//! Order snapshot store: sole owner of the persisted last order.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::json::{Decoded, JsonStore};
use super::{KeyValueStore, LAST_ORDER_KEY};
use crate::error::{Result, StorageError, ValidationError};
use crate::types::OrderSnapshot;

/// Holds at most one order snapshot: the most recently placed order.
#[derive(Debug, Clone)]
pub struct OrderStore {
    json: JsonStore,
}

impl OrderStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            json: JsonStore::new(backend),
        }
    }

    /// Store `order`, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    #[instrument(skip(self, order), fields(lines = order.items.len()))]
    pub fn set_last_order(&self, order: &OrderSnapshot) -> std::result::Result<(), StorageError> {
        self.json.write(LAST_ORDER_KEY, order)
    }

    /// Store an order given as untyped JSON.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotRecord` if `value` is not a JSON object,
    /// `MalformedOrder` if it does not describe an order, or a storage error
    /// if the write fails.
    pub fn set_last_order_value(&self, value: Value) -> Result<()> {
        if !value.is_object() {
            return Err(ValidationError::OrderNotRecord.into());
        }
        let order: OrderSnapshot = serde_json::from_value(value)
            .map_err(|e| ValidationError::MalformedOrder(e.to_string()))?;
        self.set_last_order(&order)?;
        Ok(())
    }

    /// Load the snapshot, reporting whether the stored entry was usable.
    #[must_use]
    pub fn load(&self) -> Decoded<Option<OrderSnapshot>> {
        self.json.read(LAST_ORDER_KEY, None)
    }

    /// The last placed order, or `None` if there is none or the stored entry
    /// is malformed.
    #[must_use]
    pub fn get_last_order(&self) -> Option<OrderSnapshot> {
        self.load().into_inner()
    }

    /// Forget the last placed order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    pub fn clear_last_order(&self) -> std::result::Result<(), StorageError> {
        self.json.remove(LAST_ORDER_KEY)
    }
}
