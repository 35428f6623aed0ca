//! JSON adapter over a [`KeyValueStore`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::KeyValueStore;
use crate::error::StorageError;

/// Outcome of reading a persisted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The stored entry decoded successfully.
    Stored(T),
    /// The caller's fallback, used because the entry could not be used.
    Fallback { value: T, reason: FallbackReason },
}

/// Why a read fell back to the default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No entry exists under the key.
    Missing,
    /// The backend could not be read.
    Unreadable(String),
    /// The entry is not valid JSON.
    Corrupt(String),
    /// The entry is valid JSON of the wrong shape.
    WrongShape(String),
}

impl<T> Decoded<T> {
    /// The decoded value or the fallback.
    pub fn into_inner(self) -> T {
        match self {
            Self::Stored(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Borrow the decoded value or the fallback.
    pub const fn value(&self) -> &T {
        match self {
            Self::Stored(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The fallback reason, if the stored entry was not used.
    #[must_use]
    pub const fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Stored(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Reads and writes JSON values through a shared backend.
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStore>,
}

impl JsonStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Decode the entry under `key`, or return `fallback` if it is missing,
    /// unreadable or malformed. Never fails.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Decoded<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return Decoded::Fallback {
                    value: fallback,
                    reason: FallbackReason::Missing,
                };
            }
            Err(e) => {
                warn!(key, error = %e, "Stored value unreadable, using default");
                return Decoded::Fallback {
                    value: fallback,
                    reason: FallbackReason::Unreadable(e.to_string()),
                };
            }
        };

        let parsed = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(key, error = %e, "Stored value is not valid JSON, using default");
                return Decoded::Fallback {
                    value: fallback,
                    reason: FallbackReason::Corrupt(e.to_string()),
                };
            }
        };

        match serde_json::from_value(parsed) {
            Ok(value) => Decoded::Stored(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value has the wrong shape, using default");
                Decoded::Fallback {
                    value: fallback,
                    reason: FallbackReason::WrongShape(e.to_string()),
                }
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    /// Delete the entry under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }
}

impl std::fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn set(&self, key: &str, _raw: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn store() -> (Arc<MemoryStore>, JsonStore) {
        let backend = Arc::new(MemoryStore::new());
        let json = JsonStore::new(backend.clone());
        (backend, json)
    }

    #[test]
    fn test_read_missing_returns_fallback() {
        let (_, json) = store();
        let decoded = json.read("k", vec![1_u32]);
        assert_eq!(
            decoded,
            Decoded::Fallback {
                value: vec![1],
                reason: FallbackReason::Missing,
            }
        );
    }

    #[test]
    fn test_write_then_read() {
        let (backend, json) = store();
        json.write("k", &json!({"a": [1, 2]})).unwrap();

        assert_eq!(backend.get("k").unwrap().as_deref(), Some(r#"{"a":[1,2]}"#));
        assert_eq!(json.read("k", Value::Null), Decoded::Stored(json!({"a": [1, 2]})));
    }

    #[test]
    fn test_read_corrupt_json_falls_back() {
        let (backend, json) = store();
        backend.set("k", "{not json").unwrap();

        let decoded = json.read::<Vec<u32>>("k", Vec::new());
        assert!(matches!(
            decoded.fallback_reason(),
            Some(FallbackReason::Corrupt(_))
        ));
        assert!(decoded.into_inner().is_empty());
    }

    #[test]
    fn test_read_wrong_shape_falls_back() {
        let (backend, json) = store();
        backend.set("k", r#"{"not":"a list"}"#).unwrap();

        let decoded = json.read::<Vec<u32>>("k", Vec::new());
        assert!(matches!(
            decoded.fallback_reason(),
            Some(FallbackReason::WrongShape(_))
        ));
    }

    #[test]
    fn test_read_unreadable_backend_falls_back() {
        let json = JsonStore::new(Arc::new(BrokenStore));
        let decoded = json.read("k", 7_u32);
        assert!(decoded.is_fallback());
        assert_eq!(*decoded.value(), 7);
    }

    #[test]
    fn test_write_failure_propagates() {
        let json = JsonStore::new(Arc::new(BrokenStore));
        assert!(matches!(
            json.write("k", &1_u32),
            Err(StorageError::Io { .. })
        ));
    }
}
