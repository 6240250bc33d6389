use crate::error::StoreResult;

/// String-valued key-value storage, modelled on browser `localStorage`.
///
/// All implementations must satisfy these invariants:
/// - A `set` is durable (as far as the backend allows) when it returns.
/// - Writes to different keys are independent; there are no transactions.
/// - The store never interprets values.
/// - Keys failing [`validate_key`](crate::validate_key) are rejected.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been set or was removed.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if a value was present.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// All keys currently holding a value, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Check whether a value is stored under `key`.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}
