//! Storage key validation.

use crate::error::{StoreError, StoreResult};

/// Longest accepted key, in bytes.
const MAX_KEY_LEN: usize = 128;

/// Validate a storage key, returning `Ok(())` if valid.
///
/// ```
/// use bazaar_store::validate_key;
///
/// assert!(validate_key("books").is_ok());
/// assert!(validate_key("darkMode").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("../etc").is_err());
/// ```
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".into(),
        });
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: format!("key longer than {MAX_KEY_LEN} bytes"),
        });
    }

    if let Some(ch) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    Ok(())
}
