use std::path::Path;
use std::time::Duration;

use bazaar_types::PLACEHOLDER_IMAGE;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Tunables for the board.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BazaarConfig {
    /// Listings added to the visible prefix per "load more".
    pub page_size: usize,
    /// Quiet period before typed search and price input is applied.
    pub debounce_ms: u64,
    /// Image used for listings posted without one.
    pub placeholder_image: String,
    /// Populate an empty store with the sample listings.
    pub seed_sample_data: bool,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            debounce_ms: 300,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            seed_sample_data: true,
        }
    }
}

impl BazaarConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(input: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = BazaarConfig::default();
        assert_eq!(c.page_size, 9);
        assert_eq!(c.debounce(), Duration::from_millis(300));
        assert_eq!(c.placeholder_image, PLACEHOLDER_IMAGE);
        assert!(c.seed_sample_data);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(BazaarConfig::from_toml_str("").unwrap(), BazaarConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let c = BazaarConfig::from_toml_str("page_size = 12\nseed_sample_data = false\n").unwrap();
        assert_eq!(c.page_size, 12);
        assert!(!c.seed_sample_data);
        assert_eq!(c.debounce_ms, 300);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = BazaarConfig::from_toml_str("dark_mode = true").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = BazaarConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.toml");
        std::fs::write(&path, "debounce_ms = 50").unwrap();
        assert_eq!(BazaarConfig::load(&path).unwrap().debounce_ms, 50);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BazaarConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
