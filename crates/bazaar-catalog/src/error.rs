use thiserror::Error;

/// Errors from catalog operations.
///
/// Lookups of unknown listings are not errors; they come back as `None` or
/// `false` from the relevant method.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("store error: {0}")]
    Store(#[from] bazaar_store::StoreError),

    #[error("invalid listing: {0}")]
    InvalidListing(#[from] bazaar_types::TypeError),

    #[error("import failed: {0}")]
    Import(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
