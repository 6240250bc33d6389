//! Bulk export/import document.
//!
//! Layout: `{ "books": [...], "wishlist": [...], "exportDate": "<ISO-8601>" }`.

use std::collections::HashSet;

use bazaar_types::{Listing, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Default file name for exports.
pub const EXPORT_FILE_NAME: &str = "book-bazaar-data.json";

/// A full snapshot of both collections.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub books: Vec<Listing>,
    pub wishlist: Vec<Listing>,
    pub export_date: String,
}

impl ExportBundle {
    pub fn new(books: Vec<Listing>, wishlist: Vec<Listing>, at: Timestamp) -> Self {
        Self {
            books,
            wishlist,
            export_date: iso_8601(at),
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> CatalogResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Serialization(e.to_string()))
    }
}

/// An import document. Absent keys leave the matching collection alone.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBundle {
    #[serde(default)]
    pub books: Option<Vec<Listing>>,
    #[serde(default)]
    pub wishlist: Option<Vec<Listing>>,
    #[serde(default)]
    pub export_date: Option<String>,
}

impl ImportBundle {
    /// Parse and check an import document without applying it.
    ///
    /// Fails on malformed JSON and on repeated ids within `books` or within
    /// `wishlist`.
    pub fn parse(input: &str) -> CatalogResult<Self> {
        let bundle: Self =
            serde_json::from_str(input).map_err(|e| CatalogError::Import(e.to_string()))?;
        for (name, list) in [("books", &bundle.books), ("wishlist", &bundle.wishlist)] {
            if let Some(list) = list {
                check_unique_ids(name, list)?;
            }
        }
        Ok(bundle)
    }
}

/// What an import replaced. `None` means the collection was left as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub books: Option<usize>,
    pub wishlist: Option<usize>,
}

fn check_unique_ids(name: &str, listings: &[Listing]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(listings.len());
    for listing in listings {
        if !seen.insert(listing.id) {
            return Err(CatalogError::Import(format!(
                "duplicate id {} in {name}",
                listing.id
            )));
        }
    }
    Ok(())
}

fn iso_8601(at: Timestamp) -> String {
    let ms = i64::try_from(at.as_millis()).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
