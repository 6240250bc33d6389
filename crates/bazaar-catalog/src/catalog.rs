use std::collections::HashSet;

use bazaar_store::KeyValueStore;
use bazaar_types::{Listing, ListingId, NewListing, Timestamp};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::BazaarConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::interchange::{ExportBundle, ImportBundle, ImportSummary};
use crate::query::ListingQuery;
use crate::seed::sample_listings;
use crate::view::{BoardView, ContactCard, ListingDetail, WishlistView};

/// Storage key for the listing collection.
pub const BOOKS_KEY: &str = "books";
/// Storage key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Result of a wishlist toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistChange {
    Added,
    Removed,
}

enum Loaded {
    Missing,
    Present(Vec<Listing>),
    Corrupt,
}

/// Sole owner of the listing and wishlist collections.
///
/// Every mutating method writes both collections back to storage before it
/// returns. A mutation whose write fails leaves memory untouched and puts back
/// whatever storage held before. Wishlist entries are detached copies of
/// listings.
pub struct Catalog<S, C = SystemClock> {
    storage: S,
    clock: C,
    config: BazaarConfig,
    listings: Vec<Listing>,
    wishlist: Vec<Listing>,
    recovered: Vec<&'static str>,
}

impl<S: KeyValueStore> Catalog<S, SystemClock> {
    /// Open with the wall clock and default configuration.
    pub fn open_default(storage: S) -> CatalogResult<Self> {
        Self::open(storage, SystemClock, BazaarConfig::default())
    }
}

impl<S: KeyValueStore, C: Clock> Catalog<S, C> {
    /// Restore both collections from storage.
    ///
    /// A missing `books` document yields the sample listings (when enabled).
    /// A document that fails to parse is logged and replaced by an empty
    /// collection; its key is reported by [`recovered_keys`](Self::recovered_keys).
    /// Nothing is written back until the first mutation.
    pub fn open(storage: S, clock: C, config: BazaarConfig) -> CatalogResult<Self> {
        config.validate()?;
        let mut recovered = Vec::new();

        let listings = match load_collection(&storage, BOOKS_KEY)? {
            Loaded::Present(listings) => listings,
            Loaded::Missing if config.seed_sample_data => sample_listings(clock.now()),
            Loaded::Missing => Vec::new(),
            Loaded::Corrupt => {
                recovered.push(BOOKS_KEY);
                Vec::new()
            }
        };

        let wishlist = match load_collection(&storage, WISHLIST_KEY)? {
            Loaded::Present(wishlist) => wishlist,
            Loaded::Missing => Vec::new(),
            Loaded::Corrupt => {
                recovered.push(WISHLIST_KEY);
                Vec::new()
            }
        };

        debug!(
            listings = listings.len(),
            wishlist = wishlist.len(),
            "catalog opened"
        );

        Ok(Self {
            storage,
            clock,
            config,
            listings,
            wishlist,
            recovered,
        })
    }

    // ---- Mutations ----

    /// Post a new listing at the head of the collection.
    pub fn post(&mut self, input: NewListing) -> CatalogResult<Listing> {
        let timestamp = self.next_timestamp();
        let id = self.next_id(timestamp.as_millis());
        let listing = input.into_listing(id, timestamp, &self.config.placeholder_image)?;

        let mut listings = Vec::with_capacity(self.listings.len() + 1);
        listings.push(listing.clone());
        listings.extend_from_slice(&self.listings);
        self.commit(Some(listings), None)?;
        debug!(id = %listing.id, title = %listing.title, "listing posted");
        Ok(listing)
    }

    /// Add the listing to the wishlist, or remove it if already saved.
    ///
    /// Returns `None` without touching anything when no listing has `id`.
    pub fn toggle_wishlist(&mut self, id: ListingId) -> CatalogResult<Option<WishlistChange>> {
        let Some(listing) = self.get(id).cloned() else {
            return Ok(None);
        };

        let mut wishlist = self.wishlist.clone();
        let change = match wishlist.iter().position(|l| l.id == id) {
            Some(index) => {
                wishlist.remove(index);
                WishlistChange::Removed
            }
            None => {
                wishlist.push(listing);
                WishlistChange::Added
            }
        };

        self.commit(None, Some(wishlist))?;
        debug!(%id, ?change, "wishlist toggled");
        Ok(Some(change))
    }

    /// Delete a listing and any wishlist entry sharing its id.
    ///
    /// Returns `false`, writing nothing, when the id is unknown to both
    /// collections.
    pub fn delete(&mut self, id: ListingId) -> CatalogResult<bool> {
        let listings = without(&self.listings, id);
        let wishlist = without(&self.wishlist, id);
        if (listings.len(), wishlist.len()) == (self.listings.len(), self.wishlist.len()) {
            return Ok(false);
        }

        self.commit(Some(listings), Some(wishlist))?;
        debug!(%id, "listing deleted");
        Ok(true)
    }

    /// Replace collections from an import document.
    ///
    /// The whole document is parsed and checked first; on any error, storage
    /// failures included, nothing changes.
    pub fn import_json(&mut self, input: &str) -> CatalogResult<ImportSummary> {
        let bundle = ImportBundle::parse(input)?;
        let summary = ImportSummary {
            books: bundle.books.as_ref().map(Vec::len),
            wishlist: bundle.wishlist.as_ref().map(Vec::len),
        };

        self.commit(bundle.books, bundle.wishlist)?;
        info!(books = ?summary.books, wishlist = ?summary.wishlist, "data imported");
        Ok(summary)
    }

    // ---- Export ----

    pub fn export_bundle(&self) -> ExportBundle {
        ExportBundle::new(self.listings.clone(), self.wishlist.clone(), self.clock.now())
    }

    pub fn export_json(&self) -> CatalogResult<String> {
        let json = self.export_bundle().to_json()?;
        info!(
            books = self.listings.len(),
            wishlist = self.wishlist.len(),
            "data exported"
        );
        Ok(json)
    }

    // ---- Queries ----

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Listings in collection order, newest post first.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn wishlist(&self) -> &[Listing] {
        &self.wishlist
    }

    pub fn is_wishlisted(&self, id: ListingId) -> bool {
        self.wishlist.iter().any(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn wishlist_len(&self) -> usize {
        self.wishlist.len()
    }

    /// Storage keys whose documents were unreadable at open.
    pub fn recovered_keys(&self) -> &[&'static str] {
        &self.recovered
    }

    pub fn config(&self) -> &BazaarConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ---- Projections ----

    /// The board for `query`, showing the first `page` pages.
    pub fn browse(&self, query: &ListingQuery, page: usize) -> BoardView {
        let result = query.page(&self.listings, page, self.config.page_size);
        BoardView::project(
            &result,
            &self.wishlist,
            self.listings.len(),
            &self.config.placeholder_image,
        )
    }

    pub fn detail(&self, id: ListingId) -> Option<ListingDetail> {
        let wishlisted = self.is_wishlisted(id);
        self.get(id)
            .map(|l| ListingDetail::project(l, wishlisted, &self.config.placeholder_image))
    }

    pub fn contact(&self, id: ListingId) -> Option<ContactCard> {
        self.get(id).map(ContactCard::project)
    }

    pub fn wishlist_view(&self) -> WishlistView {
        WishlistView::project(&self.wishlist, &self.config.placeholder_image)
    }

    // ---- Internals ----

    /// Creation time in ms, bumped past the largest id in use so ids stay
    /// unique and increasing even when the clock stalls or runs backwards.
    fn next_id(&self, now_ms: u64) -> ListingId {
        let max = self.listings.iter().map(|l| l.id.get()).max();
        match max {
            Some(max) if now_ms <= max => ListingId::new(max.saturating_add(1)),
            _ => ListingId::new(now_ms),
        }
    }

    /// Creation time, never earlier than the newest stored listing so a post
    /// always heads the `latest` ordering.
    fn next_timestamp(&self) -> Timestamp {
        let now = self.clock.now();
        self.listings
            .iter()
            .map(|l| l.timestamp)
            .max()
            .map_or(now, |newest| now.max(newest))
    }

    /// Write the staged collections, then adopt them. `None` keeps the
    /// current collection.
    fn commit(
        &mut self,
        listings: Option<Vec<Listing>>,
        wishlist: Option<Vec<Listing>>,
    ) -> CatalogResult<()> {
        let books_doc = to_json(listings.as_deref().unwrap_or(&self.listings))?;
        let wishlist_doc = to_json(wishlist.as_deref().unwrap_or(&self.wishlist))?;
        self.write_documents(&[
            (BOOKS_KEY, books_doc.as_str()),
            (WISHLIST_KEY, wishlist_doc.as_str()),
        ])?;

        if let Some(listings) = listings {
            self.listings = listings;
        }
        if let Some(wishlist) = wishlist {
            self.wishlist = wishlist;
        }
        Ok(())
    }

    /// Set each key in order. If one fails, keys already written get their
    /// previous values back before the error is returned.
    fn write_documents(&self, docs: &[(&'static str, &str)]) -> CatalogResult<()> {
        let mut previous = Vec::with_capacity(docs.len());
        for &(key, _) in docs {
            previous.push((key, self.storage.get(key)?));
        }

        for (written, &(key, doc)) in docs.iter().enumerate() {
            if let Err(e) = self.storage.set(key, doc) {
                warn!(key, error = %e, "write failed; restoring stored documents");
                self.restore(&previous[..written]);
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn restore(&self, previous: &[(&'static str, Option<String>)]) {
        for (key, value) in previous {
            let result = match value {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key).map(|_| ()),
            };
            if let Err(e) = result {
                warn!(key, error = %e, "could not restore stored document");
            }
        }
    }
}

impl<S, C> std::fmt::Debug for Catalog<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("listings", &self.listings.len())
            .field("wishlist", &self.wishlist.len())
            .finish()
    }
}

fn load_collection<S: KeyValueStore>(storage: &S, key: &'static str) -> CatalogResult<Loaded> {
    let Some(raw) = storage.get(key)? else {
        return Ok(Loaded::Missing);
    };
    match serde_json::from_str::<Vec<Listing>>(&raw) {
        Ok(listings) => Ok(Loaded::Present(dedup_by_id(key, listings))),
        Err(e) => {
            warn!(key, error = %e, "stored document is unreadable; starting empty");
            Ok(Loaded::Corrupt)
        }
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(key: &str, listings: Vec<Listing>) -> Vec<Listing> {
    let total = listings.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Listing> = listings.into_iter().filter(|l| seen.insert(l.id)).collect();
    if unique.len() != total {
        warn!(key, dropped = total - unique.len(), "dropped duplicate ids");
    }
    unique
}

fn without(listings: &[Listing], id: ListingId) -> Vec<Listing> {
    listings.iter().filter(|l| l.id != id).cloned().collect()
}

fn to_json(listings: &[Listing]) -> CatalogResult<String> {
    serde_json::to_string(listings).map_err(|e| CatalogError::Serialization(e.to_string()))
}
