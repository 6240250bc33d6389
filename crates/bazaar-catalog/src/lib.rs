//! Listing store, browse pipeline, and view projections for Book Bazaar.
//!
//! [`Catalog`] owns the listing and wishlist collections and mirrors them to
//! a [`KeyValueStore`](bazaar_store::KeyValueStore) after every change.
//! [`query`] derives the visible listings, [`view`] turns them into plain
//! view models, and [`Board`] wires user events to both.
//!
//! # Modules
//!
//! - [`catalog`]: The store object and its persistence
//! - [`query`]: Filter, sort, and prefix pagination
//! - [`view`]: Cards, detail, contact, and wishlist projections
//! - [`interchange`]: Bulk export/import document
//! - [`board`]: Event handling and browse state
//! - [`debounce`]: Input coalescing
//! - [`config`]: [`BazaarConfig`] tunables

pub mod board;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod interchange;
pub mod query;
pub mod seed;
pub mod view;

pub use board::{Board, BoardEvent, Refresh};
pub use catalog::{Catalog, WishlistChange, BOOKS_KEY, WISHLIST_KEY};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::BazaarConfig;
pub use debounce::Debouncer;
pub use error::{CatalogError, CatalogResult};
pub use interchange::{ExportBundle, ImportBundle, ImportSummary, EXPORT_FILE_NAME};
pub use query::{FilterInputs, ListingQuery, ResultPage, SortKey};
pub use view::{BoardView, ContactCard, ListingCard, ListingDetail, WishlistItem, WishlistView};

pub use bazaar_types::{Listing, ListingId, NewListing, Timestamp, CATEGORIES, CONDITIONS};
