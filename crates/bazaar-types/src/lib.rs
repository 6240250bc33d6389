//! Foundation types for Book Bazaar.
//!
//! Every other bazaar crate depends on `bazaar-types`. The JSON shape of
//! [`Listing`] matches the documents the browser board keeps under the
//! `books` and `wishlist` storage keys, so existing data loads unchanged.
//!
//! # Key Types
//!
//! - [`Listing`]: A single book-for-sale record
//! - [`ListingId`]: Creation-ordered listing identifier
//! - [`NewListing`]: Unvalidated form input for a new listing
//! - [`Timestamp`]: Milliseconds since the UNIX epoch

pub mod error;
pub mod listing;
pub mod timestamp;

pub use error::TypeError;
pub use listing::{Listing, ListingId, NewListing, CATEGORIES, CONDITIONS, PLACEHOLDER_IMAGE};
pub use timestamp::Timestamp;
