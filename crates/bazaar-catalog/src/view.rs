//! View models projected from catalog state.
//!
//! Nothing here touches storage or a UI toolkit; a front end renders these
//! structs however it likes.

use std::collections::HashSet;

use bazaar_types::{Listing, ListingId, Timestamp};
use serde::Serialize;

use crate::query::ResultPage;

/// Shown when the wishlist has no entries.
pub const EMPTY_WISHLIST_MESSAGE: &str = "Your wishlist is empty";

/// Price as displayed, in rupees. Integral prices carry no decimals.
pub fn price_label(price: f64) -> String {
    format!("₹{price}")
}

/// One tile on the board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: ListingId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub price: f64,
    pub price_label: String,
    pub image: String,
    pub wishlisted: bool,
}

impl ListingCard {
    /// `placeholder` stands in for a blank image.
    pub fn project(listing: &Listing, wishlisted: bool, placeholder: &str) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            author: listing.author.clone(),
            category: listing.category.clone(),
            condition: listing.condition.clone(),
            price: listing.price,
            price_label: price_label(listing.price),
            image: listing.image_or(placeholder).to_string(),
            wishlisted,
        }
    }
}

/// Everything the board shows for the current browse state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardView {
    pub cards: Vec<ListingCard>,
    pub total_listings: usize,
    pub wishlist_count: usize,
    pub total_matches: usize,
    pub has_more: bool,
    pub is_empty: bool,
}

impl BoardView {
    pub fn project(
        page: &ResultPage<'_>,
        wishlist: &[Listing],
        total_listings: usize,
        placeholder: &str,
    ) -> Self {
        let saved: HashSet<ListingId> = wishlist.iter().map(|l| l.id).collect();
        Self {
            cards: page
                .items
                .iter()
                .map(|l| ListingCard::project(l, saved.contains(&l.id), placeholder))
                .collect(),
            total_listings,
            wishlist_count: wishlist.len(),
            total_matches: page.total_matches,
            has_more: page.has_more,
            is_empty: page.is_empty(),
        }
    }
}

/// Full record for the detail view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingDetail {
    pub id: ListingId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub price_label: String,
    /// `None` when the seller left it blank.
    pub description: Option<String>,
    pub contact: String,
    pub image: String,
    pub posted: Timestamp,
    pub wishlisted: bool,
}

impl ListingDetail {
    pub fn project(listing: &Listing, wishlisted: bool, placeholder: &str) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            author: listing.author.clone(),
            category: listing.category.clone(),
            condition: listing.condition.clone(),
            price_label: price_label(listing.price),
            description: listing
                .has_description()
                .then(|| listing.description.clone()),
            contact: listing.contact.clone(),
            image: listing.image_or(placeholder).to_string(),
            posted: listing.timestamp,
            wishlisted,
        }
    }
}

/// How to reach the seller of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactCard {
    pub contact: String,
    pub title: String,
    pub author: String,
}

impl ContactCard {
    pub fn project(listing: &Listing) -> Self {
        Self {
            contact: listing.contact.clone(),
            title: listing.title.clone(),
            author: listing.author.clone(),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Contact Seller:\n\nPhone: {}\n\nFor: {} by {}",
            self.contact, self.title, self.author
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WishlistItem {
    pub id: ListingId,
    pub title: String,
    pub author: String,
    pub price_label: String,
    pub image: String,
}

/// The saved listings, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
}

impl WishlistView {
    pub fn project(wishlist: &[Listing], placeholder: &str) -> Self {
        Self {
            items: wishlist
                .iter()
                .map(|l| WishlistItem {
                    id: l.id,
                    title: l.title.clone(),
                    author: l.author.clone(),
                    price_label: price_label(l.price),
                    image: l.image_or(placeholder).to_string(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListingQuery;
    use bazaar_types::PLACEHOLDER_IMAGE;

    fn listing(id: u64, price: f64) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: format!("Book {id}"),
            author: "Author".into(),
            category: "Science".into(),
            condition: "Good".into(),
            price,
            description: String::new(),
            contact: "+91 98765 43212".into(),
            image: String::new(),
            timestamp: Timestamp::from_millis(id),
        }
    }

    #[test]
    fn price_labels() {
        assert_eq!(price_label(250.0), "₹250");
        assert_eq!(price_label(99.5), "₹99.5");
        assert_eq!(price_label(0.0), "₹0");
    }

    #[test]
    fn card_marks_wishlisted_and_fills_placeholder() {
        let card = ListingCard::project(&listing(1, 10.0), true, PLACEHOLDER_IMAGE);
        assert!(card.wishlisted);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.price_label, "₹10");
    }

    #[test]
    fn blank_images_use_the_given_placeholder() {
        let book = listing(2, 20.0);
        let custom = "https://example.com/blank.png";
        assert_eq!(ListingCard::project(&book, false, custom).image, custom);
        assert_eq!(ListingDetail::project(&book, false, custom).image, custom);
        assert_eq!(WishlistView::project(&[book.clone()], custom).items[0].image, custom);

        let mut pictured = book;
        pictured.image = "https://example.com/cover.jpg".into();
        assert_eq!(
            ListingCard::project(&pictured, false, custom).image,
            "https://example.com/cover.jpg"
        );
    }

    #[test]
    fn board_view_flags_saved_cards() {
        let shelf = vec![listing(1, 1.0), listing(2, 2.0), listing(3, 3.0)];
        let wishlist = vec![listing(2, 2.0)];
        let page = ListingQuery::default().page(&shelf, 1, 2);
        let view = BoardView::project(&page, &wishlist, shelf.len(), PLACEHOLDER_IMAGE);

        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].id, ListingId::new(3));
        assert!(!view.cards[0].wishlisted);
        assert!(view.cards[1].wishlisted);
        assert_eq!(view.total_listings, 3);
        assert_eq!(view.wishlist_count, 1);
        assert!(view.has_more);
        assert!(!view.is_empty);
    }

    #[test]
    fn detail_hides_blank_description() {
        let mut book = listing(4, 300.0);
        assert_eq!(ListingDetail::project(&book, false, PLACEHOLDER_IMAGE).description, None);

        book.description = "Used for one semester.".into();
        let detail = ListingDetail::project(&book, true, PLACEHOLDER_IMAGE);
        assert_eq!(detail.description.as_deref(), Some("Used for one semester."));
        assert!(detail.wishlisted);
    }

    #[test]
    fn contact_message() {
        let card = ContactCard::project(&listing(3, 300.0));
        assert_eq!(
            card.message(),
            "Contact Seller:\n\nPhone: +91 98765 43212\n\nFor: Book 3 by Author"
        );
    }

    #[test]
    fn wishlist_view_keeps_order() {
        let view = WishlistView::project(&[listing(5, 5.0), listing(1, 1.0)], PLACEHOLDER_IMAGE);
        let ids: Vec<u64> = view.items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![5, 1]);
        assert!(!view.is_empty());
        assert!(WishlistView::project(&[], PLACEHOLDER_IMAGE).is_empty());
    }
}
