use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::timestamp::Timestamp;

/// Image shown for listings posted without one.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?w=500";

/// Categories offered by the posting form. Stored values are free text.
pub const CATEGORIES: &[&str] = &[
    "Engineering",
    "Science",
    "Commerce",
    "Medical",
    "Novels",
    "Arts",
    "Other",
];

/// Conditions offered by the posting form, best first.
pub const CONDITIONS: &[&str] = &["New", "Like New", "Good", "Fair"];

/// Listing identifier.
///
/// New identifiers are taken from the creation time in milliseconds, so they
/// grow in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(u64);

impl ListingId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListingId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

/// A single book-for-sale record.
///
/// Field names follow the persisted JSON layout exactly. Listings are
/// immutable once posted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub contact: String,
    #[serde(default)]
    pub image: String,
    pub timestamp: Timestamp,
}

impl Listing {
    /// Whether the seller wrote a description.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// The image URL, or `placeholder` when the stored value is blank.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.image.trim().is_empty() {
            placeholder
        } else {
            &self.image
        }
    }
}

/// Form input for a listing that has not been posted yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub contact: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewListing {
    /// Check the fields the posting form marks as required.
    pub fn validate(&self) -> Result<(), TypeError> {
        let required = [
            ("title", &self.title),
            ("author", &self.author),
            ("category", &self.category),
            ("condition", &self.condition),
            ("contact", &self.contact),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(TypeError::InvalidField {
                    field,
                    reason: "must not be empty".into(),
                });
            }
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(TypeError::InvalidField {
                field: "price",
                reason: format!("must be a non-negative number, got {}", self.price),
            });
        }

        Ok(())
    }

    /// Validate and stamp the input into a [`Listing`].
    ///
    /// A missing or blank image becomes `placeholder_image`.
    pub fn into_listing(
        self,
        id: ListingId,
        timestamp: Timestamp,
        placeholder_image: &str,
    ) -> Result<Listing, TypeError> {
        self.validate()?;
        let image = self
            .image
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image.to_string());
        Ok(Listing {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            condition: self.condition,
            price: self.price,
            description: self.description,
            contact: self.contact,
            image,
            timestamp,
        })
    }
}
