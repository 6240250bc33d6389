//! Filter, sort, and prefix pagination over the listing collection.
//!
//! Everything here is a pure function of its inputs. Invalid numeric input
//! never fails; it falls back to the permissive default.

use std::cmp::Ordering;

use bazaar_types::Listing;
use serde::{Deserialize, Serialize};

/// Ordering applied to the filtered set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Latest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortKey {
    /// Parse a control value. Unknown values sort by [`SortKey::Latest`].
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            _ => Self::Latest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            Self::Latest => b.timestamp.cmp(&a.timestamp),
            Self::PriceLow => a.price.total_cmp(&b.price),
            Self::PriceHigh => b.price.total_cmp(&a.price),
        }
    }
}

/// Parse a price bound the way a browser `parseFloat(x) || default` does.
///
/// The longest leading decimal number is used and trailing junk ignored.
/// Blank input, input without a leading number, NaN, and zero all return
/// `None`, meaning "use the default bound".
///
/// ```
/// use bazaar_catalog::query::parse_price_bound;
///
/// assert_eq!(parse_price_bound("300"), Some(300.0));
/// assert_eq!(parse_price_bound(" 12.5abc"), Some(12.5));
/// assert_eq!(parse_price_bound("abc"), None);
/// assert_eq!(parse_price_bound("0"), None);
/// ```
pub fn parse_price_bound(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let value: f64 = s[..end].parse().ok()?;
    (value != 0.0 && !value.is_nan()).then_some(value)
}

/// Raw control values as typed or selected by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInputs {
    pub text: String,
    pub category: String,
    pub condition: String,
    pub min_price: String,
    pub max_price: String,
    pub sort: String,
}

impl FilterInputs {
    /// Resolve the raw values into a query, applying the defaults.
    pub fn to_query(&self) -> ListingQuery {
        ListingQuery {
            text: self.text.clone(),
            category: self.category.clone(),
            condition: self.condition.clone(),
            min_price: parse_price_bound(&self.min_price).unwrap_or(0.0),
            max_price: parse_price_bound(&self.max_price).unwrap_or(f64::INFINITY),
            sort: SortKey::parse(&self.sort),
        }
    }
}

/// Resolved browse criteria.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingQuery {
    /// Case-insensitive substring of title or author. Empty matches all.
    pub text: String,
    /// Exact category, or empty for any.
    pub category: String,
    /// Exact condition, or empty for any.
    pub condition: String,
    pub min_price: f64,
    pub max_price: f64,
    pub sort: SortKey,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: String::new(),
            condition: String::new(),
            min_price: 0.0,
            max_price: f64::INFINITY,
            sort: SortKey::Latest,
        }
    }
}

impl ListingQuery {
    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.text.to_lowercase();
        self.matches_with(listing, &needle)
    }

    fn matches_with(&self, listing: &Listing, needle: &str) -> bool {
        let text = listing.title.to_lowercase().contains(needle)
            || listing.author.to_lowercase().contains(needle);
        let category = self.category.is_empty() || listing.category == self.category;
        let condition = self.condition.is_empty() || listing.condition == self.condition;
        let price = listing.price >= self.min_price && listing.price <= self.max_price;
        text && category && condition && price
    }

    /// The full filtered set in sort order. The sort is stable.
    pub fn filter_sorted<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        let needle = self.text.to_lowercase();
        let mut matched: Vec<&Listing> = listings
            .iter()
            .filter(|l| self.matches_with(l, &needle))
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }

    /// The first `page × page_size` matches.
    ///
    /// `page` counts from 1; a value of 0 is treated as 1.
    pub fn page<'a>(&self, listings: &'a [Listing], page: usize, page_size: usize) -> ResultPage<'a> {
        let mut matched = self.filter_sorted(listings);
        let total_matches = matched.len();
        let end = page.max(1).saturating_mul(page_size);
        matched.truncate(end);
        let has_more = !matched.is_empty() && end < total_matches;
        ResultPage {
            items: matched,
            total_matches,
            has_more,
        }
    }
}

/// The visible prefix of the filtered set.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultPage<'a> {
    pub items: Vec<&'a Listing>,
    pub total_matches: usize,
    /// Whether a "load more" control should be offered.
    pub has_more: bool,
}

impl ResultPage<'_> {
    pub fn shown(&self) -> usize {
        self.items.len()
    }

    /// Nothing to show; callers render the empty state.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
