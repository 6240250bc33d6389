use std::time::Instant;

use bazaar_store::KeyValueStore;
use bazaar_types::{ListingId, NewListing};
use tracing::debug;

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::debounce::Debouncer;
use crate::error::CatalogResult;
use crate::query::{FilterInputs, ListingQuery};
use crate::view::BoardView;

/// A user interaction with the board.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    /// Search box keystroke. Debounced.
    SearchInput(String),
    /// Minimum price keystroke. Debounced.
    MinPriceInput(String),
    /// Maximum price keystroke. Debounced.
    MaxPriceInput(String),
    CategoryChanged(String),
    ConditionChanged(String),
    SortChanged(String),
    LoadMore,
    Post(NewListing),
    ToggleWishlist(ListingId),
    Delete(ListingId),
    Import(String),
}

/// What the front end has to redraw after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Nothing visible changed.
    Unchanged,
    /// Same criteria and page; redraw the cards.
    Redraw,
    /// Criteria or data changed; the page is back to 1.
    Refiltered,
}

/// Binds user input to catalog mutations and the browse state.
///
/// Typed input (search and price boxes) is held as a draft and applied once
/// the debounce interval passes without further keystrokes; see
/// [`tick`](Self::tick). Selects apply immediately and take any pending
/// typed input with them.
pub struct Board<S, C> {
    catalog: Catalog<S, C>,
    inputs: FilterInputs,
    query: ListingQuery,
    page: usize,
    debounce: Debouncer,
}

impl<S: KeyValueStore, C: Clock> Board<S, C> {
    pub fn new(catalog: Catalog<S, C>) -> Self {
        let debounce = Debouncer::new(catalog.config().debounce());
        Self {
            catalog,
            inputs: FilterInputs::default(),
            query: ListingQuery::default(),
            page: 1,
            debounce,
        }
    }

    pub fn handle(&mut self, event: BoardEvent, now: Instant) -> CatalogResult<Refresh> {
        let refresh = match event {
            BoardEvent::SearchInput(text) => {
                self.inputs.text = text;
                self.debounce.schedule(now);
                Refresh::Unchanged
            }
            BoardEvent::MinPriceInput(text) => {
                self.inputs.min_price = text;
                self.debounce.schedule(now);
                Refresh::Unchanged
            }
            BoardEvent::MaxPriceInput(text) => {
                self.inputs.max_price = text;
                self.debounce.schedule(now);
                Refresh::Unchanged
            }
            BoardEvent::CategoryChanged(value) => {
                self.inputs.category = value;
                self.apply_filters()
            }
            BoardEvent::ConditionChanged(value) => {
                self.inputs.condition = value;
                self.apply_filters()
            }
            BoardEvent::SortChanged(value) => {
                self.inputs.sort = value;
                self.apply_filters()
            }
            BoardEvent::LoadMore => self.load_more(),
            BoardEvent::Post(input) => {
                self.catalog.post(input)?;
                self.apply_filters()
            }
            BoardEvent::ToggleWishlist(id) => match self.catalog.toggle_wishlist(id)? {
                Some(_) => Refresh::Redraw,
                None => Refresh::Unchanged,
            },
            BoardEvent::Delete(id) => {
                if self.catalog.delete(id)? {
                    self.apply_filters()
                } else {
                    Refresh::Unchanged
                }
            }
            BoardEvent::Import(json) => {
                self.catalog.import_json(&json)?;
                self.apply_filters()
            }
        };
        Ok(refresh)
    }

    /// Apply debounced input whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Refresh {
        if self.debounce.fire(now) {
            self.apply_filters()
        } else {
            Refresh::Unchanged
        }
    }

    /// Replace every control value at once and apply immediately.
    pub fn set_filters(&mut self, inputs: FilterInputs) -> Refresh {
        self.inputs = inputs;
        self.apply_filters()
    }

    /// Grow the visible prefix by one page, if there is more to show.
    pub fn load_more(&mut self) -> Refresh {
        if !self.view().has_more {
            return Refresh::Unchanged;
        }
        self.page += 1;
        debug!(page = self.page, "loaded more");
        Refresh::Redraw
    }

    pub fn view(&self) -> BoardView {
        self.catalog.browse(&self.query, self.page)
    }

    pub fn catalog(&self) -> &Catalog<S, C> {
        &self.catalog
    }

    /// Control values as last entered, applied or not.
    pub fn inputs(&self) -> &FilterInputs {
        &self.inputs
    }

    /// Criteria currently applied to the board.
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_pending_input(&self) -> bool {
        self.debounce.is_pending()
    }

    fn apply_filters(&mut self) -> Refresh {
        self.debounce.cancel();
        self.query = self.inputs.to_query();
        self.page = 1;
        debug!(query = ?self.query, "filters applied");
        Refresh::Refiltered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use bazaar_store::InMemoryKeyValueStore;
    use bazaar_types::Timestamp;

    use crate::clock::ManualClock;
    use crate::config::BazaarConfig;

    const T0: u64 = 1_700_000_000_000;

    fn form(title: &str, price: f64) -> NewListing {
        NewListing {
            title: title.into(),
            author: "Author".into(),
            category: "Other".into(),
            condition: "Fair".into(),
            price,
            contact: "555".into(),
            ..Default::default()
        }
    }

    fn board<'a>(
        store: &'a InMemoryKeyValueStore,
        clock: &'a ManualClock,
    ) -> Board<&'a InMemoryKeyValueStore, &'a ManualClock> {
        Board::new(Catalog::open(store, clock, BazaarConfig::default()).unwrap())
    }

    #[test]
    fn starts_on_first_page_of_latest() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let board = board(&store, &clock);
        let view = board.view();
        assert_eq!(board.page(), 1);
        assert_eq!(view.cards.len(), 6);
        assert_eq!(view.cards[0].title, "Engineering Mathematics");
        assert!(!view.has_more);
    }

    #[test]
    fn search_applies_only_after_quiet_period() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let start = Instant::now();

        board.handle(BoardEvent::SearchInput("g".into()), start).unwrap();
        board
            .handle(BoardEvent::SearchInput("gats".into()), start + Duration::from_millis(100))
            .unwrap();
        assert!(board.has_pending_input());
        assert_eq!(board.tick(start + Duration::from_millis(350)), Refresh::Unchanged);
        assert_eq!(board.view().cards.len(), 6);

        assert_eq!(board.tick(start + Duration::from_millis(400)), Refresh::Refiltered);
        let view = board.view();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].title, "The Great Gatsby");
        assert_eq!(board.inputs().text, "gats");
        assert!(!board.has_pending_input());
    }

    #[test]
    fn select_change_applies_immediately_with_pending_text() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let now = Instant::now();

        board.handle(BoardEvent::MaxPriceInput("200".into()), now).unwrap();
        let refresh = board
            .handle(BoardEvent::CategoryChanged("Novels".into()), now)
            .unwrap();
        assert_eq!(refresh, Refresh::Refiltered);
        assert!(!board.has_pending_input());
        assert_eq!(board.query().max_price, 200.0);
        assert_eq!(board.view().cards.len(), 2);
    }

    #[test]
    fn sort_change_reorders() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        board
            .handle(BoardEvent::SortChanged("price-high".into()), Instant::now())
            .unwrap();
        let prices: Vec<f64> = board.view().cards.iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![800.0, 300.0, 250.0, 200.0, 150.0, 120.0]);
    }

    #[test]
    fn load_more_walks_prefix_and_filters_reset_page() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let now = Instant::now();
        for i in 0..14 {
            clock.advance_ms(1);
            board
                .handle(BoardEvent::Post(form(&format!("Extra {i}"), 10.0)), now)
                .unwrap();
        }

        let view = board.view();
        assert_eq!(view.total_matches, 20);
        assert_eq!(view.cards.len(), 9);
        assert!(view.has_more);

        assert_eq!(board.handle(BoardEvent::LoadMore, now).unwrap(), Refresh::Redraw);
        assert_eq!(board.view().cards.len(), 18);
        assert!(board.view().has_more);

        board.handle(BoardEvent::LoadMore, now).unwrap();
        assert_eq!(board.view().cards.len(), 20);
        assert!(!board.view().has_more);
        assert_eq!(board.handle(BoardEvent::LoadMore, now).unwrap(), Refresh::Unchanged);
        assert_eq!(board.page(), 3);

        board
            .handle(BoardEvent::ConditionChanged(String::new()), now)
            .unwrap();
        assert_eq!(board.page(), 1);
        assert_eq!(board.view().cards.len(), 9);
    }

    #[test]
    fn wishlist_toggle_keeps_page() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let config = BazaarConfig {
            page_size: 2,
            ..Default::default()
        };
        let mut board = Board::new(Catalog::open(&store, &clock, config).unwrap());
        let now = Instant::now();
        board.handle(BoardEvent::LoadMore, now).unwrap();

        let refresh = board
            .handle(BoardEvent::ToggleWishlist(ListingId::new(1)), now)
            .unwrap();
        assert_eq!(refresh, Refresh::Redraw);
        assert_eq!(board.page(), 2);
        assert!(board.view().cards[0].wishlisted);
        assert_eq!(board.view().wishlist_count, 1);

        let missing = board
            .handle(BoardEvent::ToggleWishlist(ListingId::new(404)), now)
            .unwrap();
        assert_eq!(missing, Refresh::Unchanged);
    }

    #[test]
    fn delete_refilters_and_unknown_delete_is_unchanged() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let now = Instant::now();

        assert_eq!(
            board.handle(BoardEvent::Delete(ListingId::new(1)), now).unwrap(),
            Refresh::Refiltered
        );
        assert_eq!(board.view().total_listings, 5);
        assert_eq!(
            board.handle(BoardEvent::Delete(ListingId::new(1)), now).unwrap(),
            Refresh::Unchanged
        );
    }

    #[test]
    fn failed_import_propagates_and_keeps_state() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let result = board.handle(BoardEvent::Import("garbage".into()), Instant::now());
        assert!(result.is_err());
        assert_eq!(board.catalog().len(), 6);
    }

    #[test]
    fn set_filters_applies_everything() {
        let store = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Timestamp::from_millis(T0));
        let mut board = board(&store, &clock);
        let refresh = board.set_filters(FilterInputs {
            min_price: "0".into(),
            max_price: "300".into(),
            condition: "Like New".into(),
            sort: "price-low".into(),
            ..Default::default()
        });
        assert_eq!(refresh, Refresh::Refiltered);
        let titles: Vec<String> = board.view().cards.into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["To Kill a Mockingbird", "The Great Gatsby"]);
    }
}
