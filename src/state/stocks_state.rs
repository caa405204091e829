//! Stocks domain state.

use crate::api::{PriceTick, Quote, SymbolMatch};
use crate::refresh::RefreshStatus;
use crate::store::Watchlist;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// State for the watchlist and its quote snapshots.
#[derive(Debug)]
pub struct StocksState {
    /// Watched symbols in display order.
    pub watchlist: Watchlist,
    /// Last-known-good quote per symbol. A missing key means "no data
    /// yet", never an explicit zero.
    pub quotes: HashMap<String, Quote>,
    /// Currently selected row.
    pub selected_index: Option<usize>,
    /// Refresh status for the domain.
    pub status: RefreshStatus,
    /// Last successful update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
    /// Symbol search results for the overlay.
    pub search_results: Vec<SymbolMatch>,
}

impl Default for StocksState {
    fn default() -> Self {
        Self {
            watchlist: Watchlist::empty(),
            quotes: HashMap::new(),
            selected_index: None,
            status: RefreshStatus::default(),
            last_updated: None,
            search_results: Vec::new(),
        }
    }
}

impl StocksState {
    /// Whether any quote data is cached (drives loading vs refreshing).
    pub fn has_cache(&self) -> bool {
        !self.quotes.is_empty()
    }

    /// The currently selected symbol.
    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.watchlist.symbols().get(i))
            .map(String::as_str)
    }

    /// Rows in persisted watchlist order, pairing each symbol with its
    /// snapshot if one exists.
    pub fn rows(&self) -> Vec<(&str, Option<&Quote>)> {
        self.watchlist
            .symbols()
            .iter()
            .map(|s| (s.as_str(), self.quotes.get(s)))
            .collect()
    }

    /// Apply a live trade tick to the cached snapshot, recomputing the
    /// change fields against the previous close.
    pub fn apply_tick(&mut self, tick: &PriceTick) {
        if let Some(quote) = self.quotes.get_mut(&tick.symbol) {
            quote.current = tick.price;
            let change = tick.price - quote.previous_close;
            quote.change = Some(change);
            quote.percent_change = if quote.previous_close.is_zero() {
                None
            } else {
                Some(change / quote.previous_close * Decimal::ONE_HUNDRED)
            };
            if tick.price > quote.high {
                quote.high = tick.price;
            }
            if tick.price < quote.low {
                quote.low = tick.price;
            }
        }
    }

    /// Drop the snapshot for a removed symbol.
    pub fn evict(&mut self, symbol: &str) {
        self.quotes.remove(symbol);
        let len = self.watchlist.len();
        if let Some(index) = self.selected_index
            && index >= len
        {
            self.selected_index = len.checked_sub(1);
        }
    }
}
