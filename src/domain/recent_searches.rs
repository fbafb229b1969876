//! Recently searched tickers, most recent first.

use crate::ports::store_port::KeyValueStore;

pub const RECENT_SEARCHES_KEY: &str = "recent_searches";
pub const MAX_RECENT_SEARCHES: usize = 5;

pub struct RecentSearches<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<String> {
        self.store
            .get(RECENT_SEARCHES_KEY)
            .map(|value| parse_symbols(&value))
            .unwrap_or_default()
    }

    /// Moves `symbol` to the front, dropping older duplicates and anything past the cap.
    /// Blank input is ignored.
    pub fn record(&mut self, symbol: &str) -> Vec<String> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return self.list();
        }

        let mut symbols = vec![symbol.clone()];
        symbols.extend(self.list().into_iter().filter(|s| *s != symbol));
        symbols.truncate(MAX_RECENT_SEARCHES);

        self.store.set(RECENT_SEARCHES_KEY, &symbols.join(","));
        symbols
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

fn parse_symbols(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
