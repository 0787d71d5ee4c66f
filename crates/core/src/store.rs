use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::coin::CoinsData;
use crate::models::intent::Intent;
use crate::models::metrics::PortfolioTotals;
use crate::models::portfolio::Portfolio;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;
use crate::services::metrics_service;
use crate::services::portfolio_service::PortfolioService;
use crate::storage::memory::MemoryStorage;
use crate::storage::traits::KeyValueStorage;

/// Change listener. Receives the store after a mutation and re-reads
/// whatever state it needs; no diff is passed.
pub type Listener = Box<dyn FnMut(&PortfolioStore) + Send>;

/// Handle returned by [`PortfolioStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Work the store asks its owner to perform after handling an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing further to do.
    None,
    /// Retrieve the coin list and hand the result to
    /// [`PortfolioStore::apply_coins_data`].
    FetchCoinsData,
}

/// Single writer of the transaction ledger.
///
/// Constructed once by the application root and passed by reference to
/// whatever needs it. Every intent is applied to completion before the
/// next one; each applied mutation is followed by exactly one change
/// notification. Rejected intents leave state untouched and notify nobody.
#[must_use]
pub struct PortfolioStore {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    storage: Box<dyn KeyValueStorage>,
    settings: Settings,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    /// Number of change notifications emitted so far.
    changes: u64,
}

impl std::fmt::Debug for PortfolioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioStore")
            .field("transactions", &self.portfolio.transactions.len())
            .field("editing", &self.portfolio.editing_index())
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .field("changes", &self.changes)
            .finish()
    }
}

impl PortfolioStore {
    /// Create an empty ledger backed by the given coin-data cache.
    pub fn new(storage: impl KeyValueStorage + 'static, settings: Settings) -> Self {
        Self {
            portfolio: Portfolio::new(),
            portfolio_service: PortfolioService::new(),
            storage: Box::new(storage),
            settings,
            listeners: Vec::new(),
            next_subscription: 0,
            changes: 0,
        }
    }

    /// Empty ledger with default settings and a non-durable cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new(), Settings::default())
    }

    // ── Intents ─────────────────────────────────────────────────────

    /// Append an empty draft row in edit mode. Any other edit in progress
    /// is discarded first. Returns the new row's index.
    pub fn add_transaction(&mut self) -> usize {
        let index = self.portfolio_service.add_transaction(&mut self.portfolio);
        self.notify();
        index
    }

    /// Delete the row at `index`; later rows shift down by one.
    pub fn remove_transaction(&mut self, index: usize) -> Result<Transaction, CoreError> {
        let removed = self
            .portfolio_service
            .remove_transaction(&mut self.portfolio, index)?;
        self.notify();
        Ok(removed)
    }

    /// Put the row at `index` into edit mode, discarding any other edit in
    /// progress. Returns the row's (possibly shifted) index.
    ///
    /// Editing the row that is already in edit mode changes nothing and does
    /// not notify.
    pub fn edit_transaction(&mut self, index: usize) -> Result<usize, CoreError> {
        if self.portfolio.editing_index() == Some(index) {
            return Ok(index);
        }
        let index = self
            .portfolio_service
            .edit_transaction(&mut self.portfolio, index)?;
        self.notify();
        Ok(index)
    }

    /// Select (or with `None`, clear) the coin of the row being edited.
    pub fn transaction_coin_changed(&mut self, coin_id: Option<&str>) -> Result<usize, CoreError> {
        let coins = self.get_coins_data();
        let index = self
            .portfolio_service
            .set_coin(&mut self.portfolio, &coins, coin_id)?;
        self.notify();
        Ok(index)
    }

    pub fn transaction_units_changed(&mut self, text: &str) -> Result<usize, CoreError> {
        let index = self.portfolio_service.set_units(&mut self.portfolio, text)?;
        self.notify();
        Ok(index)
    }

    pub fn transaction_initial_price_changed(&mut self, text: &str) -> Result<usize, CoreError> {
        let index = self
            .portfolio_service
            .set_initial_price(&mut self.portfolio, text)?;
        self.notify();
        Ok(index)
    }

    /// Commit the row being edited. Fails with `TransactionInvalid`, and
    /// changes nothing, while any validity flag is false or the invested
    /// amount overflows.
    pub fn save_transaction(&mut self) -> Result<usize, CoreError> {
        let coins = self.get_coins_data();
        let index = self
            .portfolio_service
            .save_transaction(&mut self.portfolio, &coins)?;
        self.notify();
        Ok(index)
    }

    /// Restore the row being edited to its last saved values, or remove it
    /// if it was never saved.
    pub fn cancel_transaction(&mut self) -> Result<usize, CoreError> {
        let index = self.portfolio_service.cancel_transaction(&mut self.portfolio)?;
        self.notify();
        Ok(index)
    }

    /// Message-bus entry point: apply one intent.
    ///
    /// Rejected intents (out-of-range index, nothing being edited, saving an
    /// invalid row) are logged at debug level and otherwise ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Effect {
        let name = intent.name();
        let result = match intent {
            Intent::AddTransaction => {
                self.add_transaction();
                Ok(())
            }
            Intent::RemoveTransaction(index) => self.remove_transaction(index).map(drop),
            Intent::EditTransaction(index) => self.edit_transaction(index).map(drop),
            Intent::TransactionCoinChanged(coin_id) => {
                self.transaction_coin_changed(coin_id.as_deref()).map(drop)
            }
            Intent::TransactionUnitsChanged(text) => {
                self.transaction_units_changed(&text).map(drop)
            }
            Intent::TransactionInitialPriceChanged(text) => {
                self.transaction_initial_price_changed(&text).map(drop)
            }
            Intent::SaveTransaction => self.save_transaction().map(drop),
            Intent::CancelTransaction => self.cancel_transaction().map(drop),
            Intent::FetchCoinsData => {
                debug!("coin data refresh requested");
                return Effect::FetchCoinsData;
            }
        };

        if let Err(e) = result {
            debug!(intent = name, error = %e, "intent ignored");
        }
        Effect::None
    }

    // ── Coin data ───────────────────────────────────────────────────

    /// Apply the outcome of a coin-list fetch.
    ///
    /// On success the payload is written to the cache, prices are refreshed on
    /// every row whose coin is listed, and listeners are notified. On failure
    /// the error is logged and nothing changes.
    pub fn apply_coins_data(&mut self, result: Result<CoinsData, CoreError>) {
        let coins = match result {
            Ok(coins) => coins,
            Err(e) => {
                warn!(error = %e, "coin data fetch failed; keeping cached list");
                return;
            }
        };

        if let Err(e) = self.write_coins_cache(&coins) {
            warn!(error = %e, key = %self.settings.coins_cache_key, "failed to cache coin data");
        }

        let updated = self.portfolio_service.refresh_prices(&mut self.portfolio, &coins);
        info!(coins = coins.data.len(), rows_repriced = updated, "coin data refreshed");
        self.notify();
    }

    /// The last cached coin list, read back verbatim.
    ///
    /// Returns the empty sentinel when nothing is cached. An unreadable
    /// cache also yields the sentinel, with a warning.
    #[must_use]
    pub fn get_coins_data(&self) -> CoinsData {
        let key = &self.settings.coins_cache_key;
        match self.storage.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, key = %key, "cached coin data is not decodable");
                CoinsData::default()
            }),
            Ok(None) => CoinsData::default(),
            Err(e) => {
                warn!(error = %e, key = %key, "failed to read coin data cache");
                CoinsData::default()
            }
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Read-only view of the ledger.
    #[must_use]
    pub fn get_portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Aggregate valuation over every committed lot.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        metrics_service::summarize(&self.portfolio)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of change notifications emitted since construction.
    #[must_use]
    pub fn change_count(&self) -> u64 {
        self.changes
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Register a change listener.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PortfolioStore) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // ── Internal ────────────────────────────────────────────────────

    fn write_coins_cache(&mut self, coins: &CoinsData) -> Result<(), CoreError> {
        let raw = serde_json::to_string(coins)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize coin data: {e}")))?;
        self.storage.set(&self.settings.coins_cache_key, &raw)
    }

    fn notify(&mut self) {
        self.changes += 1;
        // Listeners get `&self`, so they are moved out while they run.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(self);
        }
        self.listeners = listeners;
    }
}
