use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::coin::CoinsData;
use crate::models::intent::Intent;
use crate::providers::traits::CoinDataProvider;
use crate::store::{Effect, PortfolioStore};

/// Sending half of the message bus. Cheap to clone; one per intent source.
#[derive(Debug, Clone)]
pub struct IntentBus {
    tx: mpsc::UnboundedSender<Intent>,
}

impl IntentBus {
    /// Queue an intent for the store. Fails only once the runtime has stopped.
    pub fn send(&self, intent: Intent) -> Result<(), CoreError> {
        self.tx.send(intent).map_err(|_| CoreError::BusClosed)
    }
}

/// Owns the store and serializes everything that reaches it.
///
/// Intents are applied one at a time, each to completion. A coin-data
/// refresh is the only thing that runs in the background: the fetch is
/// spawned, other intents keep being served, and the result is applied to
/// the store when the fetch resolves.
pub struct StoreRuntime {
    store: PortfolioStore,
    provider: Arc<dyn CoinDataProvider>,
    intents: mpsc::UnboundedReceiver<Intent>,
    pending: JoinSet<Result<CoinsData, CoreError>>,
}

impl StoreRuntime {
    pub fn new(store: PortfolioStore, provider: Arc<dyn CoinDataProvider>) -> (Self, IntentBus) {
        let (tx, intents) = mpsc::unbounded_channel();
        let runtime = Self {
            store,
            provider,
            intents,
            pending: JoinSet::new(),
        };
        (runtime, IntentBus { tx })
    }

    #[must_use]
    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    /// Serve intents until every [`IntentBus`] handle is dropped, then wait
    /// for outstanding fetches to settle and hand the store back.
    pub async fn run(mut self) -> PortfolioStore {
        loop {
            tokio::select! {
                intent = self.intents.recv() => match intent {
                    Some(intent) => self.handle(intent),
                    None => break,
                },
                Some(joined) = self.pending.join_next(), if !self.pending.is_empty() => {
                    self.settle(joined);
                }
            }
        }

        while let Some(joined) = self.pending.join_next().await {
            self.settle(joined);
        }
        debug!("intent bus closed; store runtime stopped");
        self.store
    }

    fn handle(&mut self, intent: Intent) {
        match self.store.dispatch(intent) {
            Effect::None => {}
            Effect::FetchCoinsData => {
                let provider = Arc::clone(&self.provider);
                debug!(provider = provider.name(), "fetching coin data");
                self.pending.spawn(async move { provider.fetch_coins().await });
            }
        }
    }

    fn settle(&mut self, joined: Result<Result<CoinsData, CoreError>, JoinError>) {
        let result = joined.unwrap_or_else(|e| {
            warn!(error = %e, "coin data fetch task did not complete");
            Err(CoreError::Api {
                provider: self.provider.name().to_string(),
                message: format!("Fetch task failed: {e}"),
            })
        });
        self.store.apply_coins_data(result);
    }
}
