use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::CoinsData;

/// Source of the coin reference list (ids, names, symbols, latest prices).
///
/// The store never calls this directly: it asks for a refresh, and the
/// runtime runs the fetch and hands the result back to the store.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CoinDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Retrieve the full coin list.
    async fn fetch_coins(&self) -> Result<CoinsData, CoreError>;
}
