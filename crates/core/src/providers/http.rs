use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::errors::CoreError;
use crate::models::coin::CoinsData;
use crate::models::settings::Settings;
use super::traits::CoinDataProvider;

const PROVIDER_NAME: &str = "CoinsEndpoint";

/// Fetches the coin reference list from a JSON endpoint.
///
/// - **Request**: plain `GET` on the configured URL, no authentication.
/// - **Response**: `{"added_at": "...", "data": [{"id", "name", "symbol", "price_usd", "last_updated"}]}`
///
/// No request timeout is set; a request that never resolves simply never
/// produces a result.
pub struct HttpCoinDataProvider {
    client: Client,
    endpoint: String,
}

impl HttpCoinDataProvider {
    /// Build a provider with a configured client, failing if the TLS backend
    /// cannot be initialised.
    pub fn try_new(endpoint: impl Into<String>) -> Result<Self, CoreError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.user_agent(concat!("coin-ledger/", env!("CARGO_PKG_VERSION")));
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Like [`try_new`](Self::try_new), falling back to reqwest's default
    /// client (no custom user agent) with a warning.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self::try_new(endpoint.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "HTTP client configuration failed; using default client");
            Self {
                client: Client::new(),
                endpoint,
            }
        })
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.coins_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpCoinDataProvider {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CoinDataProvider for HttpCoinDataProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_coins(&self) -> Result<CoinsData, CoreError> {
        let resp = self.client.get(&self.endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Coin list request failed with status {status}"),
            });
        }

        resp.json::<CoinsData>().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse coin list: {e}"),
        })
    }
}
