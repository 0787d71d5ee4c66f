use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of the coin reference list returned by the coin data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Provider id, lowercase (e.g., "bitcoin")
    pub id: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,

    /// Latest known market price per unit, in USD
    #[serde(default)]
    pub price_usd: f64,

    /// When the provider last refreshed this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Provider fields the ledger does not read, kept so the cached payload
    /// round-trips unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The coin reference list plus the time it was assembled.
///
/// `CoinsData::default()` is the empty sentinel returned when nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub data: Vec<Coin>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoinsData {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Look up a coin by its provider id.
    pub fn find(&self, id: &str) -> Option<&Coin> {
        self.data.iter().find(|c| c.id == id)
    }

    /// Latest price for a coin id, if the coin is listed.
    pub fn price_of(&self, id: &str) -> Option<f64> {
        self.find(id).map(|c| c.price_usd)
    }
}

/// The coin identity a transaction points at.
///
/// Any of the three fields being non-empty counts as "selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinRef {
    pub id: String,
    pub label: String,
    pub symbol: String,
}

impl CoinRef {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            symbol: symbol.into(),
        }
    }

    /// Picker option for a listed coin, labelled `"Name (SYM)"`.
    pub fn from_coin(coin: &Coin) -> Self {
        Self {
            id: coin.id.clone(),
            label: format!("{} ({})", coin.name, coin.symbol),
            symbol: coin.symbol.clone(),
        }
    }

    /// A reference carrying only an id, for coins missing from the reference list.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn is_selected(&self) -> bool {
        !(self.id.is_empty() && self.symbol.is_empty() && self.label.is_empty())
    }
}
