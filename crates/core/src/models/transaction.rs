use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coin::CoinRef;
use super::metrics::TransactionMetrics;

/// An editable field of a transaction row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionField {
    #[default]
    Coin,
    Units,
    InitialPrice,
}

impl std::fmt::Display for TransactionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionField::Coin => write!(f, "coin"),
            TransactionField::Units => write!(f, "units"),
            TransactionField::InitialPrice => write!(f, "initial-price"),
        }
    }
}

/// Field values as they were at the last successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedFields {
    pub coin: CoinRef,
    pub units: String,
    pub initial_price: String,
}

/// One lot purchase in the ledger.
///
/// `units` and `initial_price` stay as user-editable text; they are parsed
/// when the row is committed. A row with `edit_mode == false` always has
/// all three validity flags set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Durable identity, used to tell a live row from a stale one.
    /// Intents still address rows by position.
    pub id: Uuid,

    pub coin: CoinRef,
    pub units: String,
    pub initial_price: String,

    /// Whether the row is currently being authored
    pub edit_mode: bool,

    pub is_coin_valid: bool,
    pub is_units_valid: bool,
    pub is_initial_price_valid: bool,

    /// Latest market price per unit for `coin`, supplied by the coin data feed
    pub current_price: f64,

    /// Derived from the committed fields and `current_price`
    pub metrics: TransactionMetrics,

    /// `None` until the row is saved for the first time
    #[serde(default)]
    pub committed: Option<CommittedFields>,
}

impl Transaction {
    /// A fresh, empty row in edit mode with every validity flag cleared.
    pub fn new_draft() -> Self {
        Self {
            id: Uuid::new_v4(),
            coin: CoinRef::default(),
            units: String::new(),
            initial_price: String::new(),
            edit_mode: true,
            is_coin_valid: false,
            is_units_valid: false,
            is_initial_price_valid: false,
            current_price: 0.0,
            metrics: TransactionMetrics::default(),
            committed: None,
        }
    }

    /// All three field flags hold.
    pub fn is_valid(&self) -> bool {
        self.is_coin_valid && self.is_units_valid && self.is_initial_price_valid
    }

    pub fn has_been_saved(&self) -> bool {
        self.committed.is_some()
    }
}
