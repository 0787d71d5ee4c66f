use serde::{Deserialize, Serialize};

/// A requested state change, as delivered over the message bus.
///
/// Serialized adjacently tagged, so a bus message such as
/// `{"type": "REMOVE_TRANSACTION", "data": 1}` decodes straight into a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    AddTransaction,
    RemoveTransaction(usize),
    EditTransaction(usize),
    /// `None` when the picker was cleared
    TransactionCoinChanged(Option<String>),
    TransactionUnitsChanged(String),
    TransactionInitialPriceChanged(String),
    SaveTransaction,
    CancelTransaction,
    FetchCoinsData,
}

impl Intent {
    /// Bus name of this intent.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddTransaction => "ADD_TRANSACTION",
            Intent::RemoveTransaction(_) => "REMOVE_TRANSACTION",
            Intent::EditTransaction(_) => "EDIT_TRANSACTION",
            Intent::TransactionCoinChanged(_) => "TRANSACTION_COIN_CHANGED",
            Intent::TransactionUnitsChanged(_) => "TRANSACTION_UNITS_CHANGED",
            Intent::TransactionInitialPriceChanged(_) => "TRANSACTION_INITIAL_PRICE_CHANGED",
            Intent::SaveTransaction => "SAVE_TRANSACTION",
            Intent::CancelTransaction => "CANCEL_TRANSACTION",
            Intent::FetchCoinsData => "FETCH_COINS_DATA",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
