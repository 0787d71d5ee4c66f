use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// The ledger: every recorded lot, in insertion order.
///
/// A transaction's position is its address for remove/edit intents, so the
/// order is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Position of the row currently in edit mode, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.transactions.iter().position(|t| t.edit_mode)
    }
}
