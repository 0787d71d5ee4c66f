//! Per-row interaction state for the transaction table.
//!
//! A row is in `View` or `Edit` mode, taken straight from the ledger's
//! `edit_mode` flag. The controller only owns what never reaches the ledger:
//! which field gets focus and whether the coin picker is open. Its handlers
//! translate user input into [`Intent`]s for the store.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::coin::{CoinRef, CoinsData};
use crate::models::intent::Intent;
use crate::models::portfolio::Portfolio;
use crate::models::transaction::{Transaction, TransactionField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    /// Read-only row
    View,
    /// Form inputs visible
    Edit,
}

impl RowMode {
    pub fn of(transaction: &Transaction) -> Self {
        if transaction.edit_mode {
            RowMode::Edit
        } else {
            RowMode::View
        }
    }
}

/// Keys the row reacts to; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Char(char),
    Other,
}

/// Interaction state machine for one ledger row.
#[derive(Debug, Clone)]
pub struct TransactionEditController {
    index: usize,
    transaction_id: Uuid,
    field_to_focus: TransactionField,
    is_coin_menu_open: bool,
    is_listening: bool,
}

impl TransactionEditController {
    /// Controller for the row at `index`. It ignores keyboard input until mounted.
    pub fn new(index: usize, transaction: &Transaction) -> Self {
        Self {
            index,
            transaction_id: transaction.id,
            field_to_focus: TransactionField::Coin,
            is_coin_menu_open: false,
            is_listening: false,
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Start receiving keyboard events.
    pub fn mount(&mut self) {
        self.is_listening = true;
    }

    /// Stop receiving keyboard events; the row is no longer displayed.
    pub fn unmount(&mut self) {
        self.is_listening = false;
        self.is_coin_menu_open = false;
    }

    /// Point the controller at the row's new position after a removal.
    pub fn rebind(&mut self, index: usize) {
        self.index = index;
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    pub fn field_to_focus(&self) -> TransactionField {
        self.field_to_focus
    }

    pub fn is_coin_menu_open(&self) -> bool {
        self.is_coin_menu_open
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    /// Save is offered only when every field is valid.
    pub fn is_save_enabled(transaction: &Transaction) -> bool {
        transaction.is_valid()
    }

    // ── Input handlers ──────────────────────────────────────────────

    /// A click on a field of a read-only row starts editing it and asks for
    /// that field to receive focus. Clicks on a row already editing do nothing.
    pub fn on_cell_click(
        &mut self,
        field: TransactionField,
        transaction: &Transaction,
    ) -> Option<Intent> {
        if transaction.edit_mode {
            return None;
        }
        self.field_to_focus = field;
        Some(Intent::EditTransaction(self.index))
    }

    pub fn on_coin_change(&self, selected: Option<&CoinRef>) -> Intent {
        Intent::TransactionCoinChanged(selected.map(|c| c.id.clone()))
    }

    pub fn on_units_change(&self, text: &str) -> Intent {
        Intent::TransactionUnitsChanged(text.to_string())
    }

    pub fn on_initial_price_change(&self, text: &str) -> Intent {
        Intent::TransactionInitialPriceChanged(text.to_string())
    }

    /// Save button. Disabled (no intent) while any field is invalid.
    pub fn on_save(&self, transaction: &Transaction) -> Option<Intent> {
        Self::is_save_enabled(transaction).then_some(Intent::SaveTransaction)
    }

    pub fn on_cancel(&self) -> Intent {
        Intent::CancelTransaction
    }

    pub fn on_remove(&self) -> Intent {
        Intent::RemoveTransaction(self.index)
    }

    pub fn on_coin_menu_open(&mut self) {
        self.is_coin_menu_open = true;
    }

    pub fn on_coin_menu_close(&mut self) {
        self.is_coin_menu_open = false;
    }

    /// Keyboard shortcuts for a row in edit mode: Escape cancels, Enter saves
    /// when every field is valid. While the coin picker is open it owns both
    /// keys and nothing is emitted. Unmounted or stale rows ignore input.
    pub fn on_key_down(&self, key: Key, portfolio: &Portfolio) -> Option<Intent> {
        if !self.is_listening || self.is_coin_menu_open {
            return None;
        }
        let transaction = portfolio
            .get(self.index)
            .filter(|t| t.id == self.transaction_id)?;
        if !transaction.edit_mode {
            return None;
        }

        match key {
            Key::Escape => Some(Intent::CancelTransaction),
            Key::Enter => self.on_save(transaction),
            Key::Tab | Key::Char(_) | Key::Other => None,
        }
    }

    /// Options for the coin picker, labelled `"Name (SYM)"`.
    pub fn coin_options(coins: &CoinsData) -> Vec<CoinRef> {
        coins.data.iter().map(CoinRef::from_coin).collect()
    }
}

/// The mounted rows of the transaction table.
///
/// Re-synced against the ledger after every change notification: new rows
/// are mounted, removed rows are unmounted, survivors are re-bound to their
/// current index. Key events are broadcast to every mounted row.
#[derive(Debug, Default)]
pub struct TransactionTable {
    rows: Vec<TransactionEditController>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile mounted rows with the ledger.
    pub fn sync(&mut self, portfolio: &Portfolio) {
        let mut previous: HashMap<Uuid, TransactionEditController> = self
            .rows
            .drain(..)
            .map(|row| (row.transaction_id, row))
            .collect();

        for (index, transaction) in portfolio.transactions.iter().enumerate() {
            let row = match previous.remove(&transaction.id) {
                Some(mut row) => {
                    row.rebind(index);
                    if !transaction.edit_mode {
                        // The picker only exists in edit mode.
                        row.is_coin_menu_open = false;
                    }
                    row
                }
                None => {
                    let mut row = TransactionEditController::new(index, transaction);
                    row.mount();
                    row
                }
            };
            self.rows.push(row);
        }

        for row in previous.values_mut() {
            row.unmount();
        }
    }

    pub fn rows(&self) -> &[TransactionEditController] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TransactionEditController> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TransactionEditController> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Deliver a key press to every mounted row and collect the intents.
    pub fn key_down(&self, key: Key, portfolio: &Portfolio) -> Vec<Intent> {
        self.rows
            .iter()
            .filter_map(|row| row.on_key_down(key, portfolio))
            .collect()
    }
}
