use crate::errors::CoreError;
use crate::models::coin::{CoinRef, CoinsData};
use crate::models::portfolio::Portfolio;
use crate::models::transaction::{CommittedFields, Transaction};

use super::metrics_service::transaction_metrics;
use super::validation_service::{
    is_coin_valid, is_initial_price_valid, is_units_valid, parse_positive_decimal,
};

/// Ledger transitions: add, remove, edit, field changes, save, cancel.
///
/// No I/O and no notifications.
/// At most one row is in edit mode at a time; starting a new edit discards
/// whichever edit was in progress, exactly as a cancel would.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Append a fresh draft row and return its index.
    pub fn add_transaction(&self, portfolio: &mut Portfolio) -> usize {
        if let Some(editing) = portfolio.editing_index() {
            Self::discard_edit(portfolio, editing);
        }
        portfolio.transactions.push(Transaction::new_draft());
        portfolio.transactions.len() - 1
    }

    /// Remove the row at `index`, shifting later rows down by one.
    pub fn remove_transaction(
        &self,
        portfolio: &mut Portfolio,
        index: usize,
    ) -> Result<Transaction, CoreError> {
        Self::check_index(portfolio, index)?;
        Ok(portfolio.transactions.remove(index))
    }

    /// Put the row at `index` into edit mode.
    ///
    /// Returns the row's index once any other in-progress edit has been
    /// discarded (discarding a never-saved row removes it, which can shift `index`).
    pub fn edit_transaction(
        &self,
        portfolio: &mut Portfolio,
        index: usize,
    ) -> Result<usize, CoreError> {
        Self::check_index(portfolio, index)?;

        let mut target = index;
        if let Some(editing) = portfolio.editing_index() {
            if editing == index {
                return Ok(index);
            }
            let removed = Self::discard_edit(portfolio, editing);
            if removed && editing < index {
                target -= 1;
            }
        }

        let transaction = &mut portfolio.transactions[target];
        transaction.edit_mode = true;
        Self::revalidate(transaction);
        Ok(target)
    }

    /// Select a coin on the row being edited; `None` clears the selection.
    pub fn set_coin(
        &self,
        portfolio: &mut Portfolio,
        coins: &CoinsData,
        coin_id: Option<&str>,
    ) -> Result<usize, CoreError> {
        let (index, transaction) = Self::editing_mut(portfolio)?;
        transaction.coin = match coin_id {
            Some(id) => coins
                .find(id)
                .map(CoinRef::from_coin)
                .unwrap_or_else(|| CoinRef::from_id(id)),
            None => CoinRef::default(),
        };
        transaction.is_coin_valid = is_coin_valid(&transaction.coin);
        Ok(index)
    }

    pub fn set_units(&self, portfolio: &mut Portfolio, text: &str) -> Result<usize, CoreError> {
        let (index, transaction) = Self::editing_mut(portfolio)?;
        transaction.units = text.to_string();
        transaction.is_units_valid = is_units_valid(text);
        Ok(index)
    }

    pub fn set_initial_price(
        &self,
        portfolio: &mut Portfolio,
        text: &str,
    ) -> Result<usize, CoreError> {
        let (index, transaction) = Self::editing_mut(portfolio)?;
        transaction.initial_price = text.to_string();
        transaction.is_initial_price_valid = is_initial_price_valid(text);
        Ok(index)
    }

    /// Commit the row being edited.
    ///
    /// Refuses with `TransactionInvalid` while any validity flag is false, or
    /// when units × initial price does not fit in an `f64`; the row is left
    /// untouched in that case.
    pub fn save_transaction(
        &self,
        portfolio: &mut Portfolio,
        coins: &CoinsData,
    ) -> Result<usize, CoreError> {
        let (index, transaction) = Self::editing_mut(portfolio)?;
        if !transaction.is_valid() {
            return Err(CoreError::TransactionInvalid { index });
        }
        let units = parse_positive_decimal(&transaction.units).unwrap_or(0.0);
        let initial_price = parse_positive_decimal(&transaction.initial_price).unwrap_or(0.0);
        if !(units * initial_price).is_finite() {
            return Err(CoreError::TransactionInvalid { index });
        }

        let same_coin = transaction
            .committed
            .as_ref()
            .is_some_and(|c| c.coin.id == transaction.coin.id);
        transaction.current_price = match coins.price_of(&transaction.coin.id) {
            Some(price) => price,
            None if same_coin => transaction.current_price,
            None => 0.0,
        };

        transaction.committed = Some(CommittedFields {
            coin: transaction.coin.clone(),
            units: transaction.units.clone(),
            initial_price: transaction.initial_price.clone(),
        });
        transaction.edit_mode = false;
        transaction.metrics = transaction_metrics(transaction);
        Ok(index)
    }

    /// Abandon the edit in progress: restore the last saved values, or drop
    /// the row entirely if it was never saved. Returns the row's index.
    pub fn cancel_transaction(&self, portfolio: &mut Portfolio) -> Result<usize, CoreError> {
        let index = portfolio
            .editing_index()
            .ok_or(CoreError::NoTransactionInEdit)?;
        Self::discard_edit(portfolio, index);
        Ok(index)
    }

    /// Apply fresh market prices to every row whose coin is listed.
    /// Returns the number of rows updated.
    pub fn refresh_prices(&self, portfolio: &mut Portfolio, coins: &CoinsData) -> usize {
        let mut updated = 0;
        for transaction in &mut portfolio.transactions {
            let listed = transaction
                .committed
                .as_ref()
                .map(|c| c.coin.id.as_str())
                .unwrap_or(transaction.coin.id.as_str());
            if let Some(price) = coins.price_of(listed) {
                transaction.current_price = price;
                transaction.metrics = transaction_metrics(transaction);
                updated += 1;
            }
        }
        updated
    }

    // ── Internal ────────────────────────────────────────────────────

    fn check_index(portfolio: &Portfolio, index: usize) -> Result<(), CoreError> {
        if index < portfolio.transactions.len() {
            Ok(())
        } else {
            Err(CoreError::TransactionNotFound {
                index,
                len: portfolio.transactions.len(),
            })
        }
    }

    fn editing_mut(portfolio: &mut Portfolio) -> Result<(usize, &mut Transaction), CoreError> {
        let index = portfolio
            .editing_index()
            .ok_or(CoreError::NoTransactionInEdit)?;
        Ok((index, &mut portfolio.transactions[index]))
    }

    /// Revert or remove the row at `index`. Returns `true` if it was removed.
    fn discard_edit(portfolio: &mut Portfolio, index: usize) -> bool {
        let transaction = &mut portfolio.transactions[index];
        match transaction.committed.clone() {
            Some(committed) => {
                transaction.coin = committed.coin;
                transaction.units = committed.units;
                transaction.initial_price = committed.initial_price;
                transaction.edit_mode = false;
                Self::revalidate(transaction);
                transaction.metrics = transaction_metrics(transaction);
                false
            }
            None => {
                portfolio.transactions.remove(index);
                true
            }
        }
    }

    fn revalidate(transaction: &mut Transaction) {
        transaction.is_coin_valid = is_coin_valid(&transaction.coin);
        transaction.is_units_valid = is_units_valid(&transaction.units);
        transaction.is_initial_price_valid = is_initial_price_valid(&transaction.initial_price);
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
