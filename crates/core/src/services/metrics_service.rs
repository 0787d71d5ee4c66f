use crate::models::metrics::{PortfolioTotals, TransactionMetrics};
use crate::models::portfolio::Portfolio;
use crate::models::transaction::Transaction;

use super::validation_service::parse_positive_decimal;

/// Derive the valuation of one lot.
pub fn compute_metrics(units: f64, initial_price: f64, current_price: f64) -> TransactionMetrics {
    let total_invested = units * initial_price;
    let current_value = units * current_price;
    let profit = current_value - total_invested;

    TransactionMetrics {
        total_invested,
        current_value,
        profit,
        margin: margin_pct(profit, total_invested),
    }
}

/// `profit / invested × 100`, defined as 0 when nothing was invested
/// (or when the ratio is not finite) so it never turns into NaN or infinity.
pub fn margin_pct(profit: f64, invested: f64) -> f64 {
    if invested == 0.0 {
        return 0.0;
    }
    let margin = profit / invested * 100.0;
    if margin.is_finite() {
        margin
    } else {
        0.0
    }
}

/// Metrics for a transaction's committed values against its current price.
///
/// A row that was never saved has nothing committed and values to zero.
pub fn transaction_metrics(transaction: &Transaction) -> TransactionMetrics {
    let Some(committed) = &transaction.committed else {
        return TransactionMetrics::default();
    };
    let units = parse_positive_decimal(&committed.units).unwrap_or(0.0);
    let initial_price = parse_positive_decimal(&committed.initial_price).unwrap_or(0.0);
    compute_metrics(units, initial_price, transaction.current_price)
}

/// Sum the metrics of every committed lot.
///
/// Rows that were never saved are skipped. A row being re-edited still counts
/// with its last committed values.
pub fn summarize(portfolio: &Portfolio) -> PortfolioTotals {
    let mut totals = PortfolioTotals::default();

    for transaction in portfolio.transactions.iter().filter(|t| t.has_been_saved()) {
        let metrics = &transaction.metrics;
        totals.lots += 1;
        totals.total_invested += metrics.total_invested;
        totals.current_value += metrics.current_value;
    }

    totals.profit = totals.current_value - totals.total_invested;
    totals.margin = margin_pct(totals.profit, totals.total_invested);
    totals
}
