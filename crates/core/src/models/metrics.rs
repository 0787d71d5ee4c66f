use serde::{Deserialize, Serialize};

/// Valuation of a single lot against the latest known price.
///
/// Values are kept at full precision; rounding is a display concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetrics {
    /// units × initial price
    pub total_invested: f64,

    /// units × current price
    pub current_value: f64,

    /// current_value − total_invested
    pub profit: f64,

    /// profit / total_invested × 100, or 0 when nothing was invested
    pub margin: f64,
}

/// Aggregate valuation over every committed lot in the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of committed lots included in the sums
    pub lots: usize,

    pub total_invested: f64,
    pub current_value: f64,
    pub profit: f64,

    /// profit / total_invested × 100 across all lots, 0 when nothing was invested
    pub margin: f64,
}
