//! GBCE All Share Index.

use super::error::MarketError;
use super::ledger::TradeLedger;

/// Geometric mean via the mean of logarithms, which avoids overflowing the
/// product on long price series.
pub fn geometric_mean(values: &[f64]) -> Result<f64, MarketError> {
    if values.is_empty() {
        return Err(MarketError::EmptyOrInvalidLedger {
            reason: "no traded prices".into(),
        });
    }
    if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(MarketError::EmptyOrInvalidLedger {
            reason: format!("traded price {bad} is not positive"),
        });
    }

    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Ok((log_sum / values.len() as f64).exp())
}

/// Geometric mean of every traded price in the ledger, across all stocks
/// and all time.
pub fn all_share_index(ledger: &TradeLedger) -> Result<f64, MarketError> {
    geometric_mean(&ledger.traded_prices())
}
