//! Per-stock calculations against the shared ledger.

use chrono::Duration;
use std::fmt;

use super::error::MarketError;
use super::ledger::TradeLedger;
use super::stock::{Stock, StockType};
use super::trade::{TradeRecord, TradeSide};

/// Trailing window for the volume weighted stock price.
pub const VWSP_WINDOW_MINUTES: i64 = 15;

/// The trailing window for `minutes`, or `None` unless it is positive and
/// fits in a [`Duration`].
pub fn vwsp_window(minutes: i64) -> Option<Duration> {
    if minutes <= 0 {
        return None;
    }
    Duration::try_minutes(minutes)
}

/// A ratio that is either a number or not meaningful for the inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    NotApplicable,
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::NotApplicable => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
            Metric::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// A stock bound to the ledger it trades on.
pub struct StockOperations<'a> {
    stock: &'a Stock,
    ledger: &'a TradeLedger,
    window: Duration,
}

impl<'a> StockOperations<'a> {
    pub fn new(stock: &'a Stock, ledger: &'a TradeLedger) -> Self {
        StockOperations {
            stock,
            ledger,
            window: Duration::minutes(VWSP_WINDOW_MINUTES),
        }
    }

    pub fn with_window_minutes(mut self, minutes: i64) -> Result<Self, MarketError> {
        self.window = vwsp_window(minutes).ok_or_else(|| {
            MarketError::invalid_input(format!("VWSP window of {minutes} minutes is out of range"))
        })?;
        Ok(self)
    }

    pub fn stock(&self) -> &Stock {
        self.stock
    }

    pub fn record_trade(
        &self,
        quantity: u64,
        side: TradeSide,
        price: f64,
    ) -> Result<TradeRecord, MarketError> {
        self.ledger.record(self.stock.symbol(), quantity, side, price)
    }

    /// Last dividend for common stock, fixed rate times par for preferred.
    pub fn applicable_dividend(&self) -> f64 {
        match self.stock.stock_type() {
            StockType::Common => self.stock.last_dividend(),
            StockType::Preferred => self.stock.fixed_dividend_rate() * self.stock.par_value(),
        }
    }

    fn applicable_dividend_at(&self, price: f64) -> Option<f64> {
        if !(price > 0.0) {
            return None;
        }
        let dividend = self.applicable_dividend();
        if dividend > 0.0 { Some(dividend) } else { None }
    }

    pub fn dividend_yield(&self, price: f64) -> Metric {
        match self.applicable_dividend_at(price) {
            Some(dividend) => Metric::Value(dividend / price),
            None => Metric::NotApplicable,
        }
    }

    pub fn pe_ratio(&self, price: f64) -> Metric {
        match self.applicable_dividend_at(price) {
            Some(dividend) => Metric::Value(price / dividend),
            None => Metric::NotApplicable,
        }
    }

    /// Sum of traded value over sum of quantity for this stock's trades in
    /// the trailing window.
    pub fn volume_weighted_stock_price(&self) -> Result<f64, MarketError> {
        let symbol = self.stock.symbol();
        match self.ledger.window_totals(symbol, self.window) {
            Some(totals) => Ok(totals.total_value / totals.quantity as f64),
            None => {
                let window_minutes = self.window.num_minutes();
                tracing::warn!(symbol, window_minutes, "no trades in window");
                Err(MarketError::EmptyWindow {
                    symbol: symbol.to_string(),
                    window_minutes,
                })
            }
        }
    }
}
