//! In-memory trade ledger shared by every stock handle.
//!
//! The ledger is an explicit object: the caller creates it, lends it to each
//! [`StockOperations`](super::operations::StockOperations) and clears it when
//! done. Appends and windowed reads go through one mutex so an aggregate
//! never sees a half-applied append.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::clock::{Clock, SystemClock};
use super::error::MarketError;
use super::trade::{TradeRecord, TradeSide};

/// Sums over the trades of one stock inside a trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTotals {
    pub total_value: f64,
    pub quantity: u128,
    pub trades: usize,
}

pub struct TradeLedger {
    records: Mutex<Vec<TradeRecord>>,
    clock: Arc<dyn Clock>,
}

impl TradeLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        TradeLedger {
            records: Mutex::new(Vec::new()),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TradeRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a trade stamped with the current clock time.
    pub fn record(
        &self,
        stock_symbol: &str,
        quantity: u64,
        side: TradeSide,
        traded_price: f64,
    ) -> Result<TradeRecord, MarketError> {
        if quantity == 0 {
            return Err(MarketError::invalid_input(format!(
                "{stock_symbol}: trade quantity must be positive"
            )));
        }
        if !traded_price.is_finite() || traded_price <= 0.0 {
            return Err(MarketError::invalid_input(format!(
                "{stock_symbol}: traded price must be positive, got {traded_price}"
            )));
        }
        if !(quantity as f64 * traded_price).is_finite() {
            return Err(MarketError::invalid_input(format!(
                "{stock_symbol}: trade value of {quantity} x {traded_price} is out of range"
            )));
        }

        let record = TradeRecord::new(stock_symbol, quantity, side, traded_price, self.now());
        self.lock().push(record.clone());
        tracing::debug!(
            symbol = stock_symbol,
            quantity,
            price = traded_price,
            side = %side,
            "trade recorded"
        );
        Ok(record)
    }

    /// Copy of every record in insertion order.
    pub fn records(&self) -> Vec<TradeRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard every record.
    pub fn clear(&self) {
        let mut records = self.lock();
        let dropped = records.len();
        records.clear();
        tracing::info!(dropped, "trade records cleared");
    }

    /// Totals for `stock_symbol` over trades aged at most `window`, measured
    /// from the clock's current time. `None` when no trade qualifies.
    pub fn window_totals(&self, stock_symbol: &str, window: Duration) -> Option<WindowTotals> {
        let records = self.lock();
        let now = self.now();

        let mut totals = WindowTotals {
            total_value: 0.0,
            quantity: 0,
            trades: 0,
        };
        for record in records
            .iter()
            .filter(|r| r.stock_symbol == stock_symbol && now - r.timestamp <= window)
        {
            totals.total_value += record.total_value;
            totals.quantity += u128::from(record.quantity);
            totals.trades += 1;
        }

        if totals.trades == 0 { None } else { Some(totals) }
    }

    /// Traded price of every record across all stocks.
    pub fn traded_prices(&self) -> Vec<f64> {
        self.lock().iter().map(|r| r.traded_price).collect()
    }
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::with_system_clock()
    }
}
