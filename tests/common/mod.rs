#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use gbce::domain::clock::ManualClock;
use gbce::domain::error::MarketError;
use gbce::domain::ledger::TradeLedger;
use gbce::domain::stock::{Stock, StockType};
use gbce::domain::trade::TradeRecord;
use gbce::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::sync::Arc;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// A ledger driven by a clock the test controls.
pub fn manual_ledger() -> (TradeLedger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    (TradeLedger::new(clock.clone()), clock)
}

pub fn common_stock(symbol: &str, last_dividend: f64) -> Stock {
    Stock::new(symbol, StockType::Common, last_dividend, None, 100.0).unwrap()
}

pub fn preferred_stock(symbol: &str, fixed_dividend: Option<f64>, par_value: f64) -> Stock {
    Stock::new(symbol, StockType::Preferred, 8.0, fixed_dividend, par_value).unwrap()
}

/// Report port that keeps every batch it is handed.
#[derive(Default)]
pub struct RecordingReport {
    pub batches: RefCell<Vec<Vec<TradeRecord>>>,
}

impl ReportPort for RecordingReport {
    fn write_trades(&self, records: &[TradeRecord]) -> Result<(), MarketError> {
        self.batches.borrow_mut().push(records.to_vec());
        Ok(())
    }
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
