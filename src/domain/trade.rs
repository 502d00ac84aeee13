//! Trade records.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::error::MarketError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Single-letter indicator used in reports.
    pub fn indicator(&self) -> char {
        match self {
            TradeSide::Buy => 'B',
            TradeSide::Sell => 'S',
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.indicator(), f)
    }
}

impl FromStr for TradeSide {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b" | "buy" => Ok(TradeSide::Buy),
            "s" | "sell" => Ok(TradeSide::Sell),
            other => Err(MarketError::invalid_input(format!(
                "unrecognised trade side '{other}' (expected B or S)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub stock_symbol: String,
    pub quantity: u64,
    pub traded_price: f64,
    /// quantity * traded_price, fixed at creation.
    pub total_value: f64,
    pub side: TradeSide,
    pub timestamp: DateTime<Utc>,
}

impl TradeRecord {
    pub(crate) fn new(
        stock_symbol: &str,
        quantity: u64,
        side: TradeSide,
        traded_price: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        TradeRecord {
            stock_symbol: stock_symbol.to_string(),
            quantity,
            traded_price,
            total_value: quantity as f64 * traded_price,
            side,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn total_value_is_quantity_times_price() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let record = TradeRecord::new("POP", 4, TradeSide::Buy, 250.0, ts);
        assert_eq!(record.stock_symbol, "POP");
        assert!((record.total_value - 1000.0).abs() < f64::EPSILON);
        assert_eq!(record.timestamp, ts);
    }

    #[test]
    fn side_parses_letters_and_words() {
        assert_eq!("B".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("s".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert_eq!(" SELL ".parse::<TradeSide>().unwrap(), TradeSide::Sell);
    }

    #[test]
    fn side_rejects_unknown() {
        let err = "X".parse::<TradeSide>().unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput { .. }));
    }

    #[test]
    fn side_displays_indicator() {
        assert_eq!(TradeSide::Buy.to_string(), "B");
        assert_eq!(TradeSide::Sell.to_string(), "S");
    }
}
