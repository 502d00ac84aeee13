//! Stock universe port trait.

use crate::domain::error::MarketError;
use crate::domain::stock::Stock;

pub trait StockSource {
    /// All stocks of the universe, in listing order.
    fn load_stocks(&self) -> Result<Vec<Stock>, MarketError>;

    fn find_stock(&self, symbol: &str) -> Result<Stock, MarketError> {
        let wanted = symbol.trim().to_uppercase();
        self.load_stocks()?
            .into_iter()
            .find(|s| s.symbol() == wanted)
            .ok_or(MarketError::UnknownStock { symbol: wanted })
    }
}

/// The built-in GBCE sample universe.
pub struct SampleStockSource;

impl StockSource for SampleStockSource {
    fn load_stocks(&self) -> Result<Vec<Stock>, MarketError> {
        Ok(crate::domain::sample::gbce_stocks())
    }
}
