//! Stock definitions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::error::MarketError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockType {
    Common,
    Preferred,
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            StockType::Common => "Common",
            StockType::Preferred => "Preferred",
        })
    }
}

impl FromStr for StockType {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(StockType::Common),
            "preferred" => Ok(StockType::Preferred),
            other => Err(MarketError::invalid_input(format!(
                "unknown stock type '{other}' (expected Common or Preferred)"
            ))),
        }
    }
}

/// An immutable tradable instrument.
///
/// Fields are private so a constructed stock can't be changed; equality and
/// hashing compare every field, with floats compared by bit pattern.
#[derive(Debug, Clone)]
pub struct Stock {
    symbol: String,
    stock_type: StockType,
    last_dividend: f64,
    fixed_dividend: Option<f64>,
    par_value: f64,
}

impl Stock {
    pub fn new(
        symbol: impl Into<String>,
        stock_type: StockType,
        last_dividend: f64,
        fixed_dividend: Option<f64>,
        par_value: f64,
    ) -> Result<Self, MarketError> {
        let symbol = symbol.into().trim().to_uppercase();
        if symbol.is_empty() {
            return Err(MarketError::invalid_input("stock symbol must not be empty"));
        }
        if !last_dividend.is_finite() || last_dividend < 0.0 {
            return Err(MarketError::invalid_input(format!(
                "{symbol}: last dividend must be a non-negative number"
            )));
        }
        if let Some(rate) = fixed_dividend {
            if !rate.is_finite() || rate < 0.0 {
                return Err(MarketError::invalid_input(format!(
                    "{symbol}: fixed dividend rate must be a non-negative fraction"
                )));
            }
        }
        if !par_value.is_finite() || par_value <= 0.0 {
            return Err(MarketError::invalid_input(format!(
                "{symbol}: par value must be positive"
            )));
        }
        Ok(Stock {
            symbol,
            stock_type,
            last_dividend,
            fixed_dividend,
            par_value,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn fixed_dividend(&self) -> Option<f64> {
        self.fixed_dividend
    }

    /// Fixed dividend as a fraction of par, 0 when the stock has none.
    pub fn fixed_dividend_rate(&self) -> f64 {
        self.fixed_dividend.unwrap_or(0.0)
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }
}

impl PartialEq for Stock {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.stock_type == other.stock_type
            && self.last_dividend.to_bits() == other.last_dividend.to_bits()
            && self.fixed_dividend.map(f64::to_bits) == other.fixed_dividend.map(f64::to_bits)
            && self.par_value.to_bits() == other.par_value.to_bits()
    }
}

impl Eq for Stock {}

impl Hash for Stock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.stock_type.hash(state);
        self.last_dividend.to_bits().hash(state);
        self.fixed_dividend.map(f64::to_bits).hash(state);
        self.par_value.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pop() -> Stock {
        Stock::new("POP", StockType::Common, 8.0, None, 100.0).unwrap()
    }

    #[test]
    fn new_normalises_symbol() {
        let stock = Stock::new(" gin ", StockType::Preferred, 8.0, Some(0.02), 100.0).unwrap();
        assert_eq!(stock.symbol(), "GIN");
        assert_eq!(stock.stock_type(), StockType::Preferred);
        assert_eq!(stock.fixed_dividend(), Some(0.02));
    }

    #[test]
    fn fixed_dividend_rate_defaults_to_zero() {
        assert_eq!(pop().fixed_dividend_rate(), 0.0);
    }

    #[test]
    fn rejects_empty_symbol() {
        let err = Stock::new("  ", StockType::Common, 0.0, None, 100.0).unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_negative_dividend() {
        assert!(Stock::new("TEA", StockType::Common, -1.0, None, 100.0).is_err());
        assert!(Stock::new("GIN", StockType::Preferred, 0.0, Some(-0.02), 100.0).is_err());
    }

    #[test]
    fn rejects_non_positive_par_value() {
        assert!(Stock::new("TEA", StockType::Common, 0.0, None, 0.0).is_err());
        assert!(Stock::new("TEA", StockType::Common, 0.0, None, f64::NAN).is_err());
    }

    #[test]
    fn equality_and_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(pop());
        set.insert(pop());
        assert_eq!(set.len(), 1);

        let other = Stock::new("POP", StockType::Common, 9.0, None, 100.0).unwrap();
        assert_ne!(pop(), other);
        set.insert(other);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn stock_type_parses_case_insensitively() {
        assert_eq!("common".parse::<StockType>().unwrap(), StockType::Common);
        assert_eq!(" PREFERRED ".parse::<StockType>().unwrap(), StockType::Preferred);
        assert!("ordinary".parse::<StockType>().is_err());
    }
}
