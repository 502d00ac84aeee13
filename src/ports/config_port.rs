//! Configuration access port trait.

use crate::domain::error::MarketError;

/// Typed lookups over `[section] key` configuration. Numeric lookups return
/// the caller's default when the key is absent and `ConfigInvalid` when it is
/// present but does not parse.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, MarketError>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, MarketError>;
}
