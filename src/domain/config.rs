//! Runtime configuration and its validation.
//!
//! Values come from a [`ConfigPort`]; every key is optional and falls back to
//! the defaults below. A key that is present but malformed is an error.

use crate::domain::error::MarketError;
use crate::domain::operations::{VWSP_WINDOW_MINUTES, vwsp_window};
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub seed: Option<u64>,
    pub buy_trades: usize,
    pub sell_trades: usize,
    pub buy_quantity: (u64, u64),
    pub sell_quantity: (u64, u64),
    pub price: (u64, u64),
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            seed: None,
            buy_trades: 4,
            sell_trades: 4,
            buy_quantity: (10, 25),
            sell_quantity: (5, 10),
            price: (250, 350),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub vwsp_window_minutes: i64,
    pub reference_price: f64,
    pub stocks_file: Option<String>,
    pub trades_csv: Option<String>,
    pub sample: SampleConfig,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            vwsp_window_minutes: VWSP_WINDOW_MINUTES,
            reference_price: 100.0,
            stocks_file: None,
            trades_csv: None,
            sample: SampleConfig::default(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> MarketError {
    MarketError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_range(
    config: &dyn ConfigPort,
    min_key: &str,
    max_key: &str,
    default: (u64, u64),
) -> Result<(u64, u64), MarketError> {
    let min = config.get_int("sample", min_key, default.0 as i64)?;
    let max = config.get_int("sample", max_key, default.1 as i64)?;
    if min <= 0 {
        return Err(invalid("sample", min_key, "must be positive"));
    }
    if max <= min {
        return Err(invalid(
            "sample",
            max_key,
            &format!("must be greater than {min_key}"),
        ));
    }
    Ok((min as u64, max as u64))
}

fn read_count(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, MarketError> {
    let value = config.get_int("sample", key, default as i64)?;
    if value < 0 {
        return Err(invalid("sample", key, "must be non-negative"));
    }
    Ok(value as usize)
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketConfig, MarketError> {
    let defaults = MarketConfig::default();

    let vwsp_window_minutes =
        config.get_int("market", "vwsp_window_minutes", defaults.vwsp_window_minutes)?;
    if vwsp_window_minutes <= 0 {
        return Err(invalid("market", "vwsp_window_minutes", "must be positive"));
    }
    if vwsp_window(vwsp_window_minutes).is_none() {
        return Err(invalid("market", "vwsp_window_minutes", "is too large"));
    }

    let reference_price =
        config.get_double("market", "reference_price", defaults.reference_price)?;
    if !(reference_price > 0.0) || !reference_price.is_finite() {
        return Err(invalid("market", "reference_price", "must be positive"));
    }

    let seed = match non_empty(config, "sample", "seed") {
        Some(raw) => Some(
            raw.parse::<u64>()
                .map_err(|_| invalid("sample", "seed", "must be an unsigned integer"))?,
        ),
        None => None,
    };

    let sample = SampleConfig {
        seed,
        buy_trades: read_count(config, "buy_trades", defaults.sample.buy_trades)?,
        sell_trades: read_count(config, "sell_trades", defaults.sample.sell_trades)?,
        buy_quantity: read_range(
            config,
            "buy_quantity_min",
            "buy_quantity_max",
            defaults.sample.buy_quantity,
        )?,
        sell_quantity: read_range(
            config,
            "sell_quantity_min",
            "sell_quantity_max",
            defaults.sample.sell_quantity,
        )?,
        price: read_range(config, "price_min", "price_max", defaults.sample.price)?,
    };

    Ok(MarketConfig {
        vwsp_window_minutes,
        reference_price,
        stocks_file: non_empty(config, "market", "stocks_file"),
        trades_csv: non_empty(config, "report", "trades_csv"),
        sample,
    })
}
