//! Global Beverage Corporation Exchange sample data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SampleConfig;
use super::error::MarketError;
use super::operations::StockOperations;
use super::stock::{Stock, StockType};
use super::trade::TradeSide;

/// The five GBCE stocks: TEA, POP, ALE, GIN, JOE.
pub fn gbce_stocks() -> Vec<Stock> {
    // (symbol, type, last dividend, fixed dividend, par value)
    let rows: [(&str, StockType, f64, Option<f64>, f64); 5] = [
        ("TEA", StockType::Common, 0.0, None, 100.0),
        ("POP", StockType::Common, 8.0, None, 100.0),
        ("ALE", StockType::Common, 23.0, None, 60.0),
        ("GIN", StockType::Preferred, 8.0, Some(0.02), 100.0),
        ("JOE", StockType::Common, 13.0, None, 250.0),
    ];
    rows.into_iter()
        .filter_map(|(symbol, stock_type, last, fixed, par)| {
            Stock::new(symbol, stock_type, last, fixed, par).ok()
        })
        .collect()
}

pub fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Record a batch of random buys followed by random sells for one stock.
pub fn load_sample_trades<R: Rng>(
    ops: &StockOperations<'_>,
    config: &SampleConfig,
    rng: &mut R,
) -> Result<usize, MarketError> {
    let (price_lo, price_hi) = config.price;

    let (qty_lo, qty_hi) = config.buy_quantity;
    for _ in 0..config.buy_trades {
        let quantity = rng.gen_range(qty_lo..qty_hi);
        let price = rng.gen_range(price_lo..price_hi) as f64;
        ops.record_trade(quantity, TradeSide::Buy, price)?;
    }

    let (qty_lo, qty_hi) = config.sell_quantity;
    for _ in 0..config.sell_trades {
        let quantity = rng.gen_range(qty_lo..qty_hi);
        let price = rng.gen_range(price_lo..price_hi) as f64;
        ops.record_trade(quantity, TradeSide::Sell, price)?;
    }

    let recorded = config.buy_trades + config.sell_trades;
    tracing::info!(symbol = ops.stock().symbol(), recorded, "sample trades loaded");
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::TradeLedger;

    #[test]
    fn gbce_universe() {
        let stocks = gbce_stocks();
        let symbols: Vec<_> = stocks.iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["TEA", "POP", "ALE", "GIN", "JOE"]);

        let gin = &stocks[3];
        assert_eq!(gin.stock_type(), StockType::Preferred);
        assert_eq!(gin.fixed_dividend(), Some(0.02));
        assert_eq!(gin.par_value(), 100.0);
        assert_eq!(stocks[2].last_dividend(), 23.0);
        assert_eq!(stocks[2].par_value(), 60.0);
    }

    #[test]
    fn load_sample_trades_respects_ranges() {
        let ledger = TradeLedger::with_system_clock();
        let stock = &gbce_stocks()[1];
        let ops = StockOperations::new(stock, &ledger);
        let config = SampleConfig::default();
        let mut rng = sample_rng(Some(42));

        let recorded = load_sample_trades(&ops, &config, &mut rng).unwrap();
        assert_eq!(recorded, 8);

        let records = ledger.records();
        assert_eq!(records.len(), 8);
        for record in &records[..4] {
            assert_eq!(record.side, TradeSide::Buy);
            assert!((10..25).contains(&record.quantity));
        }
        for record in &records[4..] {
            assert_eq!(record.side, TradeSide::Sell);
            assert!((5..10).contains(&record.quantity));
        }
        for record in &records {
            assert_eq!(record.stock_symbol, "POP");
            assert!(record.traded_price >= 250.0 && record.traded_price < 350.0);
            assert_eq!(record.traded_price.fract(), 0.0);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let stock = &gbce_stocks()[0];
        let config = SampleConfig::default();

        let run = || {
            let ledger = TradeLedger::with_system_clock();
            let ops = StockOperations::new(stock, &ledger);
            load_sample_trades(&ops, &config, &mut sample_rng(Some(9))).unwrap();
            ledger
                .records()
                .into_iter()
                .map(|r| (r.quantity, r.traded_price))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn zero_counts_record_nothing() {
        let ledger = TradeLedger::with_system_clock();
        let stock = &gbce_stocks()[0];
        let ops = StockOperations::new(stock, &ledger);
        let config = SampleConfig {
            buy_trades: 0,
            sell_trades: 0,
            ..SampleConfig::default()
        };
        assert_eq!(load_sample_trades(&ops, &config, &mut sample_rng(Some(1))).unwrap(), 0);
        assert!(ledger.is_empty());
    }
}
