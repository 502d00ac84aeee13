//! CSV adapters: stock universe input and trade ledger export.

use crate::domain::error::MarketError;
use crate::domain::stock::{Stock, StockType};
use crate::domain::trade::TradeRecord;
use crate::ports::report_port::ReportPort;
use crate::ports::stock_port::StockSource;
use chrono::SecondsFormat;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const TRADE_HEADER: [&str; 6] = [
    "stock",
    "quantity",
    "traded_price",
    "total_value",
    "side",
    "timestamp",
];

fn column<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<&'r str, MarketError> {
    record.get(idx).ok_or_else(|| MarketError::StockData {
        reason: format!("line {line}: missing {name} column"),
    })
}

fn number(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<f64, MarketError> {
    column(record, idx, name, line)?
        .parse::<f64>()
        .map_err(|e| MarketError::StockData {
            reason: format!("line {line}: invalid {name} value: {e}"),
        })
}

/// Reads `symbol,type,last_dividend,fixed_dividend,par_value` rows.
pub struct CsvStockAdapter {
    path: PathBuf,
}

impl CsvStockAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse(content: &str) -> Result<Vec<Stock>, MarketError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let line = row + 2;
            let record = result.map_err(|e| MarketError::StockData {
                reason: format!("CSV parse error: {}", e),
            })?;

            let symbol = column(&record, 0, "symbol", line)?;
            let stock_type = column(&record, 1, "type", line)?
                .parse::<StockType>()
                .map_err(|e: MarketError| MarketError::StockData {
                    reason: format!("line {line}: {e}"),
                })?;
            let last_dividend = number(&record, 2, "last_dividend", line)?;
            let fixed_dividend = if column(&record, 3, "fixed_dividend", line)?.is_empty() {
                None
            } else {
                Some(number(&record, 3, "fixed_dividend", line)?)
            };
            let par_value = number(&record, 4, "par_value", line)?;

            let stock = Stock::new(symbol, stock_type, last_dividend, fixed_dividend, par_value)
                .map_err(|e| MarketError::StockData {
                    reason: format!("line {line}: {e}"),
                })?;
            if stocks.iter().any(|s: &Stock| s.symbol() == stock.symbol()) {
                return Err(MarketError::StockData {
                    reason: format!("line {line}: duplicate symbol {}", stock.symbol()),
                });
            }
            stocks.push(stock);
        }

        Ok(stocks)
    }
}

impl StockSource for CsvStockAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, MarketError> {
        let content = fs::read_to_string(&self.path).map_err(|e| MarketError::StockData {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::parse(&content)
    }
}

/// Writes the ledger as CSV, one row per record in insertion order.
pub fn write_trades_csv<W: Write>(writer: W, records: &[TradeRecord]) -> Result<(), MarketError> {
    let report_err = |e: csv::Error| MarketError::Report {
        reason: format!("CSV write error: {}", e),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TRADE_HEADER).map_err(report_err)?;
    for record in records {
        wtr.write_record([
            record.stock_symbol.clone(),
            record.quantity.to_string(),
            record.traded_price.to_string(),
            record.total_value.to_string(),
            record.side.to_string(),
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])
        .map_err(report_err)?;
    }
    wtr.flush()?;
    Ok(())
}

pub struct CsvTradeExporter {
    path: PathBuf,
}

impl CsvTradeExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportPort for CsvTradeExporter {
    fn write_trades(&self, records: &[TradeRecord]) -> Result<(), MarketError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path).map_err(|e| MarketError::Report {
            reason: format!("failed to create {}: {}", self.path.display(), e),
        })?;
        write_trades_csv(file, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::TradeSide;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const GBCE_CSV: &str = "symbol,type,last_dividend,fixed_dividend,par_value\n\
        TEA,Common,0,,100\n\
        POP,Common,8,,100\n\
        GIN,Preferred,8,0.02,100\n";

    fn sample_record(symbol: &str, quantity: u64, price: f64) -> TradeRecord {
        TradeRecord {
            stock_symbol: symbol.to_string(),
            quantity,
            traded_price: price,
            total_value: quantity as f64 * price,
            side: TradeSide::Buy,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn parse_reads_all_rows() {
        let stocks = CsvStockAdapter::parse(GBCE_CSV).unwrap();
        assert_eq!(stocks.len(), 3);
        assert_eq!(stocks[0].symbol(), "TEA");
        assert_eq!(stocks[0].fixed_dividend(), None);
        assert_eq!(stocks[2].stock_type(), StockType::Preferred);
        assert_eq!(stocks[2].fixed_dividend(), Some(0.02));
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let err = CsvStockAdapter::parse(
            "symbol,type,last_dividend,fixed_dividend,par_value\nXYZ,Ordinary,1,,100\n",
        )
        .unwrap_err();
        assert!(matches!(err, MarketError::StockData { ref reason } if reason.contains("line 2")));
    }

    #[test]
    fn parse_rejects_bad_number() {
        let err = CsvStockAdapter::parse(
            "symbol,type,last_dividend,fixed_dividend,par_value\nXYZ,Common,lots,,100\n",
        )
        .unwrap_err();
        assert!(matches!(err, MarketError::StockData { .. }));
    }

    #[test]
    fn parse_rejects_duplicate_symbol() {
        let err = CsvStockAdapter::parse(
            "symbol,type,last_dividend,fixed_dividend,par_value\n\
             POP,Common,8,,100\npop,Common,9,,100\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MarketError::StockData { ref reason } if reason.contains("duplicate")
        ));
    }

    #[test]
    fn load_stocks_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbce.csv");
        fs::write(&path, GBCE_CSV).unwrap();

        let adapter = CsvStockAdapter::new(path);
        let pop = adapter.find_stock("POP").unwrap();
        assert_eq!(pop.last_dividend(), 8.0);
    }

    #[test]
    fn load_stocks_missing_file() {
        let adapter = CsvStockAdapter::new(PathBuf::from("/nonexistent/gbce.csv"));
        assert!(matches!(
            adapter.load_stocks(),
            Err(MarketError::StockData { .. })
        ));
    }

    #[test]
    fn write_trades_csv_output() {
        let mut buf = Vec::new();
        write_trades_csv(&mut buf, &[sample_record("POP", 4, 250.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "stock,quantity,traded_price,total_value,side,timestamp\n\
             POP,4,250,1000,B,2024-01-15T10:30:00.000Z\n"
        );
    }

    #[test]
    fn exporter_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("trades.csv");
        let exporter = CsvTradeExporter::new(path.clone());
        exporter
            .write_trades(&[sample_record("POP", 4, 250.0), sample_record("GIN", 2, 99.5)])
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(2).unwrap().starts_with("GIN,2,99.5,199,B,"));
    }
}
