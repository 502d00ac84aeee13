//! Plain-text trade table for the terminal.

use crate::domain::error::MarketError;
use crate::domain::trade::TradeRecord;
use crate::ports::report_port::ReportPort;
use std::io::{self, Write};

const RULE_WIDTH: usize = 76;

/// Render records as a fixed-width table, in ledger order.
pub fn format_trade_table(records: &[TradeRecord]) -> String {
    if records.is_empty() {
        return "(no trade records)\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<6} {:>8} {:>12} {:>14} {:>4}  {:<19}\n",
        "#", "Stock", "Qty", "Price", "Total", "B/S", "Timestamp"
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:<6} {:>8} {:>12.2} {:>14.2} {:>4}  {}\n",
            i,
            record.stock_symbol,
            record.quantity,
            record.traded_price,
            record.total_value,
            record.side,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        ));
    }
    output
}

/// Writes the table to stdout between banner rules.
pub struct ConsoleReportAdapter;

impl ReportPort for ConsoleReportAdapter {
    fn write_trades(&self, records: &[TradeRecord]) -> Result<(), MarketError> {
        let rule = "=".repeat(RULE_WIDTH);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out)?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Showing Trade Records ...")?;
        writeln!(out, "{rule}")?;
        write!(out, "{}", format_trade_table(records))?;
        writeln!(out)?;
        Ok(())
    }
}
