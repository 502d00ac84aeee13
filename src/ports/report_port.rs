//! Trade report port trait.

use crate::domain::error::MarketError;
use crate::domain::trade::TradeRecord;

/// Port for rendering or exporting the trade ledger.
pub trait ReportPort {
    fn write_trades(&self, records: &[TradeRecord]) -> Result<(), MarketError>;
}
