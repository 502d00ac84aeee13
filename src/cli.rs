//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_report::ConsoleReportAdapter;
use crate::adapters::csv_adapter::{CsvStockAdapter, CsvTradeExporter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::{MarketConfig, build_market_config};
use crate::domain::error::MarketError;
use crate::domain::index::all_share_index;
use crate::domain::ledger::TradeLedger;
use crate::domain::operations::{Metric, StockOperations};
use crate::domain::sample::{load_sample_trades, sample_rng};
use crate::domain::trade::TradeSide;
use crate::ports::report_port::ReportPort;
use crate::ports::stock_port::{SampleStockSource, StockSource};

#[derive(Parser, Debug)]
#[command(name = "gbce", about = "Global Beverage Corporation Exchange trade ledger")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record sample trades and print yield, P/E, VWSP and the All Share Index
    Demo {
        #[arg(long)]
        seed: Option<u64>,
        /// Write the trade records to this CSV file before clearing them
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Dividend yield and P/E ratio for one stock
    Quote {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        price: Option<f64>,
    },
    /// List the stock universe
    Stocks,
}

pub fn run(cli: Cli) -> ExitCode {
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match cli.command {
        Command::Demo { seed, export } => {
            if seed.is_some() {
                config.sample.seed = seed;
            }
            if let Some(path) = export {
                config.trades_csv = Some(path.display().to_string());
            }
            run_demo(&config)
        }
        Command::Quote { symbol, price } => run_quote(&config, &symbol, price),
        Command::Stocks => run_stocks(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<MarketConfig, MarketError> {
    match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            build_market_config(&adapter)
        }
        None => build_market_config(&FileConfigAdapter::empty()),
    }
}

pub fn stock_source(config: &MarketConfig) -> Box<dyn StockSource> {
    match &config.stocks_file {
        Some(path) => Box::new(CsvStockAdapter::new(PathBuf::from(path))),
        None => Box::new(SampleStockSource),
    }
}

/// Results of one sample session, in the order they are printed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub dividend_yield: Metric,
    pub pe_ratio: Metric,
    /// `None` when the stock had no trades inside the window.
    pub vwsp: Vec<(String, Option<f64>)>,
    pub trades_recorded: usize,
    pub all_share_index: f64,
}

/// The sample session against a caller-owned ledger. The ledger is cleared
/// before returning, whether or not the session succeeds.
pub fn run_session(
    config: &MarketConfig,
    stocks: &dyn StockSource,
    ledger: &TradeLedger,
    report: &dyn ReportPort,
    export: Option<&dyn ReportPort>,
) -> Result<SessionSummary, MarketError> {
    let result = session_steps(config, stocks, ledger, report, export);
    println!();
    println!("Cleaning up Trade records ...");
    ledger.clear();
    result
}

fn session_steps(
    config: &MarketConfig,
    stocks: &dyn StockSource,
    ledger: &TradeLedger,
    report: &dyn ReportPort,
    export: Option<&dyn ReportPort>,
) -> Result<SessionSummary, MarketError> {
    let universe = stocks.load_stocks()?;
    let price = config.reference_price;

    // Stage 1: quote POP at the reference price and record one trade
    let pop = stocks.find_stock("POP")?;
    let pop_ops =
        StockOperations::new(&pop, ledger).with_window_minutes(config.vwsp_window_minutes)?;
    let dividend_yield = pop_ops.dividend_yield(price);
    let pe_ratio = pop_ops.pe_ratio(price);
    println!("The dividend yield for POP stock is {dividend_yield}");
    println!("The PE Ratio for POP stock is {pe_ratio}");

    pop_ops.record_trade(4, TradeSide::Buy, 250.0)?;
    report.write_trades(&ledger.records())?;

    // Stage 2: sample trades for every stock
    println!("Loading up sample trading data in memory ...");
    let mut rng = sample_rng(config.sample.seed);
    let handles = universe
        .iter()
        .map(|stock| {
            StockOperations::new(stock, ledger).with_window_minutes(config.vwsp_window_minutes)
        })
        .collect::<Result<Vec<_>, _>>()?;
    for ops in &handles {
        load_sample_trades(ops, &config.sample, &mut rng)?;
    }
    let records = ledger.records();
    report.write_trades(&records)?;

    // Stage 3: VWSP per stock over the trailing window
    let mut vwsp = Vec::with_capacity(handles.len());
    for ops in &handles {
        let symbol = ops.stock().symbol().to_string();
        match ops.volume_weighted_stock_price() {
            Ok(value) => {
                println!("Volume Weighted Stock Price for {symbol} stock = {value:.2}");
                vwsp.push((symbol, Some(value)));
            }
            Err(MarketError::EmptyWindow { .. }) => {
                println!("Volume Weighted Stock Price for {symbol} stock = N/A");
                vwsp.push((symbol, None));
            }
            Err(e) => return Err(e),
        }
    }
    println!();

    // Stage 4: All Share Index over every recorded price
    let index = all_share_index(ledger)?;
    println!("The GBCE All Share Index is {index:.4}");

    if let Some(export) = export {
        export.write_trades(&records)?;
    }

    Ok(SessionSummary {
        dividend_yield,
        pe_ratio,
        vwsp,
        trades_recorded: records.len(),
        all_share_index: index,
    })
}

fn run_demo(config: &MarketConfig) -> Result<(), MarketError> {
    let ledger = TradeLedger::with_system_clock();
    let stocks = stock_source(config);
    let exporter = config
        .trades_csv
        .as_ref()
        .map(|path| CsvTradeExporter::new(PathBuf::from(path)));

    run_session(
        config,
        stocks.as_ref(),
        &ledger,
        &ConsoleReportAdapter,
        exporter.as_ref().map(|e| e as &dyn ReportPort),
    )?;

    if let Some(path) = &config.trades_csv {
        eprintln!("Trade records written to: {path}");
    }
    Ok(())
}

/// Applicable dividend, yield and P/E for one stock at `price`.
pub fn quote(
    stocks: &dyn StockSource,
    symbol: &str,
    price: f64,
) -> Result<(f64, Metric, Metric), MarketError> {
    let stock = stocks.find_stock(symbol)?;
    let ledger = TradeLedger::with_system_clock();
    let ops = StockOperations::new(&stock, &ledger);
    Ok((ops.applicable_dividend(), ops.dividend_yield(price), ops.pe_ratio(price)))
}

fn run_quote(config: &MarketConfig, symbol: &str, price: Option<f64>) -> Result<(), MarketError> {
    let price = price.unwrap_or(config.reference_price);
    let stocks = stock_source(config);
    let (dividend, dividend_yield, pe_ratio) = quote(stocks.as_ref(), symbol, price)?;

    println!("Stock:               {}", symbol.trim().to_uppercase());
    println!("Price:               {price:.2}");
    println!("Applicable dividend: {dividend:.2}");
    println!("Dividend yield:      {dividend_yield:.4}");
    println!("P/E ratio:           {pe_ratio:.2}");
    Ok(())
}

fn run_stocks(config: &MarketConfig) -> Result<(), MarketError> {
    let stocks = stock_source(config).load_stocks()?;
    println!(
        "{:<6} {:<10} {:>13} {:>14} {:>9}",
        "Symbol", "Type", "Last Dividend", "Fixed Dividend", "Par Value"
    );
    for stock in &stocks {
        let fixed = stock
            .fixed_dividend()
            .map(|rate| format!("{:.0}%", rate * 100.0))
            .unwrap_or_default();
        println!(
            "{:<6} {:<10} {:>13} {:>14} {:>9}",
            stock.symbol(),
            stock.stock_type(),
            stock.last_dividend(),
            fixed,
            stock.par_value()
        );
    }
    eprintln!("{} stocks", stocks.len());
    Ok(())
}
