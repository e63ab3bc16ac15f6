//! Orderbook Snapshot Printer
//!
//! Simple CLI tool to print an order book snapshot and its statistics to
//! the terminal. Useful for checking a snapshot before charting it.
//!
//! ## Usage
//!
//! ```bash
//! # Print top 5 levels
//! depthviz-print-orderbook --snapshot book.json
//!
//! # Print top 10 levels
//! depthviz-print-orderbook --snapshot book.json --levels 10
//!
//! # JSON output
//! depthviz-print-orderbook --snapshot book.json --format json
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use depthviz_bins::common::{setup, CommonArgs};
use depthviz_core::data::load_snapshot;
use depthviz_core::orderbook::{compute_statistics_with, BookStatistics, OrderBookSnapshot, PriceLevel};
use serde_json::json;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pretty,
    Compact,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "depthviz-print-orderbook")]
#[command(about = "Print order book snapshot", long_about = None)]
struct Args {
    /// Order book snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Number of levels to display
    #[arg(short, long, default_value = "5")]
    levels: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: Format,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = setup(&args.common)?;

    let snapshot = load_snapshot(&args.snapshot)?;
    let stats = compute_statistics_with(&snapshot, &config.imbalance.thresholds())?;

    match args.format {
        Format::Json => print_json(&snapshot, &stats, args.levels)?,
        Format::Compact => print_compact(&snapshot, &stats, args.levels),
        Format::Pretty => print_pretty(&snapshot, &stats, args.levels),
    }

    Ok(())
}

fn print_pretty(book: &OrderBookSnapshot, stats: &BookStatistics, max_levels: usize) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  {:<56}║", format!("{} ORDERBOOK", book.symbol));
    println!("╠══════════════════════════════════════════════════════════╣");
    println!(
        "║  {:<56}║",
        format!("Depth: {}x{}", book.bids.len(), book.asks.len())
    );
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let shown = |levels: &[PriceLevel]| -> f64 {
        levels
            .iter()
            .take(max_levels)
            .map(|l| l.quantity)
            .fold(0.0, f64::max)
    };
    let max_size = shown(book.bids.as_slice()).max(shown(book.asks.as_slice()));

    // Asks (reverse order - highest first)
    println!("         ASKS        SIZE       BAR");
    println!("    ════════════════════════════════════════");
    for level in book.asks.iter().take(max_levels).rev() {
        let bar = create_ascii_bar(level.quantity, max_size, 15);
        println!("    {:>10.2}   {:>6.3}  {}", level.price, level.quantity, bar);
    }

    println!();
    println!("    ─────────────────────────────────────────");
    println!(
        "     MID: ${:.2}  │  Spread: ${:.2} ({:.3}%)",
        stats.mid_price, stats.spread, stats.spread_pct
    );
    println!("    ─────────────────────────────────────────");
    println!();

    // Bids
    println!("         BIDS        SIZE       BAR");
    println!("    ════════════════════════════════════════");
    for level in book.bids.iter().take(max_levels) {
        let bar = create_ascii_bar(level.quantity, max_size, 15);
        println!("    {:>10.2}   {:>6.3}  {}", level.price, level.quantity, bar);
    }

    println!();
    println!(
        "Bid Vol: {:.2}  Ask Vol: {:.2}  Ratio: {:.2}",
        stats.bid_volume, stats.ask_volume, stats.volume_ratio
    );
    println!(
        "Imbalance: {:+.2} ({})",
        stats.imbalance, stats.imbalance_label
    );
    if stats.is_degenerate() {
        println!("Missing sides: {:?}", stats.missing_sides);
    }
    println!();
}

fn print_compact(book: &OrderBookSnapshot, stats: &BookStatistics, max_levels: usize) {
    println!(
        "{}  Mid: ${:.2}  Spread: ${:.2}  Depth: {}x{}  {}",
        book.symbol,
        stats.mid_price,
        stats.spread,
        book.bids.len(),
        book.asks.len(),
        stats.imbalance_label
    );

    for level in book.asks.iter().take(max_levels).rev() {
        println!("ASK  {:>10.2}  {:>6.3}", level.price, level.quantity);
    }

    println!("MID  {:>10.2}", stats.mid_price);

    for level in book.bids.iter().take(max_levels) {
        println!("BID  {:>10.2}  {:>6.3}", level.price, level.quantity);
    }
}

fn print_json(book: &OrderBookSnapshot, stats: &BookStatistics, max_levels: usize) -> Result<()> {
    let truncated = book.truncated(max_levels);

    let output = json!({
        "symbol": book.symbol,
        "bids": truncated.bids,
        "asks": truncated.asks,
        "statistics": stats,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn create_ascii_bar(size: f64, max_size: f64, width: usize) -> String {
    if max_size <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((size / max_size) * width as f64) as usize;
    let filled = filled.min(width);

    "█".repeat(filled) + &"░".repeat(width - filled)
}
