//! Order Book Depth Chart
//!
//! Reads a `{symbol, bids, asks}` snapshot and writes the cumulative depth
//! chart as a standalone HTML page.
//!
//! ```bash
//! depthviz-depth --snapshot book.json --output orderbook_depth.html
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use depthviz_bins::common::{resolve_output, setup, CommonArgs};
use depthviz_charts::{orderbook_depth_figure, HtmlExporter, PlotConfig};
use depthviz_core::data::{load_snapshot, SnapshotValidator};
use depthviz_core::orderbook::compute_statistics_with;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depthviz-depth", about = "Render an order book depth chart", long_about = None)]
struct Args {
    /// Order book snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sort both sides and drop empty levels before charting
    #[arg(long)]
    normalize: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = setup(&args.common)?;

    let mut snapshot = load_snapshot(&args.snapshot)?;
    if args.normalize {
        snapshot = snapshot.normalized();
    }

    if let Err(e) = SnapshotValidator::new().validate(&snapshot) {
        tracing::warn!(symbol = %snapshot.symbol, "Snapshot failed validation: {}", e);
    }

    let stats = compute_statistics_with(&snapshot, &config.imbalance.thresholds())
        .with_context(|| format!("Invalid order book in {}", args.snapshot.display()))?;
    tracing::info!(
        symbol = %snapshot.symbol,
        spread = stats.spread,
        ratio = stats.volume_ratio,
        imbalance = %stats.imbalance_label,
        "Order book statistics"
    );

    let Some(figure) = orderbook_depth_figure(&snapshot, &config.chart)? else {
        println!("⚠ No order book data available");
        return Ok(());
    };

    let output = resolve_output(&config, args.output.as_deref(), "orderbook_depth.html");
    HtmlExporter::from_config(&config.chart)?
        .write(&figure, &PlotConfig::depth(&config.chart), &output)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    println!("\n✓ Order book depth chart saved to: {}", output.display());
    Ok(())
}
