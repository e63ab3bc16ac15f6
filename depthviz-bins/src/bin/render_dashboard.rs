//! Altcoin Ratio Dashboard
//!
//! Loads the market tables from a directory and writes either the combined
//! ratio + depth dashboard or the ratio chart alone.
//!
//! ```bash
//! depthviz-dashboard --data-dir tables/ --output altcoin_combined.html
//! depthviz-dashboard --data-dir tables/ --ratio-only
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use depthviz_bins::common::{resolve_output, setup, CommonArgs};
use depthviz_charts::{
    add_footprint_markers, add_order_flow_profile, add_orderbook_overlay, altcoin_ratio_figure,
    combined_figure, sr_table_text, Axes, HtmlExporter, OverlayPosition, PlotConfig,
};
use depthviz_core::data::{load_snapshot, MarketTables};
use depthviz_core::orderbook::compute_statistics_with;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depthviz-dashboard", about = "Render the altcoin ratio dashboard", long_about = None)]
struct Args {
    /// Directory holding ratio.json and the optional tables
    #[arg(short, long)]
    data_dir: PathBuf,

    /// Output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Order book snapshot, overrides orderbook.json in the data dir
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Only the ratio chart, with footprints, trap zones, the order flow
    /// profile and an order book stats box when a book is available
    #[arg(long)]
    ratio_only: bool,

    /// Skip the support/resistance summary on stdout
    #[arg(long)]
    quiet: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = setup(&args.common)?;

    let mut tables = MarketTables::load_dir(&args.data_dir)
        .with_context(|| format!("Failed to load tables from {}", args.data_dir.display()))?;
    if let Some(path) = &args.snapshot {
        tables.orderbook = Some(load_snapshot(path)?);
    }

    if !args.quiet {
        println!("{}", sr_table_text(&tables.supports, &tables.resistances));
    }

    let exporter = HtmlExporter::from_config(&config.chart)?;

    let (figure, plot_config, output) = if args.ratio_only {
        let mut figure = altcoin_ratio_figure(&tables, &config.chart);
        add_footprint_markers(&mut figure, &tables.footprint, &config.chart, Axes::PRIMARY);
        if let Some(last) = tables.last_time() {
            add_order_flow_profile(&mut figure, &tables.profile, last, &config.chart, Axes::PRIMARY);
        }
        if let Some(book) = tables.orderbook.as_ref().filter(|b| !b.is_empty()) {
            let stats = compute_statistics_with(book, &config.imbalance.thresholds())?;
            add_orderbook_overlay(&mut figure, &stats, OverlayPosition::Top);
        }
        let output = resolve_output(&config, args.output.as_deref(), "altcoin_ratio.html");
        (figure, PlotConfig::ratio(&config.chart), output)
    } else {
        let figure = combined_figure(&tables, tables.orderbook.as_ref(), &config.chart, Utc::now())?;
        let output = resolve_output(&config, args.output.as_deref(), "altcoin_combined.html");
        (figure, PlotConfig::dashboard(), output)
    };

    exporter
        .write(&figure, &plot_config, &output)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    println!("\n✓ Dashboard saved to: {}", output.display());
    Ok(())
}
