//! Depthviz Charts - Plotly Figures for Order Book and Ratio Analysis
//!
//! Turns [`depthviz_core`] tables and analyzer output into Plotly figure
//! documents and writes them as standalone HTML pages. Plotly.js itself is
//! loaded by the page from its CDN; this crate only produces the JSON it
//! draws.
//!
//! ## Charts
//!
//! - [`orderbook_depth_figure`] - cumulative bid/ask depth with the touch
//!   marked and spread / bid-ask ratio in the title
//! - [`altcoin_ratio_figure`] - BTC and ratio candles, moving averages,
//!   support/resistance and BSL/SSL lines
//! - [`combined_figure`] - both of the above stacked in one page with
//!   footprint markers and the order-flow profile
//!
//! ## Example
//!
//! ```no_run
//! use depthviz_charts::{orderbook_depth_figure, HtmlExporter, PlotConfig};
//! use depthviz_core::config::ChartConfig;
//! use depthviz_core::OrderBookSnapshot;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let chart = ChartConfig::default();
//! let book = OrderBookSnapshot::from_pairs("ETHUSDT", &[(100.0, 2.0)], &[(101.0, 1.0)]);
//!
//! if let Some(fig) = orderbook_depth_figure(&book, &chart)? {
//!     HtmlExporter::from_config(&chart)?.write(&fig, &PlotConfig::depth(&chart), "depth.html")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod dashboard;
pub mod depth_chart;
pub mod figure;
pub mod html;
pub mod overlays;
pub mod ratio_chart;
pub mod sr_table;
pub mod theme;

pub use dashboard::combined_figure;
pub use depth_chart::orderbook_depth_figure;
pub use figure::{Axes, Figure, Trace};
pub use html::{ExportError, HtmlExporter, PlotConfig};
pub use overlays::{
    add_aggressor_markers, add_footprint_markers, add_order_flow_profile, add_orderbook_overlay,
    OverlayPosition,
};
pub use ratio_chart::altcoin_ratio_figure;
pub use sr_table::sr_table_text;
pub use theme::Theme;
