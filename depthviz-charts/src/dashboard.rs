//! Combined two-panel dashboard
//!
//! Top row (70 %): the ratio chart with hover layer, levels and
//! aggressive buy/sell markers. Bottom row (30 %): the order book depth chart on its own
//! price axis. Rows are separated by 5 % of the paper height.

use crate::depth_chart::{add_depth_traces, spread_ratio_text};
use crate::figure::{
    Annotation, Axes, Axis, Figure, Font, HoverLabel, Layout, Legend, Margin, Title,
};
use crate::overlays::add_aggressor_markers;
use crate::ratio_chart::{add_level_lines, add_ratio_traces, ratio_series_name};
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use depthviz_core::config::ChartConfig;
use depthviz_core::data::MarketTables;
use depthviz_core::orderbook::OrderBookSnapshot;
use depthviz_core::DepthError;
use tracing::{debug, warn};

/// Relative heights of the two rows
pub const ROW_HEIGHTS: [f64; 2] = [0.70, 0.30];
pub const VERTICAL_SPACING: f64 = 0.05;

const GRID_COLOR: &str = "rgba(128, 128, 128, 0.2)";

/// Paper y-domains of the top and bottom rows
pub fn row_domains() -> ([f64; 2], [f64; 2]) {
    let usable = 1.0 - VERTICAL_SPACING;
    let bottom_top = usable * ROW_HEIGHTS[1];
    let top = [bottom_top + VERTICAL_SPACING, 1.0];
    let bottom = [0.0, bottom_top];
    (top, bottom)
}

/// Title with the last-update clock in the configured zone
pub fn dashboard_title(chart: &ChartConfig, now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&chart.utc_offset());
    format!(
        "<b>Altcoin Terminal</b><br><sub style=\"color:#888\">Last Update: {} {}</sub>",
        chart.timezone_label,
        local.format("%H:%M:%S")
    )
}

fn subplot_title(text: String, top_of_row: f64) -> Annotation {
    Annotation::paper(text, 0.5, top_of_row)
        .anchored("center", "bottom")
        .font(Font::sized(16))
}

/// Build the combined dashboard
///
/// `snapshot` may be absent or empty; the bottom row is then left blank.
/// `now` only feeds the title clock.
pub fn combined_figure(
    tables: &MarketTables,
    snapshot: Option<&OrderBookSnapshot>,
    chart: &ChartConfig,
    now: DateTime<Utc>,
) -> Result<Figure, DepthError> {
    let (top, bottom) = row_domains();
    let mut fig = Figure::new();

    // Top panel
    add_ratio_traces(&mut fig, tables, chart, Axes::PRIMARY, true);
    add_level_lines(
        &mut fig,
        &tables.supports,
        &tables.resistances,
        tables.liquidity.as_ref(),
        Axes::PRIMARY,
    );
    add_aggressor_markers(&mut fig, &tables.footprint, Axes::PRIMARY);

    // Bottom panel
    match snapshot.filter(|s| !s.is_empty()) {
        Some(snapshot) => {
            let stats = add_depth_traces(&mut fig, snapshot, Axes::LOWER)?;
            fig.add_annotation(
                Annotation::paper(
                    format!("{} | Symbol: {}", spread_ratio_text(&stats), snapshot.symbol),
                    0.5,
                    bottom[1] - 0.005,
                )
                .anchored("center", "top")
                .boxed(),
            );
        }
        None => warn!("No order book data, dashboard depth panel left empty"),
    }

    fig.add_annotation(subplot_title(
        format!("<b>{} + All Indicators</b>", ratio_series_name(chart)),
        top[1],
    ));
    fig.add_annotation(subplot_title(
        "<b>Real-Time Order Book Depth</b>".to_string(),
        bottom[1],
    ));

    let panel_axis = |title: &str, domain: [f64; 2], anchor: &str| Axis {
        domain: Some(domain),
        anchor: Some(anchor.to_string()),
        ..Axis::titled(title).with_grid(GRID_COLOR)
    };

    fig.layout = Layout {
        title: Some(Title::centered(dashboard_title(chart, now), 16)),
        hovermode: Some("closest".to_string()),
        autosize: Some(true),
        showlegend: Some(true),
        dragmode: Some(false),
        legend: Some(Legend {
            font: Some(Font::sized(9)),
            ..Legend::horizontal(1.01, "center", 0.5)
        }),
        margin: Some(Margin {
            l: 30,
            r: 10,
            t: 60,
            b: 30,
        }),
        font: Some(Font::sized(10)),
        hoverlabel: Some(HoverLabel {
            font: Font::sized(10),
        }),
        xaxis: Some(panel_axis("Time", [0.0, 1.0], "y").without_rangeslider()),
        yaxis: Some(panel_axis("Price", top, "x")),
        xaxis2: Some(panel_axis("Price (USD)", [0.0, 1.0], "y2")),
        yaxis2: Some(panel_axis("Cumulative Volume", bottom, "x2")),
        shapes: std::mem::take(&mut fig.layout.shapes),
        annotations: std::mem::take(&mut fig.layout.annotations),
        ..Layout::default()
    };
    Theme::from_name(&chart.template).apply(&mut fig.layout);

    debug!(
        traces = fig.data.len(),
        shapes = fig.layout.shapes.len(),
        "Built combined dashboard"
    );

    Ok(fig)
}
