//! Overlays drawn on top of an existing figure

use crate::figure::{
    shift_minutes, Annotation, Axes, Coord, Figure, Font, Line, Marker, Scatter, Shape, XData,
};
use chrono::{DateTime, Utc};
use depthviz_core::config::ChartConfig;
use depthviz_core::data::{FootprintBar, OrderFlowRow};
use depthviz_core::orderbook::BookStatistics;
use tracing::{debug, warn};

const BUY_BAR_COLOR: &str = "rgba(0, 255, 187, 0.7)";
const SELL_BAR_COLOR: &str = "rgba(255, 17, 0, 0.7)";

/// Vertical anchor of the stats box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPosition {
    Top,
    #[default]
    Bottom,
}

fn footprint_markers(name: &str, bars: &[&FootprintBar], y: fn(&FootprintBar) -> f64, color: &str, edge: &str) -> Scatter {
    Scatter::dense(
        name,
        XData::dates(bars.iter().map(|b| &b.datetime)),
        bars.iter().map(|b| y(b)),
    )
    .markers(Marker {
        symbol: Some("circle".to_string()),
        size: Some(8.0),
        color: Some(color.to_string()),
        line: Some(Line::solid(edge, 1.0)),
        ..Marker::default()
    })
    .hover(format!("<b>{}</b><br>Price: %{{y:.2f}}<extra></extra>", name))
}

/// Aggressive buy/sell circles only
///
/// Buys sit at the bar low, sells at the bar high. Returns the number of
/// buy and sell markers drawn.
pub fn add_aggressor_markers(fig: &mut Figure, bars: &[FootprintBar], axes: Axes) -> (usize, usize) {
    let buys: Vec<&FootprintBar> = bars.iter().filter(|b| b.is_aggressive_buy).collect();
    if !buys.is_empty() {
        fig.add_trace(footprint_markers("Aggressive Buy", &buys, |b| b.low, "lime", "darkgreen").on(axes));
    }

    let sells: Vec<&FootprintBar> = bars.iter().filter(|b| b.is_aggressive_sell).collect();
    if !sells.is_empty() {
        fig.add_trace(footprint_markers("Aggressive Sell", &sells, |b| b.high, "red", "darkred").on(axes));
    }

    (buys.len(), sells.len())
}

/// Aggressor markers plus trap zones
///
/// A trap is a yellow box spanning half a candle either side of the bar
/// with a warning glyph on top.
pub fn add_footprint_markers(fig: &mut Figure, bars: &[FootprintBar], chart: &ChartConfig, axes: Axes) {
    if bars.is_empty() {
        return;
    }

    let (buys, sells) = add_aggressor_markers(fig, bars, axes);

    let half_candle = chart.candle_minutes as f64 / 2.0;
    let mut traps = 0;
    for trap in bars.iter().filter(|b| b.is_trap) {
        let (Some(x0), Some(x1)) = (
            shift_minutes(&trap.datetime, -half_candle),
            shift_minutes(&trap.datetime, half_candle),
        ) else {
            warn!(datetime = %trap.datetime, "Trap zone outside representable time range, skipped");
            continue;
        };
        fig.add_shape(
            Shape::rect(axes, Coord::from(&x0), Coord::from(&x1), trap.low, trap.high)
                .styled(Line::solid("yellow", 2.0), "rgba(255, 255, 0, 0.3)"),
        );

        let mut warning = Annotation::at(
            "⚠",
            axes,
            Coord::from(&trap.datetime),
            Coord::Num(trap.high),
        )
        .font(Font {
            size: Some(16),
            color: Some("yellow".to_string()),
        });
        warning.bgcolor = Some("rgba(0, 0, 0, 0.5)".to_string());
        fig.add_annotation(warning);
        traps += 1;
    }

    debug!(
        buys,
        sells,
        traps,
        "Added footprint markers"
    );
}

/// Horizontal volume bars to the right of `current_time`
///
/// Bar length is `volume / max_volume * profile_scale` candles. Buy bars
/// start `profile_offset` candles after `current_time`; sell bars start a
/// further `profile_scale + 2` candles out so the two columns never overlap.
/// Nothing is drawn for an empty profile or one with no volume. Bars that
/// would end outside the representable time range are skipped.
pub fn add_order_flow_profile(
    fig: &mut Figure,
    rows: &[OrderFlowRow],
    current_time: DateTime<Utc>,
    chart: &ChartConfig,
    axes: Axes,
) {
    let max_volume = rows
        .iter()
        .flat_map(|r| [r.buy_volume, r.sell_volume])
        .fold(0.0_f64, f64::max);

    if rows.is_empty() || max_volume <= 0.0 {
        return;
    }

    let candle = chart.candle_minutes as f64;
    let scale = chart.profile_scale;
    let buy_start = chart.profile_offset * candle;
    let sell_start = buy_start + (scale + 2.0) * candle;

    let mut skipped = 0;
    let mut bar = |start: f64, volume: f64, row: &OrderFlowRow, color: &str| {
        let width = volume / max_volume * scale * candle;
        let (Some(x0), Some(x1)) = (
            shift_minutes(&current_time, start),
            shift_minutes(&current_time, start + width),
        ) else {
            skipped += 1;
            return;
        };
        fig.add_shape(
            Shape::rect(axes, Coord::from(&x0), Coord::from(&x1), row.price_bottom, row.price_top)
                .styled(Line::solid(color, 1.0), color),
        );
    };

    for row in rows.iter().filter(|r| r.buy_volume > 0.0) {
        bar(buy_start, row.buy_volume, row, BUY_BAR_COLOR);
    }
    for row in rows.iter().filter(|r| r.sell_volume > 0.0) {
        bar(sell_start, row.sell_volume, row, SELL_BAR_COLOR);
    }

    if skipped > 0 {
        warn!(skipped, "Order flow bars outside representable time range, skipped");
    }
}

/// Stats box text for one book
pub fn orderbook_stats_text(stats: &BookStatistics) -> String {
    format!(
        "<b>Order Book (Live)</b><br>\
         Spread: ${:.2} ({:.3}%)<br>\
         Bid Vol: {:.2}<br>\
         Ask Vol: {:.2}<br>\
         Ratio: {:.2}<br>\
         <b>Imbalance: {}</b>",
        stats.spread,
        stats.spread_pct,
        stats.bid_volume,
        stats.ask_volume,
        stats.volume_ratio,
        stats.imbalance_label
    )
}

/// Order book stats box in the left corner of the paper
pub fn add_orderbook_overlay(fig: &mut Figure, stats: &BookStatistics, position: OverlayPosition) {
    let (y, yanchor) = match position {
        OverlayPosition::Bottom => (0.02, "bottom"),
        OverlayPosition::Top => (0.98, "top"),
    };

    fig.add_annotation(
        Annotation::paper(orderbook_stats_text(stats), 0.02, y)
            .anchored("left", yanchor)
            .boxed(),
    );
}
