//! Order book depth chart
//!
//! Cumulative bid (green) and ask (red) areas, dashed markers at the touch,
//! and a title carrying the spread and bid/ask ratio.

use crate::figure::{Axes, Axis, Figure, Layout, Legend, Line, Scatter, Title, XData};
use crate::theme::Theme;
use depthviz_core::config::ChartConfig;
use depthviz_core::orderbook::{compute_statistics, BookStatistics, DepthCurve, OrderBookSnapshot};
use depthviz_core::DepthError;
use tracing::{debug, warn};

pub const BID_HOVER: &str = "<b>Bid</b><br>Price: $%{x:.2f}<br>Cumulative: %{y:.2f}<extra></extra>";
pub const ASK_HOVER: &str = "<b>Ask</b><br>Price: $%{x:.2f}<br>Cumulative: %{y:.2f}<extra></extra>";

fn depth_trace(name: &str, curve: &DepthCurve) -> Scatter {
    Scatter::dense(name, XData::Numbers(curve.prices()), curve.cumulative())
}

/// Add both depth areas and the best bid / best ask markers to `axes`
///
/// Returns the book statistics so callers can label the panel.
pub fn add_depth_traces(
    fig: &mut Figure,
    snapshot: &OrderBookSnapshot,
    axes: Axes,
) -> Result<BookStatistics, DepthError> {
    let (bids, asks) = snapshot.depth_curves()?;
    let stats = compute_statistics(snapshot)?;

    fig.add_trace(
        depth_trace("Bid Depth", &bids)
            .fill("tozeroy", "rgba(0, 255, 0, 0.3)")
            .line(Line::solid("green", 2.0))
            .hover(BID_HOVER)
            .on(axes),
    );
    fig.add_trace(
        depth_trace("Ask Depth", &asks)
            .fill("tozeroy", "rgba(255, 0, 0, 0.3)")
            .line(Line::solid("red", 2.0))
            .hover(ASK_HOVER)
            .on(axes),
    );

    if let Some(best_bid) = snapshot.best_bid() {
        fig.add_vline(best_bid.price, Line::dashed("green", 1.0), "Best Bid", axes);
    }
    if let Some(best_ask) = snapshot.best_ask() {
        fig.add_vline(best_ask.price, Line::dashed("red", 1.0), "Best Ask", axes);
    }

    Ok(stats)
}

/// One-line summary used in titles and the dashboard annotation
pub fn spread_ratio_text(stats: &BookStatistics) -> String {
    format!(
        "Spread: ${:.2} | Bid/Ask Ratio: {:.2}",
        stats.spread, stats.volume_ratio
    )
}

/// Build the standalone depth chart
///
/// Returns `Ok(None)` when the snapshot has no levels on either side;
/// a book with one empty side still renders.
pub fn orderbook_depth_figure(
    snapshot: &OrderBookSnapshot,
    chart: &ChartConfig,
) -> Result<Option<Figure>, DepthError> {
    if snapshot.is_empty() {
        warn!(symbol = %snapshot.symbol, "No order book data available, skipping depth chart");
        return Ok(None);
    }

    let mut fig = Figure::new();
    let stats = add_depth_traces(&mut fig, snapshot, Axes::PRIMARY)?;

    if stats.is_degenerate() {
        warn!(
            symbol = %snapshot.symbol,
            missing = ?stats.missing_sides,
            "Depth chart drawn from a one-sided book"
        );
    }

    fig.layout = Layout {
        title: Some(Title::centered(
            format!(
                "<b>Real-Time Order Book Depth - {}</b><br><sub>{}</sub>",
                snapshot.symbol,
                spread_ratio_text(&stats)
            ),
            18,
        )),
        xaxis: Some(Axis::titled("Price (USD)")),
        yaxis: Some(Axis::titled("Cumulative Volume")),
        height: Some(chart.depth_height),
        showlegend: Some(true),
        hovermode: Some("x unified".to_string()),
        legend: Some(Legend::horizontal(1.02, "right", 1.0)),
        shapes: std::mem::take(&mut fig.layout.shapes),
        annotations: std::mem::take(&mut fig.layout.annotations),
        ..Layout::default()
    };
    Theme::from_name(&chart.template).apply(&mut fig.layout);

    debug!(
        symbol = %snapshot.symbol,
        bid_levels = snapshot.bids.len(),
        ask_levels = snapshot.asks.len(),
        spread = stats.spread,
        "Built depth chart"
    );

    Ok(Some(fig))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Coord, Trace};

    fn reference_book() -> OrderBookSnapshot {
        OrderBookSnapshot::from_pairs(
            "ETHUSDT",
            &[(100.0, 2.0), (99.0, 3.0)],
            &[(101.0, 1.0), (102.0, 4.0)],
        )
    }

    #[test]
    fn test_depth_figure_traces() {
        let fig = orderbook_depth_figure(&reference_book(), &ChartConfig::default())
            .unwrap()
            .unwrap();

        assert_eq!(fig.trace_names(), vec!["Bid Depth", "Ask Depth"]);
        match &fig.data[0] {
            Trace::Scatter(s) => {
                assert_eq!(s.x, XData::Numbers(vec![100.0, 99.0]));
                assert_eq!(s.y, vec![Some(2.0), Some(5.0)]);
                assert_eq!(s.fill.as_deref(), Some("tozeroy"));
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn test_depth_figure_title_and_markers() {
        let fig = orderbook_depth_figure(&reference_book(), &ChartConfig::default())
            .unwrap()
            .unwrap();

        let title = &fig.layout.title.as_ref().unwrap().text;
        assert!(title.contains("ETHUSDT"));
        assert!(title.contains("Spread: $1.00 | Bid/Ask Ratio: 1.00"));

        assert_eq!(fig.layout.shapes.len(), 2);
        assert_eq!(fig.layout.shapes[0].x0, Coord::Num(100.0));
        assert_eq!(fig.layout.shapes[1].x0, Coord::Num(101.0));
        assert_eq!(fig.layout.height, Some(600));
    }

    #[test]
    fn test_empty_book_skipped() {
        let snapshot = OrderBookSnapshot::from_pairs("ETHUSDT", &[], &[]);
        assert!(orderbook_depth_figure(&snapshot, &ChartConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_one_sided_book_renders_with_zero_spread() {
        let snapshot = OrderBookSnapshot::from_pairs("ETHUSDT", &[(100.0, 2.0)], &[]);
        let fig = orderbook_depth_figure(&snapshot, &ChartConfig::default())
            .unwrap()
            .unwrap();

        let title = &fig.layout.title.as_ref().unwrap().text;
        assert!(title.contains("Spread: $0.00 | Bid/Ask Ratio: 0.00"));
        // Only the best bid marker
        assert_eq!(fig.layout.shapes.len(), 1);
    }

    #[test]
    fn test_negative_quantity_propagates() {
        let snapshot = OrderBookSnapshot::from_pairs("ETHUSDT", &[(100.0, -2.0)], &[(101.0, 1.0)]);
        assert!(matches!(
            orderbook_depth_figure(&snapshot, &ChartConfig::default()),
            Err(DepthError::InvalidInput { .. })
        ));
    }
}
