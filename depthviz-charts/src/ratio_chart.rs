//! Altcoin ratio chart
//!
//! BTC candles in muted gray behind the yellow ratio candles, the three
//! moving averages, and the support/resistance and BSL/SSL lines.

use crate::figure::{
    Axes, Axis, CandleStyle, Candlestick, Figure, LabelPosition, Layout, Legend, Line, Marker,
    Scatter, Title, XData,
};
use crate::theme::Theme;
use depthviz_core::config::ChartConfig;
use depthviz_core::data::{Candle, LevelRow, LiquidityLevels, MarketTables, RatioCandle};
use tracing::debug;

/// Legend name of the ratio series, e.g. `Alt Ratio [15M]`
pub fn ratio_series_name(chart: &ChartConfig) -> String {
    format!("Alt Ratio [{}M]", chart.candle_minutes)
}

pub fn btc_candles(btc: &[Candle]) -> Candlestick {
    Candlestick {
        x: XData::dates(btc.iter().map(|c| &c.datetime)),
        open: btc.iter().map(|c| c.open).collect(),
        high: btc.iter().map(|c| c.high).collect(),
        low: btc.iter().map(|c| c.low).collect(),
        close: btc.iter().map(|c| c.close).collect(),
        name: "BTC/USDT".to_string(),
        increasing: CandleStyle::new("rgba(150, 150, 150, 0.3)", "rgba(150, 150, 150, 0.2)"),
        decreasing: CandleStyle::new("rgba(100, 100, 100, 0.3)", "rgba(100, 100, 100, 0.2)"),
        showlegend: true,
        hoverinfo: None,
        xaxis: None,
        yaxis: None,
    }
}

pub fn ratio_candles(ratio: &[RatioCandle], name: String) -> Candlestick {
    Candlestick {
        x: XData::dates(ratio.iter().map(|c| &c.datetime)),
        open: ratio.iter().map(|c| c.ar_open).collect(),
        high: ratio.iter().map(|c| c.ar_high).collect(),
        low: ratio.iter().map(|c| c.ar_low).collect(),
        close: ratio.iter().map(|c| c.ar_close).collect(),
        name,
        increasing: CandleStyle::new("rgba(255, 204, 0, 0.6)", "rgba(255, 204, 0, 0.4)"),
        decreasing: CandleStyle::new("rgba(255, 204, 0, 0.8)", "rgba(255, 204, 0, 0.6)"),
        showlegend: true,
        hoverinfo: None,
        xaxis: None,
        yaxis: None,
    }
}

/// Invisible markers on the ratio closes carrying the full hover text
///
/// `customdata` columns: sma20, ema21, sma50, open, high, low, close.
/// Missing indicator values show as 0.
pub fn ratio_hover_scatter(ratio: &[RatioCandle], series_name: &str) -> Scatter {
    let mut scatter = Scatter::dense(
        "",
        XData::dates(ratio.iter().map(|c| &c.datetime)),
        ratio.iter().map(|c| c.ar_close),
    )
    .markers(Marker {
        size: Some(0.1),
        opacity: Some(0.0),
        ..Marker::default()
    })
    .hover(format!(
        "<b>%{{x}}</b><br><br>\
         <b>SMA 20</b><br>%{{customdata[0]:,.3f}}<br><br>\
         <b>EMA 21</b><br>%{{customdata[1]:,.3f}}<br><br>\
         <b>SMA 50</b><br>%{{customdata[2]:,.3f}}<br><br>\
         <b>{}</b><br>\
         Open: %{{customdata[3]:,.2f}}<br>\
         High: %{{customdata[4]:,.2f}}<br>\
         Low: %{{customdata[5]:,.2f}}<br>\
         Close: %{{customdata[6]:,.2f}}\
         <extra></extra>",
        series_name
    ));

    scatter.customdata = Some(
        ratio
            .iter()
            .map(|c| {
                vec![
                    c.sma20.unwrap_or(0.0),
                    c.ema21.unwrap_or(0.0),
                    c.sma50.unwrap_or(0.0),
                    c.ar_open,
                    c.ar_high,
                    c.ar_low,
                    c.ar_close,
                ]
            })
            .collect(),
    );
    scatter.showlegend = Some(false);
    scatter
}

fn indicator(ratio: &[RatioCandle], name: &str, pick: fn(&RatioCandle) -> Option<f64>) -> Scatter {
    Scatter::new(
        name,
        XData::dates(ratio.iter().map(|c| &c.datetime)),
        ratio.iter().map(pick).collect(),
    )
}

/// Candles, optional hover layer and moving averages for the ratio panel
pub fn add_ratio_traces(
    fig: &mut Figure,
    tables: &MarketTables,
    chart: &ChartConfig,
    axes: Axes,
    hover_layer: bool,
) {
    let series_name = ratio_series_name(chart);

    fig.add_trace(btc_candles(&tables.btc).on(axes));

    let mut candles = ratio_candles(&tables.ratio, series_name.clone());
    if hover_layer {
        // The hover scatter below replaces the candle tooltip
        candles.hoverinfo = Some("skip".to_string());
    }
    fig.add_trace(candles.on(axes));

    if hover_layer {
        fig.add_trace(ratio_hover_scatter(&tables.ratio, &series_name).on(axes));
    }

    fig.add_trace(
        indicator(&tables.ratio, "SMA 50", |c| c.sma50)
            .line(Line::solid("orange", 2.0))
            .on(axes),
    );
    fig.add_trace(
        indicator(&tables.ratio, "EMA 21", |c| c.ema21)
            .line(Line::solid("blue", 2.0))
            .on(axes),
    );
    // Filled down to the EMA 21 trace added just before
    fig.add_trace(
        indicator(&tables.ratio, "SMA 20", |c| c.sma20)
            .line(Line::solid("green", 2.0))
            .fill("tonexty", "rgba(0, 255, 255, 0.15)")
            .on(axes),
    );
}

/// Support `S1..`, resistance `R1..` and BSL/SSL lines
pub fn add_level_lines(
    fig: &mut Figure,
    supports: &[LevelRow],
    resistances: &[LevelRow],
    liquidity: Option<&LiquidityLevels>,
    axes: Axes,
) {
    for (i, level) in supports.iter().enumerate() {
        fig.add_hline(
            level.price,
            Line::solid("lime", 2.0),
            &format!("S{}", i + 1),
            LabelPosition::Right,
            axes,
        );
    }

    for (i, level) in resistances.iter().enumerate() {
        fig.add_hline(
            level.price,
            Line::solid("red", 2.0),
            &format!("R{}", i + 1),
            LabelPosition::Right,
            axes,
        );
    }

    if let Some(liquidity) = liquidity {
        if let Some(bsl) = liquidity.bsl {
            fig.add_hline(bsl, Line::dashed("green", 2.0), "BSL", LabelPosition::Left, axes);
        }
        if let Some(ssl) = liquidity.ssl {
            fig.add_hline(ssl, Line::dashed("red", 2.0), "SSL", LabelPosition::Left, axes);
        }
    }
}

/// Build the standalone altcoin ratio chart
pub fn altcoin_ratio_figure(tables: &MarketTables, chart: &ChartConfig) -> Figure {
    let mut fig = Figure::new();

    add_ratio_traces(&mut fig, tables, chart, Axes::PRIMARY, false);
    add_level_lines(
        &mut fig,
        &tables.supports,
        &tables.resistances,
        tables.liquidity.as_ref(),
        Axes::PRIMARY,
    );

    fig.layout = Layout {
        title: Some(Title::centered(
            format!(
                "<b>Altcoin Ratio [{}M] + BSL/SSL + Auto S/R</b>",
                chart.candle_minutes
            ),
            20,
        )),
        hovermode: Some("x unified".to_string()),
        width: Some(chart.ratio_width),
        height: Some(chart.ratio_height),
        showlegend: Some(true),
        legend: Some(Legend::horizontal(1.02, "right", 1.0)),
        xaxis: Some(Axis::titled("Time").without_rangeslider()),
        yaxis: Some(Axis::titled("Price")),
        shapes: std::mem::take(&mut fig.layout.shapes),
        annotations: std::mem::take(&mut fig.layout.annotations),
        ..Layout::default()
    };
    Theme::from_name(&chart.template).apply(&mut fig.layout);

    debug!(
        bars = tables.ratio.len(),
        supports = tables.supports.len(),
        resistances = tables.resistances.len(),
        "Built altcoin ratio chart"
    );

    fig
}
