//! Plotly figure document
//!
//! A typed subset of the Plotly.js figure schema: the traces, layout keys,
//! shapes and annotations the depthviz charts use. Serializing a [`Figure`]
//! with serde yields the `{ "data": [...], "layout": {...} }` object that
//! `Plotly.newPlot` accepts.
//!
//! Optional keys are skipped when unset so the document stays close to what
//! Plotly would fill in by default.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Plotly date string (`yyyy-mm-dd HH:MM:SS`, UTC wall clock)
pub fn plotly_time(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shift a timestamp by fractional minutes
///
/// `None` when the shift is not finite or lands outside chrono's range.
pub fn shift_minutes(dt: &DateTime<Utc>, minutes: f64) -> Option<DateTime<Utc>> {
    let millis = (minutes * 60_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    dt.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

/// Pair of axes a trace or shape is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axes {
    pub x: &'static str,
    pub y: &'static str,
}

impl Axes {
    /// Default (top or only) panel
    pub const PRIMARY: Axes = Axes { x: "x", y: "y" };
    /// Second subplot row
    pub const LOWER: Axes = Axes { x: "x2", y: "y2" };

    fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }

    /// `xaxis`/`yaxis` trace keys; `None` on the primary axes
    fn trace_refs(&self) -> (Option<String>, Option<String>) {
        if self.is_primary() {
            (None, None)
        } else {
            (Some(self.x.to_string()), Some(self.y.to_string()))
        }
    }

    fn x_domain(&self) -> String {
        format!("{} domain", self.x)
    }

    fn y_domain(&self) -> String {
        format!("{} domain", self.y)
    }
}

/// A coordinate: data value, date string, or paper fraction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coord {
    Num(f64),
    Time(String),
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Num(v)
    }
}

impl From<&DateTime<Utc>> for Coord {
    fn from(dt: &DateTime<Utc>) -> Self {
        Coord::Time(plotly_time(dt))
    }
}

/// X values of a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XData {
    Numbers(Vec<f64>),
    Dates(Vec<String>),
}

impl XData {
    pub fn dates<'a>(times: impl IntoIterator<Item = &'a DateTime<Utc>>) -> Self {
        XData::Dates(times.into_iter().map(plotly_time).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: Some(color.to_string()),
            width: Some(width),
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: f64) -> Self {
        Self {
            dash: Some("dash".to_string()),
            ..Self::solid(color, width)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn sized(size: u32) -> Self {
        Self {
            size: Some(size),
            color: None,
        }
    }
}

/// Scatter trace (lines, filled areas, markers)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub x: XData,
    pub y: Vec<Option<f64>>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Scatter {
    pub fn new(name: impl Into<String>, x: XData, y: Vec<Option<f64>>) -> Self {
        Self {
            x,
            y,
            name: name.into(),
            mode: None,
            line: None,
            marker: None,
            fill: None,
            fillcolor: None,
            hovertemplate: None,
            customdata: None,
            showlegend: None,
            xaxis: None,
            yaxis: None,
        }
    }

    /// Y values without gaps
    pub fn dense(name: impl Into<String>, x: XData, y: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, x, y.into_iter().map(Some).collect())
    }

    pub fn on(mut self, axes: Axes) -> Self {
        let (x, y) = axes.trace_refs();
        self.xaxis = x;
        self.yaxis = y;
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn markers(mut self, marker: Marker) -> Self {
        self.mode = Some("markers".to_string());
        self.marker = Some(marker);
        self
    }

    pub fn fill(mut self, fill: &str, color: &str) -> Self {
        self.fill = Some(fill.to_string());
        self.fillcolor = Some(color.to_string());
        self
    }

    pub fn hover(mut self, template: impl Into<String>) -> Self {
        self.hovertemplate = Some(template.into());
        self
    }
}

/// Candle colors for one direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleStyle {
    pub line: Line,
    pub fillcolor: String,
}

impl CandleStyle {
    pub fn new(line_color: &str, fill_color: &str) -> Self {
        Self {
            line: Line {
                color: Some(line_color.to_string()),
                ..Line::default()
            },
            fillcolor: fill_color.to_string(),
        }
    }
}

/// OHLC candlestick trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candlestick {
    pub x: XData,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub name: String,
    pub increasing: CandleStyle,
    pub decreasing: CandleStyle,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Candlestick {
    pub fn on(mut self, axes: Axes) -> Self {
        let (x, y) = axes.trace_refs();
        self.xaxis = x;
        self.yaxis = y;
        self
    }
}

/// A figure trace, tagged with its Plotly `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Candlestick(Candlestick),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Scatter(s) => &s.name,
            Trace::Candlestick(c) => &c.name,
        }
    }
}

impl From<Scatter> for Trace {
    fn from(s: Scatter) -> Self {
        Trace::Scatter(s)
    }
}

impl From<Candlestick> for Trace {
    fn from(c: Candlestick) -> Self {
        Trace::Candlestick(c)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub xref: String,
    pub yref: String,
    pub x0: Coord,
    pub x1: Coord,
    pub y0: Coord,
    pub y1: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
}

impl Shape {
    /// Filled rectangle in data coordinates
    pub fn rect(axes: Axes, x0: Coord, x1: Coord, y0: f64, y1: f64) -> Self {
        Self {
            kind: "rect".to_string(),
            xref: axes.x.to_string(),
            yref: axes.y.to_string(),
            x0,
            x1,
            y0: Coord::Num(y0),
            y1: Coord::Num(y1),
            line: None,
            fillcolor: None,
        }
    }

    pub fn styled(mut self, line: Line, fillcolor: &str) -> Self {
        self.line = Some(line);
        self.fillcolor = Some(fillcolor.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: Coord,
    pub y: Coord,
    pub xref: String,
    pub yref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Annotation {
    /// Annotation positioned in data coordinates of `axes`
    pub fn at(text: impl Into<String>, axes: Axes, x: Coord, y: Coord) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            xref: axes.x.to_string(),
            yref: axes.y.to_string(),
            xanchor: None,
            yanchor: None,
            showarrow: false,
            bgcolor: None,
            bordercolor: None,
            borderwidth: None,
            font: None,
        }
    }

    /// Annotation positioned in paper fractions
    pub fn paper(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            ..Self::at(text, Axes::PRIMARY, Coord::Num(x), Coord::Num(y))
        }
    }

    pub fn anchored(mut self, xanchor: &str, yanchor: &str) -> Self {
        self.xanchor = Some(xanchor.to_string());
        self.yanchor = Some(yanchor.to_string());
        self
    }

    /// Black box with a yellow border, used for stats text
    pub fn boxed(mut self) -> Self {
        self.bgcolor = Some("rgba(0, 0, 0, 0.7)".to_string());
        self.bordercolor = Some("yellow".to_string());
        self.borderwidth = Some(2.0);
        self.font = Some(Font {
            size: Some(12),
            color: Some("white".to_string()),
        });
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }
}

/// Where a horizontal/vertical line label sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Left,
    Right,
    Top,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    /// Title centered over the plot
    pub fn centered(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            x: Some(0.5),
            xanchor: Some("center".to_string()),
            font: Some(Font::sized(size)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerolinecolor: Option<String>,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(AxisTitle { text: text.into() }),
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, color: &str) -> Self {
        self.showgrid = Some(true);
        self.gridwidth = Some(1.0);
        self.gridcolor = Some(color.to_string());
        self
    }

    pub fn without_rangeslider(mut self) -> Self {
        self.rangeslider = Some(RangeSlider { visible: false });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Legend {
    /// Horizontal legend just above the plot area
    pub fn horizontal(y: f64, xanchor: &str, x: f64) -> Self {
        Self {
            orientation: "h".to_string(),
            yanchor: "bottom".to_string(),
            y,
            xanchor: xanchor.to_string(),
            x,
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverLabel {
    pub font: Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    /// `false` disables drag interactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// A complete Plotly figure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trace(&mut self, trace: impl Into<Trace>) {
        self.data.push(trace.into());
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.layout.shapes.push(shape);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }

    /// Horizontal line across the full width of the `axes` panel
    ///
    /// The label is placed just outside the line end on `position`.
    pub fn add_hline(&mut self, y: f64, line: Line, label: &str, position: LabelPosition, axes: Axes) {
        let color = line.color.clone();
        self.add_shape(Shape {
            kind: "line".to_string(),
            xref: axes.x_domain(),
            yref: axes.y.to_string(),
            x0: Coord::Num(0.0),
            x1: Coord::Num(1.0),
            y0: Coord::Num(y),
            y1: Coord::Num(y),
            line: Some(line),
            fillcolor: None,
        });

        let (x, xanchor) = match position {
            LabelPosition::Left => (0.0, "right"),
            _ => (1.0, "left"),
        };
        let mut annotation = Annotation::at(label, axes, Coord::Num(x), Coord::Num(y))
            .anchored(xanchor, "middle");
        annotation.xref = axes.x_domain();
        annotation.font = Some(Font { size: None, color });
        self.add_annotation(annotation);
    }

    /// Vertical line across the full height of the `axes` panel
    pub fn add_vline(&mut self, x: f64, line: Line, label: &str, axes: Axes) {
        let color = line.color.clone();
        self.add_shape(Shape {
            kind: "line".to_string(),
            xref: axes.x.to_string(),
            yref: axes.y_domain(),
            x0: Coord::Num(x),
            x1: Coord::Num(x),
            y0: Coord::Num(0.0),
            y1: Coord::Num(1.0),
            line: Some(line),
            fillcolor: None,
        });

        let mut annotation =
            Annotation::at(label, axes, Coord::Num(x), Coord::Num(1.0)).anchored("center", "bottom");
        annotation.yref = axes.y_domain();
        annotation.font = Some(Font { size: None, color });
        self.add_annotation(annotation);
    }

    /// Names of all traces, in drawing order
    pub fn trace_names(&self) -> Vec<&str> {
        self.data.iter().map(Trace::name).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plotly_time_format() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 0).unwrap();
        assert_eq!(plotly_time(&dt), "2024-05-01 13:45:00");
        assert_eq!(plotly_time(&shift_minutes(&dt, 7.5).unwrap()), "2024-05-01 13:52:30");
        assert_eq!(plotly_time(&shift_minutes(&dt, -7.5).unwrap()), "2024-05-01 13:37:30");
    }

    #[test]
    fn test_shift_minutes_out_of_range() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 0).unwrap();
        assert_eq!(shift_minutes(&dt, 1e12 * 15.0), None);
        assert_eq!(shift_minutes(&dt, -1e15), None);
        assert_eq!(shift_minutes(&dt, f64::NAN), None);
        assert_eq!(shift_minutes(&dt, f64::INFINITY), None);
    }

    #[test]
    fn test_trace_type_tag() {
        let trace: Trace = Scatter::dense("Bid Depth", XData::Numbers(vec![100.0]), [2.0]).into();
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["type"], "scatter");
        assert_eq!(json["name"], "Bid Depth");
        assert_eq!(json["x"][0], 100.0);
        // Unset options are omitted
        assert!(json.get("fill").is_none());
        assert!(json.get("xaxis").is_none());
    }

    #[test]
    fn test_lower_axes_refs() {
        let trace = Scatter::dense("Ask Depth", XData::Numbers(vec![]), Vec::new()).on(Axes::LOWER);
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["xaxis"], "x2");
        assert_eq!(json["yaxis"], "y2");
    }

    #[test]
    fn test_missing_values_serialize_as_null() {
        let trace = Scatter::new(
            "SMA 20",
            XData::Numbers(vec![1.0, 2.0]),
            vec![None, Some(1.5)],
        );
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json["y"][0].is_null());
        assert_eq!(json["y"][1], 1.5);
    }

    #[test]
    fn test_hline_spans_panel_width() {
        let mut fig = Figure::new();
        fig.add_hline(
            1.25,
            Line::solid("lime", 2.0),
            "S1",
            LabelPosition::Right,
            Axes::PRIMARY,
        );

        let shape = &fig.layout.shapes[0];
        assert_eq!(shape.kind, "line");
        assert_eq!(shape.xref, "x domain");
        assert_eq!(shape.y0, Coord::Num(1.25));
        assert_eq!(shape.y1, Coord::Num(1.25));

        let label = &fig.layout.annotations[0];
        assert_eq!(label.text, "S1");
        assert_eq!(label.x, Coord::Num(1.0));
        assert_eq!(label.xanchor.as_deref(), Some("left"));
    }

    #[test]
    fn test_vline_on_lower_panel() {
        let mut fig = Figure::new();
        fig.add_vline(100.0, Line::dashed("green", 1.0), "Best Bid", Axes::LOWER);

        let shape = &fig.layout.shapes[0];
        assert_eq!(shape.xref, "x2");
        assert_eq!(shape.yref, "y2 domain");
        assert_eq!(fig.layout.annotations[0].yref, "y2 domain");
    }

    #[test]
    fn test_empty_layout_lists_skipped() {
        let json = serde_json::to_value(Figure::new()).unwrap();
        assert!(json["layout"].get("shapes").is_none());
        assert!(json["layout"].get("annotations").is_none());
        assert_eq!(json["data"], serde_json::json!([]));
    }
}
