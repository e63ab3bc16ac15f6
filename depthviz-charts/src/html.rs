//! Standalone HTML export
//!
//! Renders a figure into a self-contained page: one `<div>`, the Plotly.js
//! script tag and an inline `Plotly.newPlot` call carrying the figure and
//! the interaction config as JSON.

use crate::figure::Figure;
use depthviz_core::config::ChartConfig;
use minijinja::{context, Environment};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const PAGE_TEMPLATE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>{{ title }}</title>
    <script src="{{ plotly_js_url|safe }}"></script>
    <style>
        html, body {
            height: 100%;
            margin: 0;
            padding: 0;
            background: #111111;
        }

        #chart {
            width: 100%;
            height: 100%;
        }
    </style>
  </head>
  <body>
    <div id="chart"></div>
    <script type="text/javascript">
      var figure = {{ figure|safe }};
      var config = {{ config|safe }};
      Plotly.newPlot("chart", figure.data, figure.layout, config);
    </script>
  </body>
</html>
"#;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to serialize figure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// PNG download button options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    pub format: String,
    pub filename: String,
    pub height: u32,
    pub width: u32,
    pub scale: u32,
}

impl ImageOptions {
    pub fn png(filename: &str, width: u32, height: u32) -> Self {
        Self {
            format: "png".to_string(),
            filename: filename.to_string(),
            height,
            width,
            scale: 1,
        }
    }
}

/// Plotly.js interaction config (`Plotly.newPlot` fourth argument)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub display_mode_bar: bool,
    pub displaylogo: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mode_bar_buttons_to_add: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_image_button_options: Option<ImageOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_zoom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_click: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_plot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tips: Option<bool>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: true,
            displaylogo: false,
            mode_bar_buttons_to_add: Vec::new(),
            to_image_button_options: None,
            scroll_zoom: None,
            double_click: None,
            responsive: None,
            static_plot: None,
            editable: None,
            show_tips: None,
        }
    }
}

fn buttons(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl PlotConfig {
    /// Depth chart: mode bar and PNG export at the chart size
    pub fn depth(chart: &ChartConfig) -> Self {
        Self {
            to_image_button_options: Some(ImageOptions::png(
                "orderbook_depth",
                chart.depth_width,
                chart.depth_height,
            )),
            ..Self::default()
        }
    }

    /// Ratio chart: drawing tools and PNG export
    pub fn ratio(chart: &ChartConfig) -> Self {
        Self {
            mode_bar_buttons_to_add: buttons(&["drawline", "drawopenpath", "eraseshape"]),
            to_image_button_options: Some(ImageOptions::png(
                "altcoin_ratio",
                chart.ratio_width,
                chart.ratio_height,
            )),
            ..Self::default()
        }
    }

    /// Dashboard: wheel zoom, double-click reset, responsive sizing
    pub fn dashboard() -> Self {
        Self {
            mode_bar_buttons_to_add: buttons(&[
                "pan2d",
                "zoom2d",
                "zoomIn2d",
                "zoomOut2d",
                "resetScale2d",
            ]),
            scroll_zoom: Some(true),
            double_click: Some("reset".to_string()),
            responsive: Some(true),
            static_plot: Some(false),
            editable: Some(false),
            show_tips: Some(true),
            ..Self::default()
        }
    }
}

/// JSON for an inline `<script>`: `</` is escaped so a label can never
/// close the script element
fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Renders figures to standalone HTML pages
pub struct HtmlExporter {
    env: Environment<'static>,
    plotly_js_url: String,
}

impl HtmlExporter {
    pub fn new(plotly_js_url: impl Into<String>) -> Result<Self, ExportError> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;

        Ok(Self {
            env,
            plotly_js_url: plotly_js_url.into(),
        })
    }

    pub fn from_config(chart: &ChartConfig) -> Result<Self, ExportError> {
        Self::new(chart.plotly_js_url.clone())
    }

    pub fn plotly_js_url(&self) -> &str {
        &self.plotly_js_url
    }

    /// Render the page as a string
    pub fn render(&self, figure: &Figure, config: &PlotConfig, title: &str) -> Result<String, ExportError> {
        let figure_json = script_json(figure)?;
        let config_json = script_json(config)?;

        let template = self.env.get_template(PAGE_TEMPLATE_NAME)?;
        let page = template.render(context! {
            title => title,
            plotly_js_url => self.plotly_js_url,
            figure => figure_json,
            config => config_json,
        })?;
        Ok(page)
    }

    /// Render and write the page; the file stem becomes the page title
    pub fn write<P: AsRef<Path>>(&self, figure: &Figure, config: &PlotConfig, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "depthviz".to_string());

        let page = self.render(figure, config, &title)?;
        fs::write(path, page).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), traces = figure.data.len(), "Chart saved");
        Ok(())
    }
}
