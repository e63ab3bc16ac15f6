//! Layout color themes
//!
//! Plotly.js has no built-in named templates, so the configured template
//! name is resolved here to the handful of layout colors it stands for.

use crate::figure::{Axis, Font, Layout};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Resolve a template name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name {
            "plotly_dark" | "dark" => Theme::Dark,
            "plotly" | "plotly_white" | "light" => Theme::Light,
            other => {
                warn!(template = other, "Unknown chart template, using plotly_dark");
                Theme::Dark
            }
        }
    }

    fn background(&self) -> &'static str {
        match self {
            Theme::Dark => "rgb(17, 17, 17)",
            Theme::Light => "white",
        }
    }

    fn text(&self) -> &'static str {
        match self {
            Theme::Dark => "#f2f5fa",
            Theme::Light => "#2a3f5f",
        }
    }

    pub fn grid(&self) -> &'static str {
        match self {
            Theme::Dark => "#283442",
            Theme::Light => "#ebf0f8",
        }
    }

    /// Apply colors to the layout and to every axis already present
    pub fn apply(&self, layout: &mut Layout) {
        layout.paper_bgcolor = Some(self.background().to_string());
        layout.plot_bgcolor = Some(self.background().to_string());

        let font = layout.font.get_or_insert_with(Font::default);
        font.color = Some(self.text().to_string());

        for axis in [
            &mut layout.xaxis,
            &mut layout.yaxis,
            &mut layout.xaxis2,
            &mut layout.yaxis2,
        ] {
            let axis = axis.get_or_insert_with(Axis::default);
            axis.gridcolor.get_or_insert_with(|| self.grid().to_string());
            axis.zerolinecolor = Some(self.grid().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("plotly_dark"), Theme::Dark);
        assert_eq!(Theme::from_name("plotly_white"), Theme::Light);
        assert_eq!(Theme::from_name("seaborn"), Theme::Dark);
    }

    #[test]
    fn test_apply_keeps_explicit_grid_color() {
        let mut layout = Layout {
            yaxis: Some(Axis::titled("Price").with_grid("rgba(128, 128, 128, 0.2)")),
            ..Layout::default()
        };
        Theme::Dark.apply(&mut layout);

        assert_eq!(layout.paper_bgcolor.as_deref(), Some("rgb(17, 17, 17)"));
        assert_eq!(
            layout.yaxis.as_ref().unwrap().gridcolor.as_deref(),
            Some("rgba(128, 128, 128, 0.2)")
        );
        assert_eq!(
            layout.xaxis.as_ref().unwrap().gridcolor.as_deref(),
            Some("#283442")
        );
    }
}
