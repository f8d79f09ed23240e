//! Plot request and forwarded keyword options.

use crate::config::RenderConfig;
use serde::{Deserialize, Serialize};

/// Default histogram bin count.
pub const DEFAULT_NBINS: usize = 30;
/// Default file written when a request asks to save without a path.
pub const DEFAULT_SAVE_PATH: &str = "plot.html";
/// Default plot-type tag.
pub const DEFAULT_PLOT_TYPE: &str = "scatter";

/// Named options forwarded to the selected figure builder.
///
/// Options that do not apply to the selected plot type are ignored with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotOptions {
    /// Column used to split rows into colored traces.
    pub color: Option<String>,
    /// Histogram bin count (heatmap bins per axis).
    pub nbins: Option<usize>,
    /// Whether violins overlay an inner box.
    #[serde(rename = "box")]
    pub show_box: Option<bool>,
    /// Value column for heatmap intensity.
    pub zcol: Option<String>,
    /// Explicit column subset for correlation and scatter-matrix views.
    pub columns: Option<Vec<String>>,
    pub title: Option<String>,
    pub range_x: Option<[f64; 2]>,
    pub range_y: Option<[f64; 2]>,
    pub labels_x: Option<String>,
    pub labels_y: Option<String>,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object such as `{"color": "sex", "nbins": 20}`.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    pub fn nbins(mut self, nbins: usize) -> Self {
        self.nbins = Some(nbins);
        self
    }

    pub fn show_box(mut self, show: bool) -> Self {
        self.show_box = Some(show);
        self
    }

    pub fn zcol(mut self, column: impl Into<String>) -> Self {
        self.zcol = Some(column.into());
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn range_x(mut self, min: f64, max: f64) -> Self {
        self.range_x = Some([min, max]);
        self
    }

    pub fn range_y(mut self, min: f64, max: f64) -> Self {
        self.range_y = Some([min, max]);
        self
    }

    pub fn labels_x(mut self, label: impl Into<String>) -> Self {
        self.labels_x = Some(label.into());
        self
    }

    pub fn labels_y(mut self, label: impl Into<String>) -> Self {
        self.labels_y = Some(label.into());
        self
    }

    /// Names of the options that are set, in declaration order.
    pub fn set_option_names(&self) -> Vec<&'static str> {
        let flags = [
            ("color", self.color.is_some()),
            ("nbins", self.nbins.is_some()),
            ("box", self.show_box.is_some()),
            ("zcol", self.zcol.is_some()),
            ("columns", self.columns.is_some()),
            ("title", self.title.is_some()),
            ("range_x", self.range_x.is_some()),
            ("range_y", self.range_y.is_some()),
            ("labels_x", self.labels_x.is_some()),
            ("labels_y", self.labels_y.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

/// A single dispatch request: which columns to plot, how, and where to save.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub x: Option<String>,
    pub y: Option<String>,
    pub plot_type: String,
    pub save: bool,
    pub save_path: String,
    pub options: PlotOptions,
    pub render: RenderConfig,
    /// Reject options that do not apply to the plot type instead of ignoring them.
    pub strict: bool,
}

impl Default for PlotRequest {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            plot_type: DEFAULT_PLOT_TYPE.to_string(),
            save: false,
            save_path: DEFAULT_SAVE_PATH.to_string(),
            options: PlotOptions::default(),
            render: RenderConfig::default(),
            strict: false,
        }
    }
}

impl PlotRequest {
    pub fn new(plot_type: impl Into<String>) -> Self {
        Self {
            plot_type: plot_type.into(),
            ..Self::default()
        }
    }

    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    pub fn options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }

    pub fn render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Request that the figure is written to `path` after it is built.
    pub fn save_to(mut self, path: impl Into<String>) -> Self {
        self.save = true;
        self.save_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options =
            PlotOptions::from_json(r#"{"color": "sex", "nbins": 12, "box": false}"#).unwrap();
        assert_eq!(options.color.as_deref(), Some("sex"));
        assert_eq!(options.nbins, Some(12));
        assert_eq!(options.show_box, Some(false));
        assert_eq!(options.set_option_names(), vec!["color", "nbins", "box"]);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = PlotOptions::from_json(r#"{"colour": "sex"}"#).unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_request_defaults() {
        let request = PlotRequest::default();
        assert_eq!(request.plot_type, "scatter");
        assert!(!request.save);
        assert_eq!(request.save_path, "plot.html");
    }

    #[test]
    fn test_save_to_sets_flag() {
        let request = PlotRequest::new("hist").x("age").save_to("out.html");
        assert!(request.save);
        assert_eq!(request.save_path, "out.html");
        assert_eq!(request.x.as_deref(), Some("age"));
    }
}
