//! Figure description produced by the builders and consumed by the renderer.

use crate::charts::StaticChartRenderer;
use crate::config::RenderConfig;
use crate::dispatch::PlotKind;
use crate::stats::BoxStats;
use crate::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// A renderable chart: title, axes and the data each trace needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
    pub data: FigureData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XyStyle {
    Markers,
    Lines,
    /// Horizontal-then-vertical steps between consecutive points.
    Steps,
}

/// One named series of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XyTrace {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// One named series of bar heights, aligned with the figure's categories or bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub values: Vec<f64>,
}

/// One distribution inside a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionGroup {
    pub category: usize,
    pub stats: BoxStats,
    /// Kernel density outline as `(value, density)`; empty for box plots.
    pub density: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionTrace {
    pub name: String,
    pub groups: Vec<DistributionGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourTrace {
    pub name: String,
    /// Iso-line segments, one list per level.
    pub segments: Vec<Vec<[(f64, f64); 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FigureData {
    Xy {
        style: XyStyle,
        x_categories: Option<Vec<String>>,
        traces: Vec<XyTrace>,
    },
    Bars {
        categories: Vec<String>,
        traces: Vec<BarTrace>,
    },
    /// Stacked bin counts over `edges.len() - 1` bins.
    Histogram {
        edges: Vec<f64>,
        traces: Vec<BarTrace>,
    },
    Distribution {
        categories: Vec<String>,
        violin: bool,
        show_box: bool,
        traces: Vec<DistributionTrace>,
    },
    /// `cells[yi][xi]`; `None` where no row fell in the cell. A categorical axis has
    /// one unit-wide bin per label, centred on the label index.
    Heatmap {
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
        x_categories: Option<Vec<String>>,
        y_categories: Option<Vec<String>>,
        cells: Vec<Vec<Option<f64>>>,
    },
    /// Square matrix with the same labels on both axes.
    Matrix {
        labels: Vec<String>,
        values: Vec<Vec<f64>>,
    },
    Contour {
        levels: Vec<f64>,
        traces: Vec<ContourTrace>,
    },
    /// Row-aligned columns; panel (i, j) plots column j against column i.
    ScatterMatrix {
        columns: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
        groups: Vec<String>,
        row_groups: Vec<Option<usize>>,
    },
}

impl Figure {
    pub fn new(kind: PlotKind, title: Option<&str>, data: FigureData) -> Self {
        Self {
            kind,
            title: title.unwrap_or(kind.default_title()).to_string(),
            x_label: String::new(),
            y_label: String::new(),
            x_range: None,
            y_range: None,
            data,
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_ranges(mut self, x_range: Option<[f64; 2]>, y_range: Option<[f64; 2]>) -> Self {
        self.x_range = x_range;
        self.y_range = y_range;
        self
    }

    /// Names of the traces, in drawing order.
    pub fn trace_names(&self) -> Vec<&str> {
        match &self.data {
            FigureData::Xy { traces, .. } => traces.iter().map(|t| t.name.as_str()).collect(),
            FigureData::Bars { traces, .. } | FigureData::Histogram { traces, .. } => {
                traces.iter().map(|t| t.name.as_str()).collect()
            }
            FigureData::Distribution { traces, .. } => {
                traces.iter().map(|t| t.name.as_str()).collect()
            }
            FigureData::Contour { traces, .. } => traces.iter().map(|t| t.name.as_str()).collect(),
            FigureData::ScatterMatrix { groups, .. } => groups.iter().map(String::as_str).collect(),
            FigureData::Heatmap { .. } | FigureData::Matrix { .. } => Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_svg(&self, config: &RenderConfig) -> Result<String> {
        StaticChartRenderer::render_svg(self, config)
    }

    /// Self-contained HTML page: inline SVG plus the figure description as JSON.
    pub fn to_html(&self, config: &RenderConfig) -> Result<String> {
        let svg = self.to_svg(config)?;
        // `</` inside a script block would end it early
        let json = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>body {{ margin: 0; font-family: sans-serif; background: #fff; }} \
             .figure {{ display: flex; justify-content: center; padding: 16px; }}</style>\n\
             </head>\n<body>\n<div class=\"figure\">\n{svg}\n</div>\n\
             <script type=\"application/json\" id=\"figure-data\">{json}</script>\n\
             </body>\n</html>\n",
            title = escape_html(&self.title),
        ))
    }

    /// Write the figure to `path`, overwriting it. `.svg` writes bare SVG, anything else HTML.
    pub fn save(&self, path: impl AsRef<Path>, config: &RenderConfig) -> Result<()> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        let document = if is_svg {
            self.to_svg(config)?
        } else {
            self.to_html(config)?
        };

        fs::write(path, &document)?;
        info!(
            path = %path.display(),
            bytes = document.len(),
            kind = %self.kind,
            "figure saved"
        );
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
