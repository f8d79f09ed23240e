//! Static plot-type registry: tag -> figure kind.

use crate::{ChartError, Result};
use serde::Serialize;
use std::fmt;

/// The figure builders a tag can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Scatter,
    Line,
    Bar,
    Histogram,
    Box,
    Violin,
    Heatmap,
    Correlation,
    DensityContour,
    Ecdf,
    ScatterMatrix,
}

impl PlotKind {
    pub fn name(self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter",
            PlotKind::Line => "line",
            PlotKind::Bar => "bar",
            PlotKind::Histogram => "histogram",
            PlotKind::Box => "box",
            PlotKind::Violin => "violin",
            PlotKind::Heatmap => "heatmap",
            PlotKind::Correlation => "correlation",
            PlotKind::DensityContour => "density",
            PlotKind::Ecdf => "ecdf",
            PlotKind::ScatterMatrix => "scatter_matrix",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            PlotKind::Scatter => "Scatter Plot",
            PlotKind::Line => "Line Plot",
            PlotKind::Bar => "Bar Chart",
            PlotKind::Histogram => "Histogram",
            PlotKind::Box => "Box Plot",
            PlotKind::Violin => "Violin Plot",
            PlotKind::Heatmap => "Heatmap",
            PlotKind::Correlation => "Correlation Matrix",
            PlotKind::DensityContour => "2D Density Contour",
            PlotKind::Ecdf => "ECDF",
            PlotKind::ScatterMatrix => "Scatter Matrix",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every recognised tag, in listing order. Aliases share a kind.
pub static REGISTRY: [(&str, PlotKind); 15] = [
    ("scatter", PlotKind::Scatter),
    ("line", PlotKind::Line),
    ("bar", PlotKind::Bar),
    ("hist", PlotKind::Histogram),
    ("histogram", PlotKind::Histogram),
    ("box", PlotKind::Box),
    ("violin", PlotKind::Violin),
    ("heatmap", PlotKind::Heatmap),
    ("corr", PlotKind::Correlation),
    ("correlation", PlotKind::Correlation),
    ("density", PlotKind::DensityContour),
    ("kde", PlotKind::DensityContour),
    ("ecdf", PlotKind::Ecdf),
    ("matrix", PlotKind::ScatterMatrix),
    ("scatter_matrix", PlotKind::ScatterMatrix),
];

/// All recognised tags, in registry order.
pub fn available_tags() -> Vec<&'static str> {
    REGISTRY.iter().map(|(tag, _)| *tag).collect()
}

/// Resolve a tag case-insensitively. The error reports the lower-cased tag.
pub fn lookup(tag: &str) -> Result<PlotKind> {
    let normalized = tag.to_lowercase();
    match REGISTRY.iter().find(|(name, _)| *name == normalized) {
        Some((_, kind)) => Ok(*kind),
        None => Err(ChartError::UnknownPlotType {
            tag: normalized,
            available: available_tags(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("SCATTER").unwrap(), PlotKind::Scatter);
        assert_eq!(lookup("Scatter_Matrix").unwrap(), PlotKind::ScatterMatrix);
    }

    #[test]
    fn test_aliases_share_a_kind() {
        assert_eq!(lookup("hist").unwrap(), lookup("histogram").unwrap());
        assert_eq!(lookup("corr").unwrap(), lookup("correlation").unwrap());
        assert_eq!(lookup("kde").unwrap(), lookup("density").unwrap());
        assert_eq!(lookup("matrix").unwrap(), lookup("scatter_matrix").unwrap());
    }

    #[test]
    fn test_registry_tags_are_unique_and_lowercase() {
        let tags: HashSet<&str> = REGISTRY.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags.len(), REGISTRY.len());
        assert!(tags.iter().all(|tag| *tag == tag.to_lowercase()));
    }

    #[test]
    fn test_every_kind_is_reachable() {
        let kinds: HashSet<PlotKind> = REGISTRY.iter().map(|(_, kind)| *kind).collect();
        assert_eq!(kinds.len(), 11);
    }

    #[test]
    fn test_unknown_tag_lists_all_tags() {
        let err = lookup("bogus").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bogus"));
        for tag in available_tags() {
            assert!(message.contains(tag), "missing {tag} in {message}");
        }
    }

    #[test]
    fn test_unknown_tag_is_reported_lower_cased() {
        let err = lookup("BOGUS").unwrap_err();
        assert!(matches!(err, ChartError::UnknownPlotType { ref tag, .. } if tag == "bogus"));
        assert!(err.to_string().starts_with("Unknown plot type: bogus."));
    }
}
