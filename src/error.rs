//! Error types for plot dispatch and rendering.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Unknown plot type: {tag}. Available: [{}]", available.join(", "))]
    UnknownPlotType {
        tag: String,
        available: Vec<&'static str>,
    },

    #[error("Plot type '{plot_type}' requires the {argument} column")]
    MissingArgument {
        plot_type: &'static str,
        argument: &'static str,
    },

    #[error("Plot type '{plot_type}' requires the '{option}' option")]
    MissingOption {
        plot_type: &'static str,
        option: &'static str,
    },

    #[error("Option '{option}' does not apply to plot type '{plot_type}'")]
    InapplicableOption {
        plot_type: &'static str,
        option: &'static str,
    },

    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart rendering failed: {message}")]
    Render { message: String },
}

impl<T: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<T>>
    for ChartError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        ChartError::Render {
            message: format!("Drawing area error: {}", err),
        }
    }
}
