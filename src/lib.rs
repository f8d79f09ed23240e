//! Chartify - plot-type dispatch over Polars data frames
//!
//! A short, case-insensitive tag (`"scatter"`, `"hist"`, `"corr"`, ...) selects one
//! of eleven figure builders. The figure is rendered to SVG with Plotters and can
//! be written to disk as a standalone SVG or HTML document.

pub mod charts;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod options;
pub mod stats;

pub use charts::{Figure, FigureData};
pub use config::RenderConfig;
pub use dispatch::{plot, PlotKind};
pub use error::{ChartError, Result};
pub use options::{PlotOptions, PlotRequest};
