//! Charts module - figure building and rendering

mod figure;
pub mod palette;
mod plotter;
mod renderer;

pub use figure::{
    BarTrace, ContourTrace, DistributionGroup, DistributionTrace, Figure, FigureData, XyStyle,
    XyTrace,
};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
