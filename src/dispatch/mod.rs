//! Dispatch module - resolve a plot-type tag and call the matching figure builder

mod adapter;
mod registry;

pub use adapter::{ArgShape, Need, PlotArgs};
pub use registry::{available_tags, lookup, PlotKind, REGISTRY};

use crate::charts::{ChartPlotter, Figure};
use crate::options::PlotRequest;
use crate::Result;
use polars::prelude::DataFrame;
use tracing::debug;

/// Build the figure `request` asks for and, when `request.save` is set, write it to
/// `request.save_path`.
///
/// Unknown tags fail before any column is read. Nothing is written unless the figure
/// was built successfully.
pub fn plot(df: &DataFrame, request: &PlotRequest) -> Result<Figure> {
    let kind = lookup(&request.plot_type)?;
    debug!(tag = %request.plot_type, kind = %kind, "dispatching plot");

    let args = ArgShape::for_kind(kind).bind(kind, df, request)?;
    let opts = &request.options;

    let figure = match kind {
        PlotKind::Scatter => ChartPlotter::scatter(df, args.x()?, args.y()?, opts)?,
        PlotKind::Line => ChartPlotter::line(df, args.x()?, args.y()?, opts)?,
        PlotKind::Bar => ChartPlotter::bar(df, args.x()?, args.y.as_deref(), opts)?,
        PlotKind::Histogram => ChartPlotter::histogram(df, args.x()?, opts)?,
        PlotKind::Box => ChartPlotter::box_plot(df, args.y.as_deref(), args.x.as_deref(), opts)?,
        PlotKind::Violin => ChartPlotter::violin(df, args.y.as_deref(), args.x.as_deref(), opts)?,
        PlotKind::Heatmap => ChartPlotter::heatmap(df, args.x()?, args.y()?, args.z()?, opts)?,
        PlotKind::Correlation => ChartPlotter::correlation_matrix(df, Some(&args.columns), opts)?,
        PlotKind::DensityContour => {
            ChartPlotter::density_contour(df, args.x()?, args.y()?, opts)?
        }
        PlotKind::Ecdf => ChartPlotter::ecdf(df, args.x()?, opts)?,
        PlotKind::ScatterMatrix => ChartPlotter::scatter_matrix(df, Some(&args.columns), opts)?,
    };

    if request.save {
        figure.save(&request.save_path, &request.render)?;
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PlotOptions;
    use crate::ChartError;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df!(
            "age" => [19i64, 18, 28, 33, 32],
            "sex" => ["female", "male", "male", "male", "female"],
            "bmi" => [27.9, 33.77, 33.0, 22.705, 28.88],
            "charges" => [16884.92, 1725.55, 4449.46, 21984.47, 3866.86],
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_tag_builds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.html");
        let request = PlotRequest::new("pie")
            .x("age")
            .save_to(path.to_string_lossy());
        let err = plot(&frame(), &request).unwrap_err();
        assert!(matches!(err, ChartError::UnknownPlotType { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_alias_produces_same_kind() {
        let options = PlotOptions::new().nbins(5);
        let short = plot(
            &frame(),
            &PlotRequest::new("hist").x("age").options(options.clone()),
        )
        .unwrap();
        let long = plot(
            &frame(),
            &PlotRequest::new("histogram").x("age").options(options),
        )
        .unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn test_box_uses_y_and_optional_x() {
        let figure = plot(
            &frame(),
            &PlotRequest::new("box").x("sex").y("charges"),
        )
        .unwrap();
        assert_eq!(figure.kind, PlotKind::Box);
        assert_eq!(figure.x_label, "sex");
        assert_eq!(figure.y_label, "charges");
    }

    #[test]
    fn test_builder_error_skips_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.html");
        let request = PlotRequest::new("scatter")
            .x("sex")
            .y("missing")
            .save_to(path.to_string_lossy());
        assert!(plot(&frame(), &request).is_err());
        assert!(!path.exists());
    }
}
