//! Per-kind argument shaping: which of x / y / z / columns a builder receives.

use crate::data::DataProcessor;
use crate::dispatch::PlotKind;
use crate::options::PlotRequest;
use crate::{ChartError, Result};
use polars::prelude::DataFrame;
use tracing::warn;

/// How a builder consumes one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    Required,
    Optional,
    Unused,
}

const AXIS_OPTIONS: &[&str] = &["color", "title", "range_x", "range_y", "labels_x", "labels_y"];
const HISTOGRAM_OPTIONS: &[&str] = &[
    "color", "nbins", "title", "range_x", "range_y", "labels_x", "labels_y",
];
const VIOLIN_OPTIONS: &[&str] = &[
    "color", "box", "title", "range_x", "range_y", "labels_x", "labels_y",
];
const HEATMAP_OPTIONS: &[&str] = &[
    "zcol", "nbins", "title", "range_x", "range_y", "labels_x", "labels_y",
];
const CORRELATION_OPTIONS: &[&str] = &["columns", "title"];
const MATRIX_OPTIONS: &[&str] = &["columns", "color", "title"];

/// Argument-shaping rule for one plot kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgShape {
    pub x: Need,
    pub y: Need,
    /// Pull a third value column from `options.zcol`.
    pub z_from_zcol: bool,
    /// Resolve a column list (explicit `columns` or every numeric column).
    pub columns: bool,
    pub applicable_options: &'static [&'static str],
}

impl ArgShape {
    const fn new(x: Need, y: Need, applicable_options: &'static [&'static str]) -> Self {
        Self {
            x,
            y,
            z_from_zcol: false,
            columns: false,
            applicable_options,
        }
    }

    pub const fn for_kind(kind: PlotKind) -> Self {
        use Need::*;
        match kind {
            PlotKind::Scatter | PlotKind::Line | PlotKind::DensityContour => {
                Self::new(Required, Required, AXIS_OPTIONS)
            }
            PlotKind::Bar => Self::new(Required, Optional, AXIS_OPTIONS),
            PlotKind::Histogram => Self::new(Required, Unused, HISTOGRAM_OPTIONS),
            PlotKind::Ecdf => Self::new(Required, Unused, AXIS_OPTIONS),
            PlotKind::Box => Self::new(Optional, Optional, AXIS_OPTIONS),
            PlotKind::Violin => Self::new(Optional, Optional, VIOLIN_OPTIONS),
            PlotKind::Heatmap => Self {
                z_from_zcol: true,
                ..Self::new(Required, Required, HEATMAP_OPTIONS)
            },
            PlotKind::Correlation => Self {
                columns: true,
                ..Self::new(Unused, Unused, CORRELATION_OPTIONS)
            },
            PlotKind::ScatterMatrix => Self {
                columns: true,
                ..Self::new(Unused, Unused, MATRIX_OPTIONS)
            },
        }
    }

    /// Shape a request into the arguments the kind's builder takes.
    pub fn bind(&self, kind: PlotKind, df: &DataFrame, request: &PlotRequest) -> Result<PlotArgs> {
        let x = Self::take(kind, "x", self.x, request.x.as_deref())?;
        let y = Self::take(kind, "y", self.y, request.y.as_deref())?;

        let z = if self.z_from_zcol {
            let zcol = request.options.zcol.clone().ok_or(ChartError::MissingOption {
                plot_type: kind.name(),
                option: "zcol",
            })?;
            Some(zcol)
        } else {
            None
        };

        let columns = if self.columns {
            DataProcessor::resolve_columns(df, request.options.columns.as_deref())
        } else {
            Vec::new()
        };

        for option in request.options.set_option_names() {
            if self.applicable_options.contains(&option) {
                continue;
            }
            if request.strict {
                return Err(ChartError::InapplicableOption {
                    plot_type: kind.name(),
                    option,
                });
            }
            warn!(plot_type = kind.name(), option, "option ignored for this plot type");
        }

        Ok(PlotArgs {
            kind,
            x,
            y,
            z,
            columns,
        })
    }

    fn take(
        kind: PlotKind,
        argument: &'static str,
        need: Need,
        value: Option<&str>,
    ) -> Result<Option<String>> {
        match (need, value) {
            (Need::Required, None) => Err(ChartError::MissingArgument {
                plot_type: kind.name(),
                argument,
            }),
            (Need::Unused, Some(column)) => {
                warn!(plot_type = kind.name(), argument, column, "column ignored for this plot type");
                Ok(None)
            }
            (Need::Unused, None) => Ok(None),
            (_, value) => Ok(value.map(str::to_string)),
        }
    }
}

/// Arguments shaped for one builder call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub kind: PlotKind,
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
    pub columns: Vec<String>,
}

impl PlotArgs {
    fn required<'a>(&self, value: &'a Option<String>, argument: &'static str) -> Result<&'a str> {
        value.as_deref().ok_or(ChartError::MissingArgument {
            plot_type: self.kind.name(),
            argument,
        })
    }

    pub fn x(&self) -> Result<&str> {
        self.required(&self.x, "x")
    }

    pub fn y(&self) -> Result<&str> {
        self.required(&self.y, "y")
    }

    pub fn z(&self) -> Result<&str> {
        self.required(&self.z, "z")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PlotOptions;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df!(
            "age" => [19i64, 18, 28],
            "sex" => ["female", "male", "male"],
            "charges" => [16884.92, 1725.55, 4449.46],
        )
        .unwrap()
    }

    #[test]
    fn test_box_takes_y_as_primary_axis() {
        let shape = ArgShape::for_kind(PlotKind::Box);
        let request = PlotRequest::new("box").y("charges");
        let args = shape.bind(PlotKind::Box, &frame(), &request).unwrap();
        assert_eq!(args.y.as_deref(), Some("charges"));
        assert_eq!(args.x, None);
    }

    #[test]
    fn test_box_accepts_no_columns() {
        let shape = ArgShape::for_kind(PlotKind::Box);
        let args = shape
            .bind(PlotKind::Box, &frame(), &PlotRequest::new("box"))
            .unwrap();
        assert_eq!((args.x, args.y), (None, None));
    }

    #[test]
    fn test_histogram_drops_y() {
        let shape = ArgShape::for_kind(PlotKind::Histogram);
        let request = PlotRequest::new("hist").x("age").y("charges");
        let args = shape.bind(PlotKind::Histogram, &frame(), &request).unwrap();
        assert_eq!(args.x.as_deref(), Some("age"));
        assert_eq!(args.y, None);
    }

    #[test]
    fn test_missing_required_axis() {
        let shape = ArgShape::for_kind(PlotKind::Scatter);
        let request = PlotRequest::new("scatter").x("age");
        let err = shape.bind(PlotKind::Scatter, &frame(), &request).unwrap_err();
        assert!(matches!(err, ChartError::MissingArgument { argument: "y", .. }));
    }

    #[test]
    fn test_heatmap_pulls_z_from_zcol() {
        let shape = ArgShape::for_kind(PlotKind::Heatmap);
        let request = PlotRequest::new("heatmap")
            .x("age")
            .y("charges")
            .options(PlotOptions::new().zcol("charges"));
        let args = shape.bind(PlotKind::Heatmap, &frame(), &request).unwrap();
        assert_eq!(args.z().unwrap(), "charges");
    }

    #[test]
    fn test_heatmap_without_zcol_fails_fast() {
        let shape = ArgShape::for_kind(PlotKind::Heatmap);
        let request = PlotRequest::new("heatmap").x("age").y("charges");
        let err = shape.bind(PlotKind::Heatmap, &frame(), &request).unwrap_err();
        assert!(matches!(err, ChartError::MissingOption { option: "zcol", .. }));
    }

    #[test]
    fn test_strict_request_rejects_inapplicable_option() {
        let shape = ArgShape::for_kind(PlotKind::Scatter);
        let lenient = PlotRequest::new("scatter")
            .x("age")
            .y("charges")
            .options(PlotOptions::new().nbins(10));
        assert!(shape.bind(PlotKind::Scatter, &frame(), &lenient).is_ok());

        let strict = lenient.strict(true);
        let err = shape.bind(PlotKind::Scatter, &frame(), &strict).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InapplicableOption {
                plot_type: "scatter",
                option: "nbins"
            }
        ));
    }

    #[test]
    fn test_columns_default_to_numeric() {
        let shape = ArgShape::for_kind(PlotKind::Correlation);
        let args = shape
            .bind(PlotKind::Correlation, &frame(), &PlotRequest::new("corr"))
            .unwrap();
        assert_eq!(args.columns, vec!["age", "charges"]);
    }

    #[test]
    fn test_explicit_columns_are_kept() {
        let shape = ArgShape::for_kind(PlotKind::ScatterMatrix);
        let request =
            PlotRequest::new("matrix").options(PlotOptions::new().columns(["charges", "age"]));
        let args = shape.bind(PlotKind::ScatterMatrix, &frame(), &request).unwrap();
        assert_eq!(args.columns, vec!["charges", "age"]);
    }
}
