//! Chart Plotter Module
//! Builds figure descriptions from DataFrame columns, one function per plot type.

use crate::charts::figure::{
    BarTrace, ContourTrace, DistributionGroup, DistributionTrace, Figure, FigureData, XyStyle,
    XyTrace,
};
use crate::data::{Categories, DataProcessor};
use crate::dispatch::PlotKind;
use crate::options::{PlotOptions, DEFAULT_NBINS};
use crate::stats::StatsCalculator;
use crate::Result;
use polars::prelude::*;

/// Bins per axis for heatmaps when `nbins` is not given.
pub const DEFAULT_HEATMAP_BINS: usize = 20;
/// Samples along each violin outline.
pub const VIOLIN_POINTS: usize = 100;
/// Grid resolution of the 2-D density estimate.
pub const CONTOUR_RESOLUTION: usize = 60;
pub const CONTOUR_LEVELS: usize = 8;

/// Per color group, per category.
type Samples = Vec<Vec<Vec<f64>>>;

/// Creates figure descriptions from tabular data.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn scatter(df: &DataFrame, x: &str, y: &str, opts: &PlotOptions) -> Result<Figure> {
        Self::xy(PlotKind::Scatter, XyStyle::Markers, df, x, y, opts)
    }

    pub fn line(df: &DataFrame, x: &str, y: &str, opts: &PlotOptions) -> Result<Figure> {
        Self::xy(PlotKind::Line, XyStyle::Lines, df, x, y, opts)
    }

    /// Sum of `y` per `x` category, or the row count per category when `y` is absent.
    pub fn bar(df: &DataFrame, x: &str, y: Option<&str>, opts: &PlotOptions) -> Result<Figure> {
        Self::category_bars(PlotKind::Bar, df, x, y, opts)
    }

    /// Equal-width bins over the full range of `x`, counts stacked per color group.
    ///
    /// A non-numeric `x` is counted per category instead and `nbins` is ignored.
    pub fn histogram(df: &DataFrame, x: &str, opts: &PlotOptions) -> Result<Figure> {
        if !DataProcessor::is_numeric_column(df, x)? {
            return Self::category_bars(PlotKind::Histogram, df, x, None, opts);
        }

        let values = DataProcessor::numeric_values(df, x)?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let finite: Vec<f64> = values.iter().flatten().copied().collect();
        let (min, max) = StatsCalculator::extent(&finite).unwrap_or((0.0, 1.0));
        let edges = StatsCalculator::bin_edges(min, max, opts.nbins.unwrap_or(DEFAULT_NBINS));

        let mut traces = Self::bar_traces(&groups, edges.len() - 1);
        for (value, group) in values.iter().zip(&groups.codes) {
            let (Some(value), Some(group)) = (value, group) else {
                continue;
            };
            if let Some(bin) = StatsCalculator::bin_index(&edges, *value) {
                traces[*group].values[bin] += 1.0;
            }
        }

        let figure = Figure::new(
            PlotKind::Histogram,
            opts.title.as_deref(),
            FigureData::Histogram { edges, traces },
        );
        Ok(Self::finish(figure, opts, x, "count"))
    }

    /// Tukey boxes of `y` per `x` category.
    ///
    /// With only `x`, boxes `x` as the value column. With neither, draws one box per
    /// numeric column.
    pub fn box_plot(
        df: &DataFrame,
        y: Option<&str>,
        x: Option<&str>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        Self::distribution(PlotKind::Box, df, y, x, opts)
    }

    /// Kernel density outlines; columns are resolved as in [`ChartPlotter::box_plot`].
    pub fn violin(
        df: &DataFrame,
        y: Option<&str>,
        x: Option<&str>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        Self::distribution(PlotKind::Violin, df, y, x, opts)
    }

    /// 2-D binning of `x` and `y`; each cell holds the sum of `z`.
    ///
    /// A non-numeric axis gets one bin per category.
    pub fn heatmap(df: &DataFrame, x: &str, y: &str, z: &str, opts: &PlotOptions) -> Result<Figure> {
        let (xs, x_categories) = DataProcessor::axis_values(df, x)?;
        let (ys, y_categories) = DataProcessor::axis_values(df, y)?;
        let zs = DataProcessor::numeric_values(df, z)?;

        let rows: Vec<(f64, f64, f64)> = xs
            .iter()
            .zip(&ys)
            .zip(&zs)
            .filter_map(|((x, y), z)| Some(((*x)?, (*y)?, (*z)?)))
            .collect();

        let nbins = opts.nbins.unwrap_or(DEFAULT_HEATMAP_BINS);
        let x_all: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let y_all: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let x_edges = Self::heatmap_edges(&x_all, x_categories.as_deref(), nbins);
        let y_edges = Self::heatmap_edges(&y_all, y_categories.as_deref(), nbins);

        let mut cells: Vec<Vec<Option<f64>>> = vec![vec![None; x_edges.len() - 1]; y_edges.len() - 1];
        for (xv, yv, zv) in rows {
            let bins = (
                StatsCalculator::bin_index(&x_edges, xv),
                StatsCalculator::bin_index(&y_edges, yv),
            );
            if let (Some(xi), Some(yi)) = bins {
                *cells[yi][xi].get_or_insert(0.0) += zv;
            }
        }

        let figure = Figure::new(
            PlotKind::Heatmap,
            opts.title.as_deref(),
            FigureData::Heatmap {
                x_edges,
                y_edges,
                x_categories,
                y_categories,
                cells,
            },
        );
        Ok(Self::finish(figure, opts, x, y))
    }

    /// Pearson matrix over `columns`, defaulting to every numeric column in frame order.
    pub fn correlation_matrix(
        df: &DataFrame,
        columns: Option<&[String]>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        let columns = DataProcessor::resolve_columns(df, columns);
        let samples = columns
            .iter()
            .map(|column| DataProcessor::numeric_values(df, column))
            .collect::<Result<Vec<_>>>()?;
        let values = StatsCalculator::correlation_matrix(&samples);

        Ok(Figure::new(
            PlotKind::Correlation,
            opts.title.as_deref(),
            FigureData::Matrix {
                labels: columns,
                values,
            },
        ))
    }

    /// Iso-lines of a 2-D kernel density estimate, one trace per color group.
    pub fn density_contour(df: &DataFrame, x: &str, y: &str, opts: &PlotOptions) -> Result<Figure> {
        let xs = DataProcessor::numeric_values(df, x)?;
        let ys = DataProcessor::numeric_values(df, y)?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let mut points: Vec<Vec<(f64, f64)>> = vec![Vec::new(); groups.len()];
        for ((x, y), group) in xs.iter().zip(&ys).zip(&groups.codes) {
            if let (Some(x), Some(y), Some(group)) = (x, y, group) {
                points[*group].push((*x, *y));
            }
        }

        let grids: Vec<_> = points
            .iter()
            .map(|p| StatsCalculator::kde_2d(p, CONTOUR_RESOLUTION))
            .collect();
        let peak = grids
            .iter()
            .flatten()
            .flat_map(|(_, _, density)| density.iter().flatten())
            .fold(0.0_f64, |acc, d| acc.max(*d));
        let levels = StatsCalculator::contour_levels(peak, CONTOUR_LEVELS);

        let traces = groups
            .names
            .iter()
            .zip(&grids)
            .map(|(name, grid)| {
                let segments = match grid {
                    Some((x_grid, y_grid, density)) => levels
                        .iter()
                        .map(|&level| {
                            StatsCalculator::contour_segments(x_grid, y_grid, density, level)
                        })
                        .collect(),
                    None => Vec::new(),
                };
                ContourTrace {
                    name: name.clone(),
                    segments,
                }
            })
            .collect();

        let figure = Figure::new(
            PlotKind::DensityContour,
            opts.title.as_deref(),
            FigureData::Contour { levels, traces },
        );
        Ok(Self::finish(figure, opts, x, y))
    }

    pub fn ecdf(df: &DataFrame, x: &str, opts: &PlotOptions) -> Result<Figure> {
        let values = DataProcessor::numeric_values(df, x)?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let samples = Self::split_by_group(&values, &groups);
        let traces = groups
            .names
            .iter()
            .zip(&samples)
            .map(|(name, sample)| XyTrace {
                name: name.clone(),
                points: StatsCalculator::ecdf(sample),
            })
            .collect();

        let figure = Figure::new(
            PlotKind::Ecdf,
            opts.title.as_deref(),
            FigureData::Xy {
                style: XyStyle::Steps,
                x_categories: None,
                traces,
            },
        );
        Ok(Self::finish(figure, opts, x, "probability"))
    }

    /// Pairwise scatter panels over `columns`, defaulting to every numeric column.
    pub fn scatter_matrix(
        df: &DataFrame,
        columns: Option<&[String]>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        let columns = DataProcessor::resolve_columns(df, columns);
        let values = columns
            .iter()
            .map(|column| DataProcessor::numeric_values(df, column))
            .collect::<Result<Vec<_>>>()?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        Ok(Figure::new(
            PlotKind::ScatterMatrix,
            opts.title.as_deref(),
            FigureData::ScatterMatrix {
                columns,
                values,
                groups: groups.names,
                row_groups: groups.codes,
            },
        ))
    }

    fn xy(
        kind: PlotKind,
        style: XyStyle,
        df: &DataFrame,
        x: &str,
        y: &str,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        let (xs, x_categories) = DataProcessor::axis_values(df, x)?;
        let ys = DataProcessor::numeric_values(df, y)?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let mut traces: Vec<XyTrace> = groups
            .names
            .iter()
            .map(|name| XyTrace {
                name: name.clone(),
                points: Vec::new(),
            })
            .collect();
        for ((x, y), group) in xs.iter().zip(&ys).zip(&groups.codes) {
            if let (Some(x), Some(y), Some(group)) = (x, y, group) {
                traces[*group].points.push((*x, *y));
            }
        }

        let figure = Figure::new(
            kind,
            opts.title.as_deref(),
            FigureData::Xy {
                style,
                x_categories,
                traces,
            },
        );
        Ok(Self::finish(figure, opts, x, y))
    }

    fn category_bars(
        kind: PlotKind,
        df: &DataFrame,
        x: &str,
        y: Option<&str>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        let categories = DataProcessor::categories(df, x)?;
        let heights = y.map(|y| DataProcessor::numeric_values(df, y)).transpose()?;
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let mut traces = Self::bar_traces(&groups, categories.len());
        for row in 0..df.height() {
            let (Some(category), Some(group)) = (categories.codes[row], groups.codes[row]) else {
                continue;
            };
            let height = match &heights {
                Some(values) => match values[row] {
                    Some(v) => v,
                    None => continue,
                },
                None => 1.0,
            };
            traces[group].values[category] += height;
        }

        let figure = Figure::new(
            kind,
            opts.title.as_deref(),
            FigureData::Bars {
                categories: categories.names,
                traces,
            },
        );
        Ok(Self::finish(figure, opts, x, y.unwrap_or("count")))
    }

    /// One bin per category, or `nbins` equal-width bins over `values`.
    fn heatmap_edges(values: &[f64], categories: Option<&[String]>, nbins: usize) -> Vec<f64> {
        match categories {
            Some(names) => (0..=names.len()).map(|i| i as f64 - 0.5).collect(),
            None => {
                let (min, max) = StatsCalculator::extent(values).unwrap_or((0.0, 1.0));
                StatsCalculator::bin_edges(min, max, nbins)
            }
        }
    }

    fn distribution(
        kind: PlotKind,
        df: &DataFrame,
        y: Option<&str>,
        x: Option<&str>,
        opts: &PlotOptions,
    ) -> Result<Figure> {
        let groups = DataProcessor::color_groups(df, opts.color.as_deref())?;

        let (categories, samples, x_label, y_label) = match (y, x) {
            (Some(y), x) => {
                let (names, samples) = Self::grouped_samples(df, y, x, &groups)?;
                (names, samples, x.unwrap_or(""), y)
            }
            (None, Some(x)) => {
                let (names, samples) = Self::grouped_samples(df, x, None, &groups)?;
                (names, samples, "", x)
            }
            (None, None) => {
                let (names, samples) = Self::column_samples(df, &groups)?;
                (names, samples, "variable", "value")
            }
        };

        let violin = kind == PlotKind::Violin;
        let traces = groups
            .names
            .iter()
            .zip(&samples)
            .map(|(name, by_category)| DistributionTrace {
                name: name.clone(),
                groups: by_category
                    .iter()
                    .enumerate()
                    .filter_map(|(category, sample)| {
                        let stats = StatsCalculator::box_stats(sample)?;
                        let density = if violin {
                            StatsCalculator::kde(sample, VIOLIN_POINTS)
                        } else {
                            Vec::new()
                        };
                        Some(DistributionGroup {
                            category,
                            stats,
                            density,
                        })
                    })
                    .collect(),
            })
            .collect();

        let figure = Figure::new(
            kind,
            opts.title.as_deref(),
            FigureData::Distribution {
                categories,
                violin,
                show_box: !violin || opts.show_box.unwrap_or(true),
                traces,
            },
        );
        Ok(Self::finish(figure, opts, x_label, y_label))
    }

    /// Values of `value` split by color group and by the categories of `category`.
    fn grouped_samples(
        df: &DataFrame,
        value: &str,
        category: Option<&str>,
        groups: &Categories,
    ) -> Result<(Vec<String>, Samples)> {
        let values = DataProcessor::numeric_values(df, value)?;
        let categories = match category {
            Some(column) => DataProcessor::categories(df, column)?,
            None => Categories::single(df.height()),
        };

        let mut samples = vec![vec![Vec::new(); categories.len()]; groups.len()];
        for row in 0..df.height() {
            if let (Some(v), Some(c), Some(g)) =
                (values[row], categories.codes[row], groups.codes[row])
            {
                samples[g][c].push(v);
            }
        }
        Ok((categories.names, samples))
    }

    /// Every numeric column as its own category, split by color group.
    fn column_samples(df: &DataFrame, groups: &Categories) -> Result<(Vec<String>, Samples)> {
        let columns = DataProcessor::resolve_columns(df, None);
        let mut samples = vec![vec![Vec::new(); columns.len()]; groups.len()];
        for (c, column) in columns.iter().enumerate() {
            let values = DataProcessor::numeric_values(df, column)?;
            for (value, group) in values.iter().zip(&groups.codes) {
                if let (Some(v), Some(g)) = (value, group) {
                    samples[*g][c].push(*v);
                }
            }
        }
        Ok((columns, samples))
    }

    fn bar_traces(groups: &Categories, len: usize) -> Vec<BarTrace> {
        groups
            .names
            .iter()
            .map(|name| BarTrace {
                name: name.clone(),
                values: vec![0.0; len],
            })
            .collect()
    }

    fn split_by_group(values: &[Option<f64>], groups: &Categories) -> Vec<Vec<f64>> {
        let mut samples = vec![Vec::new(); groups.len()];
        for (value, group) in values.iter().zip(&groups.codes) {
            if let (Some(value), Some(group)) = (value, group) {
                samples[*group].push(*value);
            }
        }
        samples
    }

    fn finish(figure: Figure, opts: &PlotOptions, x_label: &str, y_label: &str) -> Figure {
        let x_label = opts.labels_x.as_deref().unwrap_or(x_label);
        let y_label = opts.labels_y.as_deref().unwrap_or(y_label);
        figure
            .with_labels(x_label, y_label)
            .with_ranges(opts.range_x, opts.range_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartError;
    use approx::assert_relative_eq;

    fn insurance() -> DataFrame {
        df!(
            "age" => [19i64, 18, 28, 33, 32, 31, 46, 37],
            "sex" => ["female", "male", "male", "male", "male", "female", "female", "female"],
            "bmi" => [27.9, 33.77, 33.0, 22.705, 28.88, 25.74, 33.44, 27.74],
            "charges" => [16884.92, 1725.55, 4449.46, 21984.47, 3866.86, 3756.62, 8240.59, 7281.51],
        )
        .unwrap()
    }

    #[test]
    fn test_scatter_splits_by_color() {
        let opts = PlotOptions::new().color("sex");
        let figure = ChartPlotter::scatter(&insurance(), "age", "charges", &opts).unwrap();
        assert_eq!(figure.title, "Scatter Plot");
        assert_eq!(figure.trace_names(), vec!["female", "male"]);
        let FigureData::Xy { traces, .. } = &figure.data else {
            panic!("expected xy data");
        };
        assert_eq!(traces[0].points.len(), 4);
        assert_eq!(traces[0].points[0], (19.0, 16884.92));
    }

    #[test]
    fn test_bar_without_y_counts_rows() {
        let figure = ChartPlotter::bar(&insurance(), "sex", None, &PlotOptions::new()).unwrap();
        let FigureData::Bars { categories, traces } = &figure.data else {
            panic!("expected bar data");
        };
        assert_eq!(categories, &vec!["female".to_string(), "male".to_string()]);
        assert_eq!(traces[0].values, vec![4.0, 4.0]);
        assert_eq!(figure.y_label, "count");
    }

    #[test]
    fn test_bar_with_y_sums_values() {
        let figure =
            ChartPlotter::bar(&insurance(), "sex", Some("age"), &PlotOptions::new()).unwrap();
        let FigureData::Bars { traces, .. } = &figure.data else {
            panic!("expected bar data");
        };
        assert_eq!(traces[0].values, vec![19.0 + 31.0 + 46.0 + 37.0, 18.0 + 28.0 + 33.0 + 32.0]);
    }

    #[test]
    fn test_histogram_counts_every_row() {
        let opts = PlotOptions::new().nbins(4);
        let figure = ChartPlotter::histogram(&insurance(), "age", &opts).unwrap();
        let FigureData::Histogram { edges, traces } = &figure.data else {
            panic!("expected histogram data");
        };
        assert_eq!(edges.len(), 5);
        assert_relative_eq!(edges[0], 18.0);
        assert_relative_eq!(edges[4], 46.0);
        assert_eq!(traces[0].values.iter().sum::<f64>(), 8.0);
    }

    #[test]
    fn test_histogram_default_bins() {
        let figure = ChartPlotter::histogram(&insurance(), "bmi", &PlotOptions::new()).unwrap();
        let FigureData::Histogram { edges, .. } = &figure.data else {
            panic!("expected histogram data");
        };
        assert_eq!(edges.len(), DEFAULT_NBINS + 1);
    }

    #[test]
    fn test_box_plot_groups_by_x() {
        let figure =
            ChartPlotter::box_plot(&insurance(), Some("charges"), Some("sex"), &PlotOptions::new())
                .unwrap();
        let FigureData::Distribution {
            categories,
            violin,
            traces,
            ..
        } = &figure.data
        else {
            panic!("expected distribution data");
        };
        assert!(!violin);
        assert_eq!(categories.len(), 2);
        assert_eq!(traces[0].groups.len(), 2);
        assert_eq!(traces[0].groups[0].stats.count, 4);
        assert!(traces[0].groups[0].density.is_empty());
    }

    #[test]
    fn test_violin_box_option() {
        let opts = PlotOptions::new().show_box(false);
        let figure = ChartPlotter::violin(&insurance(), Some("bmi"), None, &opts).unwrap();
        let FigureData::Distribution {
            show_box, traces, ..
        } = &figure.data
        else {
            panic!("expected distribution data");
        };
        assert!(!show_box);
        assert_eq!(traces[0].groups[0].density.len(), VIOLIN_POINTS);
    }

    #[test]
    fn test_box_without_columns_uses_every_numeric_column() {
        let figure = ChartPlotter::box_plot(&insurance(), None, None, &PlotOptions::new()).unwrap();
        let FigureData::Distribution {
            categories, traces, ..
        } = &figure.data
        else {
            panic!("expected distribution data");
        };
        assert_eq!(categories, &vec!["age", "bmi", "charges"]);
        assert_eq!(traces[0].groups.len(), 3);
        assert_eq!(traces[0].groups[2].stats.count, 8);
        assert_eq!(figure.x_label, "variable");
        assert_eq!(figure.y_label, "value");
    }

    #[test]
    fn test_violin_with_only_x_uses_it_as_values() {
        let opts = PlotOptions::new().color("sex");
        let figure = ChartPlotter::violin(&insurance(), None, Some("age"), &opts).unwrap();
        let FigureData::Distribution { traces, .. } = &figure.data else {
            panic!("expected distribution data");
        };
        assert_eq!(figure.y_label, "age");
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].groups[0].stats.count, 4);
        assert_eq!(traces[0].groups[0].density.len(), VIOLIN_POINTS);
    }

    #[test]
    fn test_histogram_of_text_column_counts_categories() {
        let figure = ChartPlotter::histogram(&insurance(), "sex", &PlotOptions::new()).unwrap();
        assert_eq!(figure.kind, PlotKind::Histogram);
        let FigureData::Bars { categories, traces } = &figure.data else {
            panic!("expected per-category counts");
        };
        assert_eq!(categories, &vec!["female", "male"]);
        assert_eq!(traces[0].values, vec![4.0, 4.0]);
        assert_eq!(figure.y_label, "count");
    }

    #[test]
    fn test_heatmap_bins_text_axis_by_category() {
        let figure =
            ChartPlotter::heatmap(&insurance(), "sex", "bmi", "charges", &PlotOptions::new().nbins(3))
                .unwrap();
        let FigureData::Heatmap {
            x_edges,
            y_edges,
            x_categories,
            y_categories,
            cells,
        } = &figure.data
        else {
            panic!("expected heatmap data");
        };
        assert_eq!(x_categories.as_deref(), Some(&["female".to_string(), "male".to_string()][..]));
        assert!(y_categories.is_none());
        assert_eq!(x_edges, &vec![-0.5, 0.5, 1.5]);
        assert_eq!(y_edges.len(), 4);
        let female: f64 = cells.iter().filter_map(|row| row[0]).sum();
        assert_relative_eq!(female, 16884.92 + 3756.62 + 8240.59 + 7281.51, epsilon = 1e-6);
    }

    #[test]
    fn test_heatmap_sums_z_per_cell() {
        let opts = PlotOptions::new().nbins(2);
        let figure = ChartPlotter::heatmap(&insurance(), "age", "bmi", "charges", &opts).unwrap();
        let FigureData::Heatmap { cells, .. } = &figure.data else {
            panic!("expected heatmap data");
        };
        let total: f64 = cells.iter().flatten().flatten().sum();
        let expected: f64 = [
            16884.92, 1725.55, 4449.46, 21984.47, 3866.86, 3756.62, 8240.59, 7281.51,
        ]
        .iter()
        .sum();
        assert_relative_eq!(total, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_correlation_defaults_to_numeric_columns() {
        let figure =
            ChartPlotter::correlation_matrix(&insurance(), None, &PlotOptions::new()).unwrap();
        let FigureData::Matrix { labels, values } = &figure.data else {
            panic!("expected matrix data");
        };
        assert_eq!(labels, &vec!["age", "bmi", "charges"]);
        assert_relative_eq!(values[1][1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_rejects_text_column() {
        let columns = vec!["age".to_string(), "sex".to_string()];
        let err =
            ChartPlotter::correlation_matrix(&insurance(), Some(&columns), &PlotOptions::new())
                .unwrap_err();
        assert!(matches!(err, ChartError::NonNumericColumn { .. }));
    }

    #[test]
    fn test_density_contour_has_levels() {
        let figure =
            ChartPlotter::density_contour(&insurance(), "age", "bmi", &PlotOptions::new())
                .unwrap();
        let FigureData::Contour { levels, traces } = &figure.data else {
            panic!("expected contour data");
        };
        assert_eq!(levels.len(), CONTOUR_LEVELS);
        assert!(traces[0].segments.iter().any(|level| !level.is_empty()));
    }

    #[test]
    fn test_ecdf_per_group() {
        let opts = PlotOptions::new().color("sex");
        let figure = ChartPlotter::ecdf(&insurance(), "age", &opts).unwrap();
        let FigureData::Xy { style, traces, .. } = &figure.data else {
            panic!("expected xy data");
        };
        assert_eq!(*style, XyStyle::Steps);
        assert_eq!(traces[1].points.last(), Some(&(33.0, 1.0)));
    }

    #[test]
    fn test_scatter_matrix_explicit_columns() {
        let columns = vec!["bmi".to_string(), "age".to_string()];
        let figure =
            ChartPlotter::scatter_matrix(&insurance(), Some(&columns), &PlotOptions::new())
                .unwrap();
        let FigureData::ScatterMatrix {
            columns, values, ..
        } = &figure.data
        else {
            panic!("expected scatter matrix data");
        };
        assert_eq!(columns, &vec!["bmi", "age"]);
        assert_eq!(values[1][0], Some(19.0));
    }

    #[test]
    fn test_labels_and_title_options() {
        let opts = PlotOptions {
            labels_x: Some("Age (years)".to_string()),
            ..PlotOptions::new().title("Custom").range_y(0.0, 50000.0)
        };
        let figure = ChartPlotter::line(&insurance(), "age", "charges", &opts).unwrap();
        assert_eq!(figure.title, "Custom");
        assert_eq!(figure.x_label, "Age (years)");
        assert_eq!(figure.y_label, "charges");
        assert_eq!(figure.y_range, Some([0.0, 50000.0]));
    }
}
