//! Static Chart Renderer
//! Draws figure descriptions to SVG with Plotters.
//!
//! Cartesian kinds go through `ChartBuilder`; the correlation matrix and the
//! colorbar are laid out by hand in backend pixels.

use crate::charts::figure::{
    BarTrace, ContourTrace, DistributionTrace, Figure, FigureData, XyStyle, XyTrace,
};
use crate::charts::palette::{self, EMPTY_CELL, GRID};
use crate::config::RenderConfig;
use crate::stats::{BoxStats, StatsCalculator};
use crate::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
const COLORBAR_WIDTH: u32 = 90;
const COLORBAR_STEPS: usize = 64;
/// Fraction of a category slot covered by bars, boxes and violins.
const SLOT_FILL: f64 = 0.8;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a figure to an SVG document.
    pub fn render_svg(figure: &Figure, config: &RenderConfig) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (config.width, config.height))
                .into_drawing_area();
            root.fill(&WHITE)?;
            Self::draw(&root, figure, config)?;
            root.present()?;
        }
        Ok(buffer)
    }

    fn draw(root: &Canvas<'_>, figure: &Figure, config: &RenderConfig) -> Result<()> {
        match &figure.data {
            FigureData::Xy {
                style,
                x_categories,
                traces,
            } => Self::draw_xy(root, figure, config, *style, x_categories.as_deref(), traces),
            FigureData::Bars { categories, traces } => {
                Self::draw_bars(root, figure, config, categories, traces)
            }
            FigureData::Histogram { edges, traces } => {
                Self::draw_histogram(root, figure, config, edges, traces)
            }
            FigureData::Distribution {
                categories,
                violin,
                show_box,
                traces,
            } => Self::draw_distribution(
                root, figure, config, categories, *violin, *show_box, traces,
            ),
            FigureData::Heatmap {
                x_edges,
                y_edges,
                x_categories,
                y_categories,
                cells,
            } => Self::draw_heatmap(
                root,
                figure,
                config,
                (x_edges.as_slice(), x_categories.as_deref()),
                (y_edges.as_slice(), y_categories.as_deref()),
                cells,
            ),
            FigureData::Matrix { labels, values } => {
                Self::draw_matrix(root, figure, config, labels, values)
            }
            FigureData::Contour { traces, .. } => Self::draw_contour(root, figure, config, traces),
            FigureData::ScatterMatrix {
                columns,
                values,
                groups,
                row_groups,
            } => Self::draw_scatter_matrix(root, figure, config, columns, values, groups, row_groups),
        }
    }

    // ---- axes ---------------------------------------------------------------------------

    /// Data extent padded by 5%, or the explicit range when one is set.
    fn axis_range(explicit: Option<[f64; 2]>, extent: Option<(f64, f64)>) -> Range<f64> {
        if let Some([min, max]) = explicit {
            return min..max;
        }
        match extent {
            Some((min, max)) if max > min => {
                let pad = (max - min) * 0.05;
                (min - pad)..(max + pad)
            }
            Some((min, max)) => (min - 0.5)..(max + 0.5),
            None => 0.0..1.0,
        }
    }

    fn category_range(explicit: Option<[f64; 2]>, count: usize) -> Range<f64> {
        match explicit {
            Some([min, max]) => min..max,
            None => -0.5..(count.max(1) as f64 - 0.5),
        }
    }

    fn edge_range(
        explicit: Option<[f64; 2]>,
        edges: &[f64],
        categories: Option<&[String]>,
    ) -> Range<f64> {
        match categories {
            Some(names) => Self::category_range(explicit, names.len()),
            None => Self::axis_range(
                explicit,
                edges.first().zip(edges.last()).map(|(a, b)| (*a, *b)),
            ),
        }
    }

    fn category_label(labels: &[String], value: f64) -> String {
        let index = value.round();
        if (value - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        labels.get(index as usize).cloned().unwrap_or_default()
    }

    fn cartesian<'a, 'b>(
        root: &'a Canvas<'b>,
        figure: &Figure,
        config: &RenderConfig,
        x: Range<f64>,
        y: Range<f64>,
    ) -> Result<Chart<'a, 'b>> {
        let chart = ChartBuilder::on(root)
            .caption(&figure.title, (FONT, config.title_font_size))
            .margin(config.margin)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x, y)?;
        Ok(chart)
    }

    fn draw_mesh(
        chart: &mut Chart<'_, '_>,
        figure: &Figure,
        config: &RenderConfig,
        x_categories: Option<&[String]>,
        y_categories: Option<&[String]>,
    ) -> Result<()> {
        let label_font = (FONT, config.label_font_size);
        let x_names = x_categories.unwrap_or(&[]);
        let y_names = y_categories.unwrap_or(&[]);
        let x_formatter = |v: &f64| Self::category_label(x_names, *v);
        let y_formatter = |v: &f64| Self::category_label(y_names, *v);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .label_style(label_font)
            .axis_desc_style(label_font)
            .light_line_style(GRID.mix(0.3));
        if let Some(categories) = x_categories {
            mesh.x_labels(categories.len().max(1))
                .x_label_formatter(&x_formatter)
                .disable_x_mesh();
        }
        if let Some(categories) = y_categories {
            mesh.y_labels(categories.len().max(1))
                .y_label_formatter(&y_formatter)
                .disable_y_mesh();
        }
        mesh.draw()?;
        Ok(())
    }

    fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>, names: &[&str]) -> Result<()> {
        if names.iter().all(|name| name.is_empty()) {
            return Ok(());
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }

    fn swatch(color: RGBColor) -> impl Fn((i32, i32)) -> Rectangle<(i32, i32)> {
        move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
    }

    // ---- cartesian kinds ----------------------------------------------------------------

    fn draw_xy(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        style: XyStyle,
        x_categories: Option<&[String]>,
        traces: &[XyTrace],
    ) -> Result<()> {
        let xs: Vec<f64> = traces.iter().flat_map(|t| t.points.iter().map(|p| p.0)).collect();
        let ys: Vec<f64> = traces.iter().flat_map(|t| t.points.iter().map(|p| p.1)).collect();

        let x_range = match x_categories {
            Some(categories) => Self::category_range(figure.x_range, categories.len()),
            None => Self::axis_range(figure.x_range, StatsCalculator::extent(&xs)),
        };
        let y_range = match (style, figure.y_range) {
            (XyStyle::Steps, None) => 0.0..1.05,
            _ => Self::axis_range(figure.y_range, StatsCalculator::extent(&ys)),
        };

        let mut chart = Self::cartesian(root, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, x_categories, None)?;

        for (index, trace) in traces.iter().enumerate() {
            let color = palette::trace_color(index);
            let annotation = match style {
                XyStyle::Markers => chart.draw_series(
                    trace
                        .points
                        .iter()
                        .map(|&point| Circle::new(point, 3, color.mix(0.8).filled())),
                )?,
                XyStyle::Lines => chart.draw_series(LineSeries::new(
                    trace.points.iter().copied(),
                    color.stroke_width(2),
                ))?,
                XyStyle::Steps => chart.draw_series(LineSeries::new(
                    Self::step_path(&trace.points),
                    color.stroke_width(2),
                ))?,
            };
            if !trace.name.is_empty() {
                annotation
                    .label(trace.name.as_str())
                    .legend(Self::swatch(color));
            }
        }

        let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
        Self::draw_legend(&mut chart, &names)
    }

    /// Horizontal-then-vertical path through `points`.
    fn step_path(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        let mut path = Vec::with_capacity(points.len() * 2);
        for (i, &(x, y)) in points.iter().enumerate() {
            if i > 0 {
                path.push((x, points[i - 1].1));
            }
            path.push((x, y));
        }
        path
    }

    fn draw_bars(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        categories: &[String],
        traces: &[BarTrace],
    ) -> Result<()> {
        let heights: Vec<f64> = traces
            .iter()
            .flat_map(|t| t.values.iter().copied())
            .chain([0.0])
            .collect();
        let y_range = match figure.y_range {
            Some([min, max]) => min..max,
            None => {
                let (min, max) = StatsCalculator::extent(&heights).unwrap_or((0.0, 1.0));
                let top = if max > min { max * 1.05 } else { 1.0 };
                min.min(0.0) * 1.05..top
            }
        };
        let x_range = Self::category_range(figure.x_range, categories.len());

        let mut chart = Self::cartesian(root, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, Some(categories), None)?;

        let width = SLOT_FILL / traces.len().max(1) as f64;
        for (index, trace) in traces.iter().enumerate() {
            let color = palette::trace_color(index);
            let annotation = chart.draw_series(trace.values.iter().enumerate().map(|(c, &v)| {
                let left = c as f64 - SLOT_FILL / 2.0 + width * index as f64;
                Rectangle::new([(left, 0.0), (left + width, v)], color.filled())
            }))?;
            if !trace.name.is_empty() {
                annotation
                    .label(trace.name.as_str())
                    .legend(Self::swatch(color));
            }
        }

        let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
        Self::draw_legend(&mut chart, &names)
    }

    fn draw_histogram(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        edges: &[f64],
        traces: &[BarTrace],
    ) -> Result<()> {
        let bins = edges.len().saturating_sub(1);
        let totals: Vec<f64> = (0..bins)
            .map(|b| traces.iter().map(|t| t.values[b]).sum())
            .collect();
        let peak = totals.iter().copied().fold(0.0_f64, f64::max);

        let x_range = Self::axis_range(
            figure.x_range,
            edges.first().zip(edges.last()).map(|(a, b)| (*a, *b)),
        );
        let y_range = match figure.y_range {
            Some([min, max]) => min..max,
            None => 0.0..(peak * 1.05).max(1.0),
        };

        let mut chart = Self::cartesian(root, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, None, None)?;

        let mut base = vec![0.0; bins];
        for (index, trace) in traces.iter().enumerate() {
            let color = palette::trace_color(index);
            let bars: Vec<Rectangle<(f64, f64)>> = (0..bins)
                .map(|b| {
                    let bottom = base[b];
                    base[b] += trace.values[b];
                    Rectangle::new(
                        [(edges[b], bottom), (edges[b + 1], base[b])],
                        color.mix(0.85).filled(),
                    )
                })
                .collect();
            let annotation = chart.draw_series(bars)?;
            if !trace.name.is_empty() {
                annotation
                    .label(trace.name.as_str())
                    .legend(Self::swatch(color));
            }
        }

        let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
        Self::draw_legend(&mut chart, &names)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_distribution(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        categories: &[String],
        violin: bool,
        show_box: bool,
        traces: &[DistributionTrace],
    ) -> Result<()> {
        let mut values: Vec<f64> = Vec::new();
        for group in traces.iter().flat_map(|t| t.groups.iter()) {
            values.extend([group.stats.lower_whisker, group.stats.upper_whisker]);
            values.extend(group.stats.outliers.iter().copied());
            values.extend(group.density.iter().map(|(v, _)| *v));
        }

        let x_range = Self::category_range(figure.x_range, categories.len());
        let y_range = Self::axis_range(figure.y_range, StatsCalculator::extent(&values));
        let mut chart = Self::cartesian(root, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, Some(categories), None)?;

        let slot = SLOT_FILL / traces.len().max(1) as f64;
        let half = slot * 0.4;
        for (index, trace) in traces.iter().enumerate() {
            let color = palette::trace_color(index);
            for group in &trace.groups {
                let center = group.category as f64 - SLOT_FILL / 2.0 + slot * (index as f64 + 0.5);
                if violin {
                    Self::draw_violin_body(&mut chart, &group.density, center, half, color)?;
                }
                if show_box {
                    let box_half = if violin { half * 0.15 } else { half };
                    Self::draw_box(&mut chart, &group.stats, center, box_half, color, violin)?;
                }
            }

            if !trace.name.is_empty() {
                chart
                    .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                    .label(trace.name.as_str())
                    .legend(Self::swatch(color));
            }
        }

        let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
        Self::draw_legend(&mut chart, &names)
    }

    fn draw_violin_body(
        chart: &mut Chart<'_, '_>,
        density: &[(f64, f64)],
        center: f64,
        half: f64,
        color: RGBColor,
    ) -> Result<()> {
        let peak = density.iter().map(|(_, d)| *d).fold(0.0_f64, f64::max);
        if peak <= 0.0 {
            return Ok(());
        }
        let scale = half / peak;
        let outline: Vec<(f64, f64)> = density
            .iter()
            .map(|&(v, d)| (center - d * scale, v))
            .chain(density.iter().rev().map(|&(v, d)| (center + d * scale, v)))
            .collect();

        chart.draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            color.mix(0.3).filled(),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            outline,
            color.stroke_width(1),
        )))?;
        Ok(())
    }

    fn draw_box(
        chart: &mut Chart<'_, '_>,
        stats: &BoxStats,
        center: f64,
        half: f64,
        color: RGBColor,
        solid: bool,
    ) -> Result<()> {
        let fill = if solid { color.filled() } else { color.mix(0.3).filled() };
        chart.draw_series([
            Rectangle::new([(center - half, stats.q1), (center + half, stats.q3)], fill),
            Rectangle::new(
                [(center - half, stats.q1), (center + half, stats.q3)],
                color.stroke_width(1),
            ),
        ])?;

        let median_color = if solid { WHITE } else { color };
        let cap = half * 0.5;
        chart.draw_series([
            PathElement::new(
                vec![(center - half, stats.median), (center + half, stats.median)],
                median_color.stroke_width(2),
            ),
            PathElement::new(
                vec![(center, stats.q3), (center, stats.upper_whisker)],
                color.stroke_width(1),
            ),
            PathElement::new(
                vec![(center, stats.q1), (center, stats.lower_whisker)],
                color.stroke_width(1),
            ),
            PathElement::new(
                vec![(center - cap, stats.upper_whisker), (center + cap, stats.upper_whisker)],
                color.stroke_width(1),
            ),
            PathElement::new(
                vec![(center - cap, stats.lower_whisker), (center + cap, stats.lower_whisker)],
                color.stroke_width(1),
            ),
        ])?;

        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|&v| Circle::new((center, v), 3, color.stroke_width(1))),
        )?;
        Ok(())
    }

    fn draw_contour(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        traces: &[ContourTrace],
    ) -> Result<()> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for segment in traces.iter().flat_map(|t| t.segments.iter().flatten()) {
            for &(x, y) in segment {
                xs.push(x);
                ys.push(y);
            }
        }

        let x_range = Self::axis_range(figure.x_range, StatsCalculator::extent(&xs));
        let y_range = Self::axis_range(figure.y_range, StatsCalculator::extent(&ys));
        let mut chart = Self::cartesian(root, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, None, None)?;

        for (index, trace) in traces.iter().enumerate() {
            let color = palette::trace_color(index);
            let level_count = trace.segments.len().max(1) as f64;
            for (level, segments) in trace.segments.iter().enumerate() {
                // Inner (higher) levels are drawn more opaque
                let alpha = 0.35 + 0.65 * (level + 1) as f64 / level_count;
                chart.draw_series(segments.iter().map(|segment| {
                    PathElement::new(segment.to_vec(), color.mix(alpha).stroke_width(1))
                }))?;
            }
            if !trace.name.is_empty() {
                chart
                    .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                    .label(trace.name.as_str())
                    .legend(Self::swatch(color));
            }
        }

        let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
        Self::draw_legend(&mut chart, &names)
    }

    fn draw_heatmap(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        (x_edges, x_categories): (&[f64], Option<&[String]>),
        (y_edges, y_categories): (&[f64], Option<&[String]>),
        cells: &[Vec<Option<f64>>],
    ) -> Result<()> {
        let filled: Vec<f64> = cells.iter().flatten().flatten().copied().collect();
        let (low, high) = StatsCalculator::extent(&filled).unwrap_or((0.0, 1.0));

        let split = config.width.saturating_sub(COLORBAR_WIDTH) as i32;
        let (main, bar) = root.split_horizontally(split);

        let x_range = Self::edge_range(figure.x_range, x_edges, x_categories);
        let y_range = Self::edge_range(figure.y_range, y_edges, y_categories);
        let mut chart = Self::cartesian(&main, figure, config, x_range, y_range)?;
        Self::draw_mesh(&mut chart, figure, config, x_categories, y_categories)?;

        for (yi, row) in cells.iter().enumerate() {
            chart.draw_series(row.iter().enumerate().filter_map(|(xi, cell)| {
                let value = (*cell)?;
                Some(Rectangle::new(
                    [(x_edges[xi], y_edges[yi]), (x_edges[xi + 1], y_edges[yi + 1])],
                    palette::sequential(value, low, high).filled(),
                ))
            }))?;
        }

        Self::draw_colorbar(&bar, config, low, high, |v| palette::sequential(v, low, high))
    }

    fn draw_colorbar(
        area: &Canvas<'_>,
        config: &RenderConfig,
        low: f64,
        high: f64,
        color_of: impl Fn(f64) -> RGBColor,
    ) -> Result<()> {
        let (low, high) = if high > low { (low, high) } else { (low - 0.5, high + 0.5) };
        let mut chart = ChartBuilder::on(area)
            .margin_top(config.margin + config.title_font_size + 20)
            .margin_bottom(config.margin + 50)
            .margin_right(10)
            .y_label_area_size(55)
            .build_cartesian_2d(0.0..1.0, low..high)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_labels(6)
            .label_style((FONT, config.label_font_size))
            .draw()?;

        let step = (high - low) / COLORBAR_STEPS as f64;
        chart.draw_series((0..COLORBAR_STEPS).map(|i| {
            let bottom = low + step * i as f64;
            Rectangle::new(
                [(0.0, bottom), (1.0, bottom + step)],
                color_of(bottom + step / 2.0).filled(),
            )
        }))?;
        Ok(())
    }

    // ---- grid layouts -------------------------------------------------------------------

    /// Annotated matrix laid out in pixels: row 0 on top, labels on the left and bottom.
    fn draw_matrix(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        labels: &[String],
        values: &[Vec<f64>],
    ) -> Result<()> {
        let body = root.titled(&figure.title, (FONT, config.title_font_size))?;
        let n = labels.len();
        if n == 0 {
            return Self::draw_message(&body, config, "No numeric columns");
        }

        let split = config.width.saturating_sub(COLORBAR_WIDTH) as i32;
        let (main, bar) = body.split_horizontally(split);
        let (width, height) = main.dim_in_pixel();
        let label_area = 110_i32;
        let side = (width as i32 - label_area - config.margin as i32)
            .min(height as i32 - label_area)
            .max(n as i32);
        let cell = side / n as i32;
        let origin = (label_area, config.margin as i32);

        let label_style = TextStyle::from((FONT, config.label_font_size).into_font());
        let text_size = config.label_font_size.saturating_sub(1).max(8);

        for (i, row) in values.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let x0 = origin.0 + j as i32 * cell;
                let y0 = origin.1 + i as i32 * cell;
                let fill = if value.is_finite() {
                    palette::diverging(value)
                } else {
                    EMPTY_CELL
                };
                main.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell, y0 + cell)],
                    fill.filled(),
                ))?;
                let annotation = if value.is_finite() {
                    format!("{:.2}", value)
                } else {
                    "NaN".to_string()
                };
                main.draw(&Text::new(
                    annotation,
                    (x0 + cell / 2, y0 + cell / 2),
                    TextStyle::from((FONT, text_size).into_font())
                        .color(&palette::contrast_text(fill))
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))?;
            }
        }

        for (k, label) in labels.iter().enumerate() {
            let middle = k as i32 * cell + cell / 2;
            main.draw(&Text::new(
                label.as_str(),
                (origin.0 - 8, origin.1 + middle),
                label_style.pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
            main.draw(&Text::new(
                label.as_str(),
                (origin.0 + middle, origin.1 + n as i32 * cell + 8),
                label_style.pos(Pos::new(HPos::Center, VPos::Top)),
            ))?;
        }

        Self::draw_colorbar(&bar, config, -1.0, 1.0, palette::diverging)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_scatter_matrix(
        root: &Canvas<'_>,
        figure: &Figure,
        config: &RenderConfig,
        columns: &[String],
        values: &[Vec<Option<f64>>],
        groups: &[String],
        row_groups: &[Option<usize>],
    ) -> Result<()> {
        let body = root.titled(&figure.title, (FONT, config.title_font_size))?;
        let n = columns.len();
        if n == 0 {
            return Self::draw_message(&body, config, "No numeric columns");
        }

        let ranges: Vec<Range<f64>> = values
            .iter()
            .map(|column| {
                let finite: Vec<f64> = column.iter().flatten().copied().collect();
                Self::axis_range(None, StatsCalculator::extent(&finite))
            })
            .collect();
        let tick_font = (FONT, config.label_font_size.saturating_sub(3).max(8));

        let panels = body.margin(0, config.margin, 0, config.margin).split_evenly((n, n));
        for (index, panel) in panels.iter().enumerate() {
            let (i, j) = (index / n, index % n);
            let bottom_row = i == n - 1;
            let left_column = j == 0;

            let mut chart = ChartBuilder::on(panel)
                .margin(4)
                .x_label_area_size(if bottom_row { 40 } else { 0 })
                .y_label_area_size(if left_column { 55 } else { 0 })
                .build_cartesian_2d(ranges[j].clone(), ranges[i].clone())?;

            let mut mesh = chart.configure_mesh();
            mesh.x_labels(3)
                .y_labels(3)
                .label_style(tick_font)
                .axis_desc_style(tick_font)
                .light_line_style(GRID.mix(0.2));
            if bottom_row {
                mesh.x_desc(columns[j].as_str());
            }
            if left_column {
                mesh.y_desc(columns[i].as_str());
            }
            mesh.draw()?;

            for (group, name) in groups.iter().enumerate() {
                let color = palette::trace_color(group);
                let points = values[j]
                    .iter()
                    .zip(&values[i])
                    .zip(row_groups)
                    .filter_map(|((x, y), g)| match (x, y, g) {
                        (Some(x), Some(y), Some(g)) if *g == group => Some((*x, *y)),
                        _ => None,
                    });
                let annotation = chart
                    .draw_series(points.map(|point| Circle::new(point, 2, color.mix(0.7).filled())))?;
                if index == n - 1 && !name.is_empty() {
                    annotation.label(name.as_str()).legend(Self::swatch(color));
                }
            }

            if index == n - 1 {
                let names: Vec<&str> = groups.iter().map(String::as_str).collect();
                Self::draw_legend(&mut chart, &names)?;
            }
        }
        Ok(())
    }

    fn draw_message(area: &Canvas<'_>, config: &RenderConfig, message: &str) -> Result<()> {
        let (width, height) = area.dim_in_pixel();
        area.draw(&Text::new(
            message,
            (width as i32 / 2, height as i32 / 2),
            TextStyle::from((FONT, config.title_font_size).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PlotKind;

    fn line_figure() -> Figure {
        Figure::new(
            PlotKind::Line,
            None,
            FigureData::Xy {
                style: XyStyle::Lines,
                x_categories: None,
                traces: vec![
                    XyTrace {
                        name: "north".to_string(),
                        points: vec![(0.0, 1.0), (1.0, 2.0)],
                    },
                    XyTrace {
                        name: "south".to_string(),
                        points: vec![(0.0, 2.0), (1.0, 0.5)],
                    },
                ],
            },
        )
    }

    #[test]
    fn test_render_includes_title_and_legend() {
        let svg = StaticChartRenderer::render_svg(&line_figure(), &RenderConfig::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Line Plot"));
        assert!(svg.contains("north"));
        assert!(svg.contains("south"));
    }

    #[test]
    fn test_render_respects_canvas_size() {
        let config = RenderConfig::default().with_size(640, 480);
        let svg = StaticChartRenderer::render_svg(&line_figure(), &config).unwrap();
        assert!(svg.contains("width=\"640\""));
        assert!(svg.contains("height=\"480\""));
    }

    #[test]
    fn test_render_matrix_annotations() {
        let figure = Figure::new(
            PlotKind::Correlation,
            None,
            FigureData::Matrix {
                labels: vec!["a".to_string(), "b".to_string()],
                values: vec![vec![1.0, -0.25], vec![-0.25, 1.0]],
            },
        );
        let svg = StaticChartRenderer::render_svg(&figure, &RenderConfig::default()).unwrap();
        assert!(svg.contains("1.00"));
        assert!(svg.contains("-0.25"));
    }

    #[test]
    fn test_render_empty_matrix() {
        let figure = Figure::new(
            PlotKind::ScatterMatrix,
            None,
            FigureData::ScatterMatrix {
                columns: Vec::new(),
                values: Vec::new(),
                groups: vec![String::new()],
                row_groups: Vec::new(),
            },
        );
        let svg = StaticChartRenderer::render_svg(&figure, &RenderConfig::default()).unwrap();
        assert!(svg.contains("No numeric columns"));
    }

    #[test]
    fn test_step_path_doubles_corners() {
        let path = StaticChartRenderer::step_path(&[(1.0, 0.5), (2.0, 1.0)]);
        assert_eq!(path, vec![(1.0, 0.5), (2.0, 0.5), (2.0, 1.0)]);
    }

    #[test]
    fn test_category_label_only_on_integers() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(StaticChartRenderer::category_label(&labels, 1.0), "b");
        assert_eq!(StaticChartRenderer::category_label(&labels, 0.5), "");
        assert_eq!(StaticChartRenderer::category_label(&labels, 5.0), "");
    }
}
