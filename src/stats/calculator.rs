//! Statistics Calculator Module
//! Figure-level statistics: quartiles, bins, correlations, kernel densities and contours.

use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Tukey box summary of one distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within q1 - 1.5 IQR.
    pub lower_whisker: f64,
    /// Largest observation within q3 + 1.5 IQR.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    /// Compute the box summary of a sample. `None` for an empty sample.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence);
        let (lower_whisker, upper_whisker) = inside.fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        );
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            mean: values.iter().mean(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Min and max of a sample, ignoring NaN. `None` when nothing is finite.
    pub fn extent<'a, I>(values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// `nbins + 1` equal-width bin edges spanning `[min, max]`.
    pub fn bin_edges(min: f64, max: f64, nbins: usize) -> Vec<f64> {
        let nbins = nbins.max(1);
        let (min, max) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let width = (max - min) / nbins as f64;
        (0..=nbins).map(|i| min + width * i as f64).collect()
    }

    /// Index of the bin containing `value`; the last bin is closed on the right.
    pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
        let nbins = edges.len().checked_sub(1)?;
        let (min, max) = (*edges.first()?, *edges.last()?);
        if nbins == 0 || !(min..=max).contains(&value) {
            return None;
        }
        let width = (max - min) / nbins as f64;
        Some((((value - min) / width).floor() as usize).min(nbins - 1))
    }

    /// Pearson correlation over the rows where both columns are present.
    pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
        let (a, b): (Vec<f64>, Vec<f64>) = xs
            .iter()
            .zip(ys)
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .unzip();
        if a.len() < 2 {
            return f64::NAN;
        }

        let covariance = a.iter().covariance(b.iter());
        covariance / (a.iter().std_dev() * b.iter().std_dev())
    }

    /// Pairwise Pearson matrix; each column is one row-aligned sample.
    pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Vec<Vec<f64>> {
        let n = columns.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i..n).map(move |j| (i, j)))
            .collect();

        // Use rayon for parallel computation
        let coefficients: Vec<((usize, usize), f64)> = pairs
            .par_iter()
            .map(|&(i, j)| ((i, j), Self::pearson(&columns[i], &columns[j])))
            .collect();

        let mut matrix = vec![vec![f64::NAN; n]; n];
        for ((i, j), r) in coefficients {
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
        matrix
    }

    /// Scott's rule bandwidth for a Gaussian kernel in `dims` dimensions.
    pub fn scott_bandwidth(values: &[f64], dims: i32) -> f64 {
        let n = values.len();
        let std = if n > 1 { values.iter().std_dev() } else { 0.0 };
        if !(std.is_finite() && std > 0.0) {
            return 1.0;
        }
        std * (n as f64).powf(-1.0 / (dims as f64 + 4.0))
    }

    /// `count` evenly spaced points from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count).map(|i| start + step * i as f64).collect()
            }
        }
    }

    fn standard_normal() -> Normal {
        Normal::standard()
    }

    /// Gaussian KDE evaluated on `points` samples spanning the data padded by two bandwidths.
    pub fn kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
        let Some((min, max)) = Self::extent(values) else {
            return Vec::new();
        };
        let h = Self::scott_bandwidth(values, 1);
        let kernel = Self::standard_normal();
        let norm = values.len() as f64 * h;

        Self::linspace(min - 2.0 * h, max + 2.0 * h, points)
            .into_iter()
            .map(|x| {
                let density = values.iter().map(|v| kernel.pdf((x - v) / h)).sum::<f64>() / norm;
                (x, density)
            })
            .collect()
    }

    /// 2-D Gaussian KDE with a diagonal Scott bandwidth.
    ///
    /// Returns the x grid, the y grid and `density[yi][xi]`.
    pub fn kde_2d(
        points: &[(f64, f64)],
        resolution: usize,
    ) -> Option<(Vec<f64>, Vec<f64>, Vec<Vec<f64>>)> {
        if points.is_empty() {
            return None;
        }
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (x_min, x_max) = Self::extent(&xs)?;
        let (y_min, y_max) = Self::extent(&ys)?;
        let hx = Self::scott_bandwidth(&xs, 2);
        let hy = Self::scott_bandwidth(&ys, 2);

        let x_grid = Self::linspace(x_min - 2.0 * hx, x_max + 2.0 * hx, resolution);
        let y_grid = Self::linspace(y_min - 2.0 * hy, y_max + 2.0 * hy, resolution);
        let kernel = Self::standard_normal();
        let norm = points.len() as f64 * hx * hy;

        let density: Vec<Vec<f64>> = y_grid
            .par_iter()
            .map(|&gy| {
                x_grid
                    .iter()
                    .map(|&gx| {
                        points
                            .iter()
                            .map(|&(px, py)| kernel.pdf((gx - px) / hx) * kernel.pdf((gy - py) / hy))
                            .sum::<f64>()
                            / norm
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        Some((x_grid, y_grid, density))
    }

    /// Empirical CDF: sorted values paired with the cumulative fraction `(i + 1) / n`.
    pub fn ecdf(values: &[f64]) -> Vec<(f64, f64)> {
        let sorted = Self::sorted(values);
        let n = sorted.len() as f64;
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, (i + 1) as f64 / n))
            .collect()
    }

    /// `count` iso-levels evenly spaced strictly between 0 and `max`.
    pub fn contour_levels(max: f64, count: usize) -> Vec<f64> {
        if !(max.is_finite() && max > 0.0) {
            return Vec::new();
        }
        (1..=count)
            .map(|k| max * k as f64 / (count + 1) as f64)
            .collect()
    }

    /// Marching squares: line segments where `grid[yi][xi]` crosses `level`.
    pub fn contour_segments(
        x_grid: &[f64],
        y_grid: &[f64],
        grid: &[Vec<f64>],
        level: f64,
    ) -> Vec<[(f64, f64); 2]> {
        let mut segments = Vec::new();
        let crossing = |(x0, y0, v0): (f64, f64, f64), (x1, y1, v1): (f64, f64, f64)| {
            if (v0 >= level) == (v1 >= level) {
                return None;
            }
            let t = (level - v0) / (v1 - v0);
            Some((x0 + t * (x1 - x0), y0 + t * (y1 - y0)))
        };

        for j in 0..y_grid.len().saturating_sub(1) {
            for i in 0..x_grid.len().saturating_sub(1) {
                let bl = (x_grid[i], y_grid[j], grid[j][i]);
                let br = (x_grid[i + 1], y_grid[j], grid[j][i + 1]);
                let tr = (x_grid[i + 1], y_grid[j + 1], grid[j + 1][i + 1]);
                let tl = (x_grid[i], y_grid[j + 1], grid[j + 1][i]);

                // Edge order: bottom, right, top, left
                let edges = [
                    crossing(bl, br),
                    crossing(br, tr),
                    crossing(tl, tr),
                    crossing(bl, tl),
                ];
                let hits: Vec<(f64, f64)> = edges.iter().flatten().copied().collect();

                match hits.as_slice() {
                    [a, b] => segments.push([*a, *b]),
                    [bottom, right, top, left] => {
                        // Saddle: the cell center decides which corners connect
                        let center = (bl.2 + br.2 + tr.2 + tl.2) / 4.0;
                        if (center >= level) == (bl.2 >= level) {
                            segments.push([*bottom, *right]);
                            segments.push([*top, *left]);
                        } else {
                            segments.push([*bottom, *left]);
                            segments.push([*right, *top]);
                        }
                    }
                    _ => {}
                }
            }
        }

        segments
    }
}
