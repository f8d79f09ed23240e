//! Stats module - Figure-level statistical computations

mod calculator;

pub use calculator::{BoxStats, StatsCalculator, WHISKER_IQR};
