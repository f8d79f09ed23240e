//! Data Processor Module
//! Extracts plot-ready values from DataFrame columns.

use crate::{ChartError, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// Distinct labels of a column in first-appearance order, plus the label index of every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Categories {
    pub names: Vec<String>,
    /// One entry per row; `None` for null cells.
    pub codes: Vec<Option<usize>>,
}

impl Categories {
    /// A single unnamed category covering `len` rows.
    pub fn single(len: usize) -> Self {
        Self {
            names: vec![String::new()],
            codes: vec![Some(0); len],
        }
    }

    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let codes = labels
            .into_iter()
            .map(|label| {
                let label = label?;
                if let Some(&code) = index.get(label) {
                    return Some(code);
                }
                let code = names.len();
                names.push(label.to_string());
                index.insert(label.to_string(), code);
                Some(code)
            })
            .collect();

        Self { names, codes }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Handles column extraction and grouping operations.
pub struct DataProcessor;

impl DataProcessor {
    pub fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    /// Whether `column` exists and holds numbers.
    pub fn is_numeric_column(df: &DataFrame, column: &str) -> Result<bool> {
        Ok(Self::is_numeric(df.column(column)?.dtype()))
    }

    /// Names of the numeric columns, in frame order.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| Self::is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Numeric values of a column, one per row. Nulls and NaN become `None`.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
        let series = df.column(column)?;
        if !Self::is_numeric(series.dtype()) {
            return Err(ChartError::NonNumericColumn {
                column: column.to_string(),
                dtype: series.dtype().to_string(),
            });
        }

        let values = series.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Numeric values of a column with nulls and NaN dropped.
    pub fn finite_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        Ok(Self::numeric_values(df, column)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Treat a column as categorical, whatever its dtype.
    pub fn categories(df: &DataFrame, column: &str) -> Result<Categories> {
        let series = df.column(column)?;
        let labels = series.cast(&DataType::String)?;
        let ca = labels.str()?;
        Ok(Categories::from_labels(ca.into_iter()))
    }

    /// Categories of the `color` column, or one unnamed group when no color is set.
    pub fn color_groups(df: &DataFrame, color: Option<&str>) -> Result<Categories> {
        match color {
            Some(column) => Self::categories(df, column),
            None => Ok(Categories::single(df.height())),
        }
    }

    /// Values of an axis column: numeric columns map directly, others map to category indices.
    pub fn axis_values(
        df: &DataFrame,
        column: &str,
    ) -> Result<(Vec<Option<f64>>, Option<Vec<String>>)> {
        if Self::is_numeric_column(df, column)? {
            return Ok((Self::numeric_values(df, column)?, None));
        }

        let categories = Self::categories(df, column)?;
        let values = categories
            .codes
            .iter()
            .map(|code| code.map(|c| c as f64))
            .collect();
        Ok((values, Some(categories.names)))
    }

    /// Resolve an explicit column subset, or default to every numeric column.
    pub fn resolve_columns(df: &DataFrame, columns: Option<&[String]>) -> Vec<String> {
        match columns {
            Some(columns) => columns.to_vec(),
            None => Self::numeric_columns(df),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "age" => [19i64, 18, 28, 33],
            "sex" => ["female", "male", "male", "female"],
            "bmi" => [Some(27.9), None, Some(33.0), Some(f64::NAN)],
            "smoker" => [true, false, false, true],
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_columns_in_frame_order() {
        assert_eq!(DataProcessor::numeric_columns(&sample()), vec!["age", "bmi"]);
    }

    #[test]
    fn test_numeric_values_drop_null_and_nan() {
        let values = DataProcessor::numeric_values(&sample(), "bmi").unwrap();
        assert_eq!(values, vec![Some(27.9), None, Some(33.0), None]);
        let finite = DataProcessor::finite_values(&sample(), "age").unwrap();
        assert_eq!(finite, vec![19.0, 18.0, 28.0, 33.0]);
    }

    #[test]
    fn test_non_numeric_column_is_rejected() {
        let err = DataProcessor::numeric_values(&sample(), "sex").unwrap_err();
        assert!(matches!(err, ChartError::NonNumericColumn { ref column, .. } if column == "sex"));
    }

    #[test]
    fn test_missing_column_propagates_polars_error() {
        let err = DataProcessor::numeric_values(&sample(), "nope").unwrap_err();
        assert!(matches!(err, ChartError::Polars(_)));
    }

    #[test]
    fn test_categories_keep_first_appearance_order() {
        let categories = DataProcessor::categories(&sample(), "sex").unwrap();
        assert_eq!(categories.names, vec!["female", "male"]);
        assert_eq!(categories.codes, vec![Some(0), Some(1), Some(1), Some(0)]);
    }

    #[test]
    fn test_axis_values_for_categorical_column() {
        let (values, labels) = DataProcessor::axis_values(&sample(), "smoker").unwrap();
        assert_eq!(labels, Some(vec!["true".to_string(), "false".to_string()]));
        assert_eq!(values, vec![Some(0.0), Some(1.0), Some(1.0), Some(0.0)]);
    }

    #[test]
    fn test_is_numeric_column() {
        assert!(DataProcessor::is_numeric_column(&sample(), "bmi").unwrap());
        assert!(!DataProcessor::is_numeric_column(&sample(), "sex").unwrap());
        assert!(DataProcessor::is_numeric_column(&sample(), "nope").is_err());
    }

    #[test]
    fn test_color_groups_without_color_is_single_group() {
        let groups = DataProcessor::color_groups(&sample(), None).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.codes, vec![Some(0); 4]);
    }
}
