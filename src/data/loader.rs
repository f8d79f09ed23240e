//! CSV Data Loader Module
//! Reads the frame a plot request runs against.

use crate::data::DataProcessor;
use crate::Result;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Rows scanned when inferring column types.
pub const SCHEMA_INFERENCE_ROWS: usize = 10_000;

/// Loads CSV files into Polars frames.
pub struct DataLoader;

impl DataLoader {
    /// Read `path` with type inference; malformed cells become nulls.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
            .into());
        }

        let frame = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        debug!(
            path = %path.display(),
            rows = frame.height(),
            numeric = DataProcessor::numeric_columns(&frame).len(),
            "csv loaded"
        );
        Ok(frame)
    }
}
