//! The immutable shopping trends dataset.
//!
//! A [`Dataset`] wraps a polars `DataFrame` that has passed schema
//! validation. It never changes after construction; every summary view is
//! computed from it on demand.

mod cache;
mod loader;
mod schema;

pub use cache::DatasetCache;
pub use loader::{SourceFormat, frame_from_csv_str, frame_from_json_str, load_frame};
pub use schema::{CategoricalColumn, Column, NumericColumn};

use crate::error::Result;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// The loaded, validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Load a CSV or JSON file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            frame: load_frame(path)?,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap an in-memory frame, validating its schema.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        Ok(Self {
            frame: loader::normalize_schema(frame)?,
            source: None,
        })
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Ok(Self {
            frame: frame_from_csv_str(text)?,
            source: None,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self {
            frame: frame_from_json_str(text)?,
            source: None,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Path the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub(crate) fn series(&self, column: Column) -> Result<&Series> {
        Ok(self.frame.column(column.header())?.as_materialized_series())
    }

    /// Values of a column rendered as strings; nulls stay `None`.
    pub(crate) fn labels(&self, column: Column) -> Result<Vec<Option<String>>> {
        let casted = self.series(column)?.cast(&DataType::String)?;
        Ok(casted
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Values of a column as floats; nulls and unparseable values are `None`.
    pub(crate) fn numbers(&self, column: Column) -> Result<Vec<Option<f64>>> {
        let casted = self.series(column)?.cast(&DataType::Float64)?;
        Ok(casted.f64()?.into_iter().collect())
    }
}
