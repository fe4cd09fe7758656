//! Error types for Curvy.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Curvy operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur in Curvy.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Fewer than two valid points were available.
    #[error("Please enter at least two valid data points (found {found})")]
    InsufficientData { found: usize },

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An import source did not have exactly two columns.
    #[error("Import error on line {line}: expected 2 columns, found {columns}")]
    ImportFormat { line: usize, columns: usize },

    /// An import source had no data rows.
    #[error("Import error: no data rows in {path}")]
    EmptyImport { path: PathBuf },

    /// Math-mode label rendering is not available on this surface.
    #[error("Math-mode rendering unavailable: {0}")]
    MathUnavailable(String),

    /// Nothing has been plotted yet.
    #[error("Nothing to export, plot some data first")]
    NothingToExport,

    /// Raster/vector export failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl PlotError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an InsufficientData error.
    pub fn insufficient(found: usize) -> Self {
        Self::InsufficientData { found }
    }

    /// Create an Export error from any displayable backend error.
    pub fn export(err: impl std::fmt::Display) -> Self {
        Self::Export(err.to_string())
    }
}
