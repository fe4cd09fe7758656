//! Data entry and representation.
//!
//! This module turns the free-text entry grid into a clean, x-sorted point
//! set and handles importing two-column tables.

mod grid;
mod import;
mod point;

pub use grid::{Column, EntryGrid};
pub use import::{ImportedTable, TableReader};
pub use point::{normalize, Normalized, Point, PointSet, RowIssue, RowProblem};
