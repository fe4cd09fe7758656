//! Two-column text import (CSV, TSV, semicolon separated).

use crate::error::{PlotError, Result};
use std::path::{Path, PathBuf};

/// Imported table contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTable {
    /// Where the data came from.
    pub path: PathBuf,
    /// Header strings, if the first record was a header.
    pub header: Option<(String, String)>,
    /// Data rows as raw text.
    pub rows: Vec<(String, String)>,
}

/// Tabular file reader.
#[derive(Debug)]
pub struct TableReader;

impl TableReader {
    /// Read a two-column table from disk.
    pub fn read_file(path: &Path) -> Result<ImportedTable> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlotError::file_open(path.to_path_buf(), e))?;

        let delimiter = match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
            "tsv" | "tab" => '\t',
            _ => Self::sniff_delimiter(&text),
        };

        let mut table = Self::parse(&text, delimiter)?;
        if table.rows.is_empty() {
            return Err(PlotError::EmptyImport {
                path: path.to_path_buf(),
            });
        }
        table.path = path.to_path_buf();

        tracing::info!(
            "Imported {} rows from {} (header: {})",
            table.rows.len(),
            path.display(),
            table.header.is_some()
        );
        Ok(table)
    }

    /// Parse table text. Every non-blank record must have exactly two columns;
    /// otherwise nothing is returned.
    pub fn parse(text: &str, delimiter: char) -> Result<ImportedTable> {
        let mut records = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<String> = line.split(delimiter).map(clean_cell).collect();
            if cells.len() != 2 {
                return Err(PlotError::ImportFormat {
                    line: idx + 1,
                    columns: cells.len(),
                });
            }
            let mut cells = cells.into_iter();
            let x = cells.next().unwrap_or_default();
            let y = cells.next().unwrap_or_default();
            records.push((x, y));
        }

        let header = match records.first() {
            Some((x, y)) if !is_number(x) && !is_number(y) => Some(records.remove(0)),
            _ => None,
        };

        Ok(ImportedTable {
            path: PathBuf::new(),
            header,
            rows: records,
        })
    }

    fn sniff_delimiter(text: &str) -> char {
        let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        if first.contains('\t') {
            '\t'
        } else if first.contains(';') && !first.contains(',') {
            ';'
        } else {
            ','
        }
    }
}

fn clean_cell(cell: &str) -> String {
    let cell = cell.trim();
    cell.strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .unwrap_or(cell)
        .trim()
        .to_string()
}

fn is_number(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_becomes_labels() {
        let table = TableReader::parse("time,\"distance\"\n0,0\n1,2\n", ',').unwrap();
        assert_eq!(
            table.header,
            Some(("time".to_string(), "distance".to_string()))
        );
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn no_header_keeps_first_row() {
        let table = TableReader::parse("0;0\n\n1;2\n", ';').unwrap();
        assert!(table.header.is_none());
        assert_eq!(table.rows[0], ("0".to_string(), "0".to_string()));
    }

    #[test]
    fn half_numeric_first_row_stays_data() {
        let table = TableReader::parse("1,2x\n2,3\n3,4\n", ',').unwrap();
        assert!(table.header.is_none());
        assert_eq!(table.rows.len(), 3);

        let out = crate::data::normalize(
            table.rows.iter().map(|(x, y)| (x.as_str(), y.as_str())),
        );
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].row, 1);
    }

    #[test]
    fn wrong_column_count_rejects_everything() {
        let err = TableReader::parse("0,0\n1,2,3\n", ',').unwrap_err();
        assert!(matches!(
            err,
            PlotError::ImportFormat {
                line: 2,
                columns: 3
            }
        ));
    }

    #[test]
    fn sniffs_delimiters() {
        assert_eq!(TableReader::sniff_delimiter("a\tb\n"), '\t');
        assert_eq!(TableReader::sniff_delimiter("1;2\n"), ';');
        assert_eq!(TableReader::sniff_delimiter("1,2\n"), ',');
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        std::fs::write(&path, "x\ty\n1\t2\n").unwrap();

        let table = TableReader::read_file(&path).unwrap();
        assert_eq!(table.path, path);
        assert_eq!(table.rows, vec![("1".to_string(), "2".to_string())]);
    }

    #[test]
    fn header_only_file_is_empty_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "x,y\n").unwrap();
        assert!(matches!(
            TableReader::read_file(&path),
            Err(PlotError::EmptyImport { .. })
        ));
    }
}
