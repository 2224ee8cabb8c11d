//! Bordered ASCII table extractor
//!
//! Reads one table of the form
//!
//! ```text
//! +-------------------------+------+-------+-----------+-------+
//! |        Site Type        | Used | Fixed | Available | Util% |
//! +-------------------------+------+-------+-----------+-------+
//! | Slice LUTs              |   27 |     0 |     46200 |  0.06 |
//! |   LUT as Logic          |   27 |     0 |     46200 |  0.06 |
//! +-------------------------+------+-------+-----------+-------+
//! ```
//!
//! and returns one `(name, used)` pair per data row.

use crate::layout::ReportLayout;
use crate::table::TablePair;
use tracing::{debug, warn};

/// Positions of the columns we read from a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnPositions {
    name: usize,
    used: usize,
}

/// Try to read a table whose top border is at `start`.
///
/// Returns the pairs found (keys are bare resource names, without a section
/// prefix) and the index of the first line after the table. If `start` is
/// not a border line, returns no pairs and `start` unchanged.
///
/// A table whose header lacks a recognized name column or the used column is
/// skipped: its body is consumed but no pairs are produced.
pub fn try_read_table<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    layout: &ReportLayout,
) -> (Vec<TablePair>, usize) {
    let mut pairs = Vec::new();

    let is_table = lines
        .get(start)
        .map(|l| l.as_ref().trim())
        .is_some_and(|l| l.starts_with(layout.border));
    if !is_table {
        return (pairs, start);
    }

    let Some(header_line) = lines.get(start + 1) else {
        return (pairs, start);
    };
    let headers = split_row(header_line.as_ref(), layout.separator);
    let positions = find_columns(&headers, layout);
    if positions.is_none() {
        debug!(line = start + 1, ?headers, "skipping table with unrecognized header");
    }

    // Skip the header and the rule under it
    let mut index = (start + 3).min(lines.len());
    while index < lines.len() {
        let line = lines[index].as_ref().trim();
        if line.is_empty() || line.starts_with(layout.border) {
            return (pairs, index + 1);
        }

        if let Some(pos) = positions {
            let cells = split_row(line, layout.separator);
            match (cells.get(pos.name), cells.get(pos.used)) {
                (Some(name), Some(used)) => pairs.push(TablePair::new(*name, *used)),
                _ => warn!(line = index, "table row has too few cells, skipping"),
            }
        }

        index += 1;
    }

    (pairs, index)
}

/// Split a table row into trimmed cells, dropping the outer separators
fn split_row(line: &str, separator: char) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix(separator).unwrap_or(line);
    let line = line.strip_suffix(separator).unwrap_or(line);
    line.split(separator).map(str::trim).collect()
}

/// Locate the name and used columns in a header
fn find_columns(headers: &[&str], layout: &ReportLayout) -> Option<ColumnPositions> {
    let name = layout
        .name_columns
        .iter()
        .find_map(|label| headers.iter().position(|h| h == label))?;
    let used = headers.iter().position(|h| *h == layout.used_column)?;
    Some(ColumnPositions { name, used })
}
