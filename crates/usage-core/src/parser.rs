//! Section scanner for utilization reports
//!
//! A report is narrative text with numbered sections ("1. Slice Logic",
//! "3.1 Memory"), most of which hold one table a fixed number of lines below
//! the heading. The table of contents repeats the same headings with no table
//! under them, which is how the two are told apart.

use crate::error::{Error, Result};
use crate::extractor::try_read_table;
use crate::layout::ReportLayout;
use crate::table::{EntityTable, TablePair};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

static SECTION_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9.]+)\s+(.*)").expect("section heading regex is valid"));

/// Extract every recognized table in a report, keys prefixed with their
/// section id (e.g. "3" + "Slice LUTs" -> "3Slice LUTs").
pub fn extract_all_tables<S: AsRef<str>>(lines: &[S], layout: &ReportLayout) -> Vec<TablePair> {
    let mut all_pairs = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(section) = section_id(lines[i].as_ref()) else {
            i += 1;
            continue;
        };

        let table_start = i.checked_add(layout.table_offset).filter(|&start| {
            lines
                .get(start)
                .is_some_and(|l| layout.is_border(l.as_ref()))
        });
        let Some(table_start) = table_start else {
            debug!(line = i, section, "heading has no table below it");
            i += 1;
            continue;
        };

        let (pairs, next) = try_read_table(lines, table_start, layout);
        all_pairs.extend(
            pairs
                .into_iter()
                .map(|p| TablePair::new(format!("{}{}", section, p.key), p.value)),
        );
        i = next.max(i + 1);
    }

    all_pairs
}

/// Parse the text of one report into an entity table
pub fn parse_report_str(content: &str, entity: &str, layout: &ReportLayout) -> EntityTable {
    let lines: Vec<&str> = content.lines().collect();
    EntityTable::new(entity, extract_all_tables(&lines, layout))
}

/// Read and parse one report file
pub fn parse_report<P: AsRef<Path>>(
    path: P,
    entity: &str,
    layout: &ReportLayout,
) -> Result<EntityTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let table = parse_report_str(&content, entity, layout);
    debug!(
        path = %path.display(),
        entity,
        pairs = table.pair_count(),
        "parsed report"
    );
    Ok(table)
}

/// Section id of a heading line, if it is one. The trailing dot of a
/// top-level heading ("3. Memory") is not part of the id.
fn section_id(line: &str) -> Option<&str> {
    SECTION_HEADING_RE
        .captures(line.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Copyright 1986-2022 Xilinx, Inc. All Rights Reserved.
---------------------------------------------------------------------
| Design       : top
---------------------------------------------------------------------

Utilization Design Information

Table of Contents
-----------------
1. Slice Logic
1.1 Summary of Registers by Type
2. Memory
3. Primitives

1. Slice Logic
--------------

+-------------------------+------+-------+-----------+-------+
|        Site Type        | Used | Fixed | Available | Util% |
+-------------------------+------+-------+-----------+-------+
| Slice LUTs              |   27 |     0 |     46200 |  0.06 |
| Slice Registers         |   13 |     0 |     92400 |  0.01 |
+-------------------------+------+-------+-----------+-------+


1.1 Summary of Registers by Type
--------------------------------

+-------+--------------+-------------+--------------+
| Total | Clock Enable | Synchronous | Asynchronous |
+-------+--------------+-------------+--------------+
| 0     |            _ |           - |            - |
+-------+--------------+-------------+--------------+


2. Memory
---------

+----------------+------+-------+-----------+-------+
|    Site Type   | Used | Fixed | Available | Util% |
+----------------+------+-------+-----------+-------+
| Block RAM Tile |  0.5 |     0 |        75 |  0.67 |
+----------------+------+-------+-----------+-------+


3. Primitives
-------------

+----------+------+---------------------+
| Ref Name | Used | Functional Category |
+----------+------+---------------------+
| LUT6     |   13 |                 LUT |
| FDRE     |   13 |        Flop & Latch |
+----------+------+---------------------+
";

    #[test]
    fn test_extract_all_tables() {
        let lines: Vec<&str> = REPORT.lines().collect();
        let pairs = extract_all_tables(&lines, &ReportLayout::default());

        assert_eq!(
            pairs,
            vec![
                TablePair::new("1Slice LUTs", "27"),
                TablePair::new("1Slice Registers", "13"),
                TablePair::new("2Block RAM Tile", "0.5"),
                TablePair::new("3LUT6", "13"),
                TablePair::new("3FDRE", "13"),
            ]
        );
    }

    #[test]
    fn test_section_prefix_has_no_separator() {
        let text = "\
3. Memory
---------

+-----------+------+-------+-----------+-------+
| Site Type | Used | Fixed | Available | Util% |
+-----------+------+-------+-----------+-------+
| Slice LUTs | 27 | 0 | 46200 | 0.06 |
+-----------+------+-------+-----------+-------+";
        let lines: Vec<&str> = text.lines().collect();
        let pairs = extract_all_tables(&lines, &ReportLayout::default());
        assert_eq!(pairs, vec![TablePair::new("3Slice LUTs", "27")]);
    }

    #[test]
    fn test_table_of_contents_is_ignored() {
        let text = "\
1. Slice Logic
2. Memory
3. Primitives
";
        let lines: Vec<&str> = text.lines().collect();
        assert!(extract_all_tables(&lines, &ReportLayout::default()).is_empty());
    }

    #[test]
    fn test_duplicate_keys_are_preserved() {
        let text = "\
1 Totals
-

+-----------+------+
| Site Type | Used |
+-----------+------+
| DSPs      |    2 |
| DSPs      |    5 |
+-----------+------+";
        let lines: Vec<&str> = text.lines().collect();
        let pairs = extract_all_tables(&lines, &ReportLayout::default());
        assert_eq!(
            pairs,
            vec![TablePair::new("1DSPs", "2"), TablePair::new("1DSPs", "5")]
        );
    }

    #[test]
    fn test_custom_table_offset() {
        let text = "\
4. Clocking
-----------
Narrative line.

+-----------+------+
| Site Type | Used |
+-----------+------+
| BUFGCTRL  |    1 |
+-----------+------+";
        let lines: Vec<&str> = text.lines().collect();

        // The default offset lands on the blank line and drops the section
        assert!(extract_all_tables(&lines, &ReportLayout::default()).is_empty());

        let layout = ReportLayout {
            table_offset: 4,
            ..ReportLayout::default()
        };
        assert_eq!(
            extract_all_tables(&lines, &layout),
            vec![TablePair::new("4BUFGCTRL", "1")]
        );
    }

    #[test]
    fn test_huge_table_offset_finds_nothing() {
        let lines = vec!["intro", "3. Memory", "+-----------+------+"];
        let layout = ReportLayout {
            table_offset: usize::MAX,
            ..ReportLayout::default()
        };
        assert!(extract_all_tables(&lines, &layout).is_empty());
    }

    #[test]
    fn test_section_id() {
        assert_eq!(section_id("3. Memory"), Some("3"));
        assert_eq!(section_id("  1.1 Summary of Registers"), Some("1.1"));
        assert_eq!(section_id("| Slice LUTs | 27 |"), None);
        assert_eq!(section_id("Table of Contents"), None);
        assert_eq!(section_id(". stray"), None);
    }

    #[test]
    fn test_parse_report_missing_file() {
        let err = parse_report("/nonexistent/cell_x_util.txt", "x", &ReportLayout::default())
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_parse_report_str() {
        let table = parse_report_str(REPORT, "top", &ReportLayout::default());
        assert_eq!(table.entity, "top");
        assert_eq!(table.pair_count(), 5);
    }
}
