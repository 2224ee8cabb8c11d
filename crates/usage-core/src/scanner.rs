//! Directory scanner for discovering per-cell utilization reports
//!
//! Reports are produced by Vivado with
//! `report_utilization -cells $i -file cell_${i}_util.txt`, so the entity
//! name sits between a fixed prefix and suffix.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// File name prefix of a per-cell report
pub const REPORT_PREFIX: &str = "cell_";
/// File name suffix of a per-cell report
pub const REPORT_SUFFIX: &str = "_util.txt";

/// A report file and the entity it describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Entity (cell) name recovered from the file name
    pub entity: String,
}

/// Result of scanning a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Directory that was scanned
    pub root: PathBuf,
    /// Discovered reports, sorted by file name
    pub reports: Vec<ReportFile>,
}

impl ScanResult {
    /// Find a report by entity name
    pub fn find_report(&self, entity: &str) -> Option<&ReportFile> {
        self.reports.iter().find(|r| r.entity == entity)
    }

    /// Get all entity names
    pub fn entity_names(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.entity.as_str()).collect()
    }
}

/// Scan a directory (not its subdirectories) for `cell_<entity>_util.txt`
/// reports
pub fn scan_directory<P: AsRef<Path>>(root: P) -> Result<ScanResult> {
    let root = root.as_ref();
    let mut reports = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };

        match entity_name(file_name) {
            Some(entity) if !entity.is_empty() => reports.push(ReportFile {
                path: entry.path().to_path_buf(),
                entity: entity.to_string(),
            }),
            Some(_) => warn!(file = file_name, "report file has an empty cell name, skipping"),
            None => {}
        }
    }

    Ok(ScanResult {
        root: root.to_path_buf(),
        reports,
    })
}

/// Extract the entity name from a report file name
///
/// Examples:
/// - "cell_adder_util.txt" -> Some("adder")
/// - "cell_u_core_util.txt" -> Some("u_core")
/// - "all_cells_util.csv" -> None
fn entity_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(REPORT_PREFIX)?
        .strip_suffix(REPORT_SUFFIX)
}
