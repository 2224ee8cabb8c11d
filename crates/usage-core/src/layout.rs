//! Report layout settings
//!
//! Describes the shape of a utilization report: which characters draw the
//! tables, where a section's table sits relative to its heading, and which
//! header labels identify the name and value columns. The defaults match
//! Vivado `report_utilization` output; a JSON file can override any field.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Layout of the tables inside a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Character that starts every border rule (`+----+`)
    pub border: char,
    /// Column separator inside header and data rows
    pub separator: char,
    /// Number of lines between a section heading and its table's top border
    pub table_offset: usize,
    /// Header labels accepted for the resource name column, in priority order
    pub name_columns: Vec<String>,
    /// Header label of the value column
    pub used_column: String,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            border: '+',
            separator: '|',
            table_offset: 3,
            name_columns: vec!["Ref Name".to_string(), "Site Type".to_string()],
            used_column: "Used".to_string(),
        }
    }
}

impl ReportLayout {
    /// Load a layout from JSON. Missing fields take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let layout: ReportLayout = serde_json::from_str(&content)?;

        layout.validate().map_err(|message| Error::LayoutConfig {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(layout)
    }

    /// Save the layout to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that the layout can describe a table at all
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.table_offset == 0 {
            return Err("table_offset must be at least 1".to_string());
        }
        if self.border == self.separator {
            return Err(format!(
                "border and separator must differ (both '{}')",
                self.border
            ));
        }
        if self.border.is_whitespace() || self.separator.is_whitespace() {
            return Err("border and separator cannot be whitespace".to_string());
        }
        if self.name_columns.iter().all(|c| c.trim().is_empty()) {
            return Err("at least one name column label is required".to_string());
        }
        if self.used_column.trim().is_empty() {
            return Err("used_column cannot be empty".to_string());
        }
        Ok(())
    }

    /// Whether a line (after trimming) opens or closes a table
    pub fn is_border(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.border)
    }
}
