//! usage-core: Core library for aggregating FPGA utilization reports
//!
//! This library provides functionality to:
//! - Scan a directory for per-cell Vivado utilization reports
//! - Extract the bordered ASCII tables inside each report
//! - Merge per-cell tables with differing resource sets into one matrix
//! - Export the matrix (and its transpose) as CSV

pub mod error;
pub mod export;
pub mod extractor;
pub mod layout;
pub mod merger;
pub mod parser;
pub mod scanner;
pub mod table;

pub use error::{Error, Result};
pub use export::{export_all, write_csv, write_csv_file, ExportResult};
pub use extractor::try_read_table;
pub use layout::ReportLayout;
pub use merger::{build_matrix, Matrix, MatrixBuilder, MatrixRow};
pub use parser::{extract_all_tables, parse_report, parse_report_str};
pub use scanner::{scan_directory, ReportFile, ScanResult};
pub use table::{CellValue, EntityTable, TablePair};
