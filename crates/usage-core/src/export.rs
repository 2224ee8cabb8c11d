//! CSV export of an aggregated matrix
//!
//! The first column holds the row labels and has an empty header, so the
//! files load straight into a spreadsheet or dataframe with the entity (or
//! resource key) as the index.

use crate::error::{Error, Result};
use crate::merger::Matrix;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the entity-by-resource table
pub const MATRIX_FILE_NAME: &str = "all_cells_util.csv";
/// File name of the resource-by-entity table
pub const TRANSPOSED_FILE_NAME: &str = "all_cells_util_transposed.csv";

/// Paths written by [`export_all`]
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub matrix: PathBuf,
    pub transposed: PathBuf,
}

/// Write a matrix as CSV to any writer
pub fn write_csv<W: Write>(matrix: &Matrix, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.column_count() + 1);
    header.push("");
    header.extend(matrix.columns.iter().map(String::as_str));
    csv_writer.write_record(&header)?;

    for row in &matrix.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.label.clone());
        record.extend(row.cells.iter().map(|c| c.to_string()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a matrix as CSV to a file
pub fn write_csv_file<P: AsRef<Path>>(matrix: &Matrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(matrix, std::io::BufWriter::new(file)).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the matrix and its transpose into `output_dir`
pub fn export_all<P: AsRef<Path>>(matrix: &Matrix, output_dir: P) -> Result<ExportResult> {
    let output_dir = output_dir.as_ref();

    let matrix_path = output_dir.join(MATRIX_FILE_NAME);
    write_csv_file(matrix, &matrix_path)?;

    let transposed_path = output_dir.join(TRANSPOSED_FILE_NAME);
    write_csv_file(&matrix.transposed(), &transposed_path)?;

    Ok(ExportResult {
        matrix: matrix_path,
        transposed: transposed_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merger::build_matrix;
    use crate::table::{EntityTable, TablePair};

    fn sample() -> Matrix {
        build_matrix(vec![
            EntityTable::new(
                "adder",
                vec![
                    TablePair::new("3Slice LUTs", "27"),
                    TablePair::new("3Slice Registers", "13"),
                ],
            ),
            EntityTable::new(
                "mux",
                vec![
                    TablePair::new("3Slice LUTs", "5"),
                    TablePair::new("2Block RAM Tile", "0.5"),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ",2Block RAM Tile,3Slice LUTs,3Slice Registers\n\
             adder,0,27,13\n\
             mux,0.5,5,0\n"
        );
    }

    #[test]
    fn test_write_transposed_csv() {
        let mut out = Vec::new();
        write_csv(&sample().transposed(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ",adder,mux\n\
             2Block RAM Tile,0,0.5\n\
             3Slice LUTs,27,5\n\
             3Slice Registers,13,0\n"
        );
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let matrix = build_matrix(vec![EntityTable::new(
            "a",
            vec![TablePair::new("1Flop, Latch", "2")],
        )])
        .unwrap();

        let mut out = Vec::new();
        write_csv(&matrix, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with(",\"1Flop, Latch\"\n"));
    }

    #[test]
    fn test_export_all() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_all(&sample(), dir.path()).unwrap();

        assert_eq!(result.matrix, dir.path().join(MATRIX_FILE_NAME));
        let transposed = std::fs::read_to_string(&result.transposed).unwrap();
        assert!(transposed.starts_with(",adder,mux\n"));
    }
}
