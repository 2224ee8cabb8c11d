//! Merge engine for combining per-entity tables into one matrix
//!
//! Each entity reports its own set of resources, so the matrix columns are
//! the union of every key seen. Entities that do not report a resource get
//! the fill value `0` in that column.

use crate::error::{Error, Result};
use crate::table::{CellValue, EntityTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Aggregated utilization: one row per entity, one column per resource key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Column labels, sorted and unique
    pub columns: Vec<String>,
    /// Rows in entity insertion order
    pub rows: Vec<MatrixRow>,
}

impl Matrix {
    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column's index by name
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Find a row by its label
    pub fn find_row(&self, label: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Get a single cell
    pub fn get(&self, row: &str, column: &str) -> Option<CellValue> {
        let col = self.find_column(column)?;
        self.find_row(row).and_then(|r| r.cells.get(col)).copied()
    }

    /// Row labels in order
    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Swap rows and columns: resource keys become rows, entities become
    /// columns (in row order)
    pub fn transposed(&self) -> Matrix {
        let columns: Vec<String> = self.rows.iter().map(|r| r.label.clone()).collect();
        let rows = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, name)| MatrixRow {
                label: name.clone(),
                cells: self.rows.iter().map(|r| r.cells[col]).collect(),
            })
            .collect();

        Matrix { columns, rows }
    }
}

/// A labeled row of the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// Entity name (or resource key in a transposed matrix)
    pub label: String,
    /// One value per matrix column
    pub cells: Vec<CellValue>,
}

/// Builds a [`Matrix`] one entity at a time
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    columns: BTreeSet<String>,
    rows: Vec<(String, HashMap<String, CellValue>)>,
    entities: HashSet<String>,
}

impl MatrixBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities merged so far
    pub fn entity_count(&self) -> usize {
        self.rows.len()
    }

    /// Merge one entity's table. Repeated keys keep their first value.
    pub fn merge(&mut self, table: EntityTable) -> Result<()> {
        if !self.entities.insert(table.entity.clone()) {
            return Err(Error::DuplicateEntity(table.entity));
        }

        let entity = table.entity.clone();
        let (keys, values) = table.into_columns();

        let mut cells = HashMap::with_capacity(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            match CellValue::parse(&value) {
                Some(v) => {
                    cells.insert(key.clone(), v);
                }
                None => warn!(
                    entity = %entity,
                    key = %key,
                    value = %value,
                    "non-numeric usage value, using 0"
                ),
            }
            self.columns.insert(key);
        }

        debug!(entity = %entity, columns = self.columns.len(), "merged entity");
        self.rows.push((entity, cells));
        Ok(())
    }

    /// Finish the matrix: columns sorted, missing cells filled with 0
    pub fn finish(self) -> Result<Matrix> {
        if self.rows.is_empty() {
            return Err(Error::EmptyInput);
        }

        let columns: Vec<String> = self.columns.into_iter().collect();
        let rows = self
            .rows
            .into_iter()
            .map(|(label, cells)| MatrixRow {
                cells: columns
                    .iter()
                    .map(|c| cells.get(c).copied().unwrap_or(CellValue::FILL))
                    .collect(),
                label,
            })
            .collect();

        Ok(Matrix { columns, rows })
    }
}

/// Merge entity tables into a single matrix
pub fn build_matrix<I>(entities: I) -> Result<Matrix>
where
    I: IntoIterator<Item = EntityTable>,
{
    let mut builder = MatrixBuilder::new();
    for table in entities {
        builder.merge(table)?;
    }
    builder.finish()
}
