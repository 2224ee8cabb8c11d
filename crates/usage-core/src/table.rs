//! Core types for utilization data extracted from reports

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single resource reading: `key` is the section id followed by the
/// resource name (e.g. "3Slice LUTs"), `value` is the raw "Used" cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePair {
    pub key: String,
    pub value: String,
}

impl TablePair {
    /// Create a new pair
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// All pairs extracted from one entity's report, in file order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTable {
    /// Entity (cell) name
    pub entity: String,
    /// Pairs from every recognized table, keys may repeat
    pub pairs: Vec<TablePair>,
}

impl EntityTable {
    /// Create a new entity table
    pub fn new(entity: impl Into<String>, pairs: Vec<TablePair>) -> Self {
        Self {
            entity: entity.into(),
            pairs,
        }
    }

    /// Get the number of pairs, duplicates included
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Split into parallel key/value sequences, keeping only the first
    /// occurrence of each key.
    ///
    /// Hierarchical rollups re-report some resources further down a report;
    /// the first value is the one that counts.
    pub fn into_columns(self) -> (Vec<String>, Vec<String>) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut keys = Vec::with_capacity(self.pairs.len());
        let mut values = Vec::with_capacity(self.pairs.len());

        for pair in self.pairs {
            if seen.insert(pair.key.clone()) {
                keys.push(pair.key);
                values.push(pair.value);
            }
        }

        (keys, values)
    }
}

/// A resource count stored in the aggregate matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Whole count
    Integer(u64),
    /// Fractional count (e.g. half a Block RAM tile)
    Float(f64),
}

impl CellValue {
    /// Value used for resources an entity does not report
    pub const FILL: CellValue = CellValue::Integer(0);

    /// Parse a "Used" cell. Returns `None` for anything that is not a
    /// finite, non-negative number.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();

        if let Ok(i) = trimmed.parse::<u64>() {
            return Some(CellValue::Integer(i));
        }

        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 0.0 => Some(CellValue::Float(f)),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::FILL
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
        }
    }
}
