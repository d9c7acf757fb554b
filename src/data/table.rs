//! Core tabular data model
//!
//! This module defines the structures the assessment engine works on:
//! - Value: a single cell (null, integer, float or text)
//! - Table: an ordered, rectangular collection of named columns and rows
//!
//! Columns are discovered at load time; no schema is declared up front.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised by table construction and lookups
#[derive(Error, Debug)]
pub enum TableError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("row has {found} values but the table has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    #[error("column '{0}' does not exist in the table")]
    UnknownColumn(String),
}

/// A single cell value.
///
/// `Null` is a first-class value: it is equal only to itself and
/// participates in grouping keys like any other value. Grouping over
/// floats uses exact-representation semantics: `-0.0` groups with `0.0`,
/// all NaNs group together, and `Int(2)` is distinct from `Float(2.0)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value, equal only to itself
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Categorical text value
    Text(String),
}

impl Value {
    /// Parse a raw text cell into a typed value.
    ///
    /// The empty string becomes `Null`; otherwise integer, then float,
    /// then text, in that order.
    pub fn parse(cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = cell.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = cell.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(cell.to_string())
    }

    /// True if the value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical bit pattern used for float equality and hashing.
    /// Collapses -0.0 into 0.0 and all NaNs into one value.
    fn float_bits(f: f64) -> u64 {
        if f.is_nan() {
            f64::NAN.to_bits()
        } else if f == 0.0 {
            0.0f64.to_bits()
        } else {
            f.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                Value::float_bits(*a) == Value::float_bits(*b)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Int(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                2u8.hash(state);
                Value::float_bits(*f).hash(state);
            }
            Value::Text(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            // Keep a decimal point so a reloaded cell stays a float
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => {
                write!(f, "{:.1}", x)
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// An ordered, rectangular table of named columns.
///
/// Rows are stored in input order; every operation that groups rows
/// reports groups in first-appearance order, so results are
/// deterministic for a given input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new(columns: Vec<String>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.clone()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a table from column names and pre-built rows
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row, validating its arity
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// A single row by index
    pub fn row(&self, index: usize) -> &[Value] {
        &self.rows[index]
    }

    /// All rows, in input order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// A single cell
    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    /// Group row indices by the distinct values of one column.
    ///
    /// Keys appear in first-appearance order; every row index of the
    /// table occurs in exactly one group.
    pub fn partition_by(&self, col: usize) -> Vec<(Value, Vec<usize>)> {
        let mut order: Vec<Value> = Vec::new();
        let mut groups: HashMap<Value, Vec<usize>> = HashMap::new();
        for (index, row) in self.rows.iter().enumerate() {
            let key = row[col].clone();
            let entry = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            entry.push(index);
        }
        order
            .into_iter()
            .map(|key| {
                let indices = groups.remove(&key).unwrap_or_default();
                (key, indices)
            })
            .collect()
    }

    /// Extract the sub-table made of the given row indices
    pub fn subtable(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Check structural invariants after deserialization
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.clone()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }
        for row in &self.rows {
            if row.len() != self.columns.len() {
                return Err(TableError::ArityMismatch {
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }
}
