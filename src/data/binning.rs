//! Equal-frequency discretization
//!
//! Continuous columns are replaced with quantile bin indices before risk
//! assessment, so that attribute values become categorical and groupable.
//! The bin count can be chosen with Sturges' rule over the table size.
//!
//! Bins are right-closed: a value equal to a cut point falls in the lower
//! bin. Values outside the fitted range clamp into the first or last bin.
//! Null and text cells pass through untouched.

use super::table::{Table, TableError, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the discretizer
#[derive(Error, Debug)]
pub enum BinningError {
    #[error("bin count must be at least 2, got {0}")]
    InvalidBins(usize),

    #[error("column '{0}' has no numeric values to discretize")]
    NoNumericData(String),

    #[error("transform called before fit")]
    NotFitted,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Number of buckets suggested by Sturges' rule for `n` observations
pub fn sturges(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    (1.0 + (10.0 / 3.0) * (n as f64).log10()) as usize
}

/// Equal-frequency discretizer.
///
/// `fit` learns per-column quantile cut points from the numeric values of
/// every non-excluded column; `transform` replaces each numeric cell with
/// its bin index.
#[derive(Debug, Clone)]
pub struct EqualFrequencyDiscretizer {
    bins: usize,
    excluded_columns: Vec<String>,
    cut_points: Option<HashMap<String, Vec<f64>>>,
}

impl EqualFrequencyDiscretizer {
    /// Create a discretizer with the given bin count
    pub fn new(bins: usize) -> Result<Self, BinningError> {
        Self::with_excluded(bins, Vec::new())
    }

    /// Create a discretizer that leaves the given columns untouched
    pub fn with_excluded(
        bins: usize,
        excluded_columns: Vec<String>,
    ) -> Result<Self, BinningError> {
        if bins < 2 {
            return Err(BinningError::InvalidBins(bins));
        }
        Ok(Self {
            bins,
            excluded_columns,
            cut_points: None,
        })
    }

    /// Create a discretizer whose bin count is Sturges' rule applied to
    /// the table's total cell count
    pub fn auto(table: &Table, excluded_columns: Vec<String>) -> Result<Self, BinningError> {
        let cells = table.n_rows() * table.n_cols();
        Self::with_excluded(sturges(cells), excluded_columns)
    }

    /// Bin count in use
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Learn quantile cut points from the table
    pub fn fit(&mut self, table: &Table) -> Result<(), BinningError> {
        let mut cut_points = HashMap::new();

        for (col, name) in table.columns().iter().enumerate() {
            if self.excluded_columns.iter().any(|c| c == name) {
                continue;
            }

            let mut values: Vec<f64> = table
                .rows()
                .iter()
                .filter_map(|row| row[col].as_f64())
                .filter(|v| !v.is_nan())
                .collect();
            if values.is_empty() {
                return Err(BinningError::NoNumericData(name.clone()));
            }
            values.sort_by(f64::total_cmp);

            let cuts: Vec<f64> = (1..self.bins)
                .map(|i| quantile(&values, i as f64 / self.bins as f64))
                .collect();
            cut_points.insert(name.clone(), cuts);
        }

        self.cut_points = Some(cut_points);
        Ok(())
    }

    /// Replace numeric cells with their bin index
    pub fn transform(&self, table: &Table) -> Result<Table, BinningError> {
        let cut_points = self.cut_points.as_ref().ok_or(BinningError::NotFitted)?;

        let mut result = Table::new(table.columns().to_vec())?;
        for row in table.rows() {
            let binned: Vec<Value> = row
                .iter()
                .zip(table.columns())
                .map(|(value, name)| match (cut_points.get(name), value.as_f64()) {
                    (Some(cuts), Some(v)) if !v.is_nan() => {
                        let index = cuts.partition_point(|&c| c < v);
                        Value::Int(index as i64)
                    }
                    _ => value.clone(),
                })
                .collect();
            result.push_row(binned)?;
        }
        Ok(result)
    }

    /// Fit on the table and transform it in one step
    pub fn fit_transform(&mut self, table: &Table) -> Result<Table, BinningError> {
        self.fit(table)?;
        self.transform(table)
    }
}

/// Linear-interpolation quantile of a sorted slice, `q` in [0, 1]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}
