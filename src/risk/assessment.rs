//! Re-identification risk assessment
//!
//! For every subject in a table and every background knowledge size in a
//! requested range, computes the worst-case probability that an adversary
//! knowing that many attribute values pinpoints the subject:
//!
//! - for one subset of attributes, the risk of a value combination is
//!   (subject rows matching it) / (all rows matching it);
//! - for one size, the risk is the maximum over all C(n, size) attribute
//!   subsets of that size;
//! - per subject, risk is non-decreasing in size, which allows skipping
//!   every larger size once a size reaches 1.0.
//!
//! The subset search is combinatorial: C(|features|, size) evaluations
//! per subject and size, each a pass over the subject's rows and the full
//! table. Large feature sets with large maximum sizes are the scalability
//! limit; the saturation early-exit and the monotonicity shortcut are
//! what keep realistic datasets tractable.
//!
//! Probabilities are handled as exact integer count pairs and compared by
//! cross-multiplication; saturation is detected as numerator equal to
//! denominator, so no floating point comparison is involved until the
//! final conversion of each risk value.

use crate::data::{Table, Value};
use crate::risk::combinations::Combinations;
use crate::risk::error::{RiskError, RiskResult};
use crate::risk::frequency::{count_groups, count_groups_rows};
use log::info;
use rayon::prelude::*;

/// Assessment parameters
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    /// Column identifying the subject each row belongs to
    pub id_column: String,
    /// Columns to leave out of the background knowledge
    pub excluded_columns: Vec<String>,
    /// Smallest background knowledge size to evaluate
    pub min_size: usize,
    /// Largest background knowledge size to evaluate; the full feature
    /// count when not set
    pub max_size: Option<usize>,
    /// Emit per-subject progress through the `log` facade
    pub progress: bool,
}

impl AssessmentConfig {
    /// Configuration with the default size range (1 to all features)
    pub fn new(id_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            excluded_columns: Vec::new(),
            min_size: 1,
            max_size: None,
            progress: false,
        }
    }
}

/// Maximum re-identification probability for one subject at one
/// background knowledge size.
///
/// Enumerates every `size`-element subset of `features` (column indices
/// into `table`), counts the subject's rows and the full table's rows
/// grouped by those columns, and takes the maximum ratio across all value
/// combinations the subject exhibits. Returns 1.0 immediately when any
/// subset isolates the subject, without enumerating further subsets.
///
/// `subject_rows` must be row indices of `table`; every combination the
/// subject exhibits therefore also occurs in the full table, with a count
/// at least as large, so the ratio is always well defined.
pub fn risk_for_size(
    table: &Table,
    subject_rows: &[usize],
    features: &[usize],
    size: usize,
) -> RiskResult<f64> {
    if size == 0 || size > features.len() {
        return Err(RiskError::InvalidSize {
            size,
            n_features: features.len(),
        });
    }

    // Best ratio so far, as an exact (numerator, denominator) count pair
    let mut best: (usize, usize) = (0, 1);
    for subset in Combinations::new(features.len(), size) {
        let columns: Vec<usize> = subset.iter().map(|&i| features[i]).collect();
        let subject_counts = count_groups_rows(table, subject_rows, &columns);
        let full_counts = count_groups(table, &columns);

        for (combo, &count_subject) in &subject_counts {
            let count_full = *full_counts
                .get(combo)
                .expect("subject rows are a subset of the full table");
            debug_assert!(count_full >= count_subject);

            if count_subject == count_full {
                // Saturated: no subset can exceed probability 1
                return Ok(1.0);
            }
            if (count_subject as u128) * (best.1 as u128)
                > (best.0 as u128) * (count_full as u128)
            {
                best = (count_subject, count_full);
            }
        }
    }
    Ok(best.0 as f64 / best.1 as f64)
}

/// Risk assessment engine.
///
/// Validates its configuration against the table up front, partitions
/// rows by subject and sweeps each subject over the requested size range.
/// Subjects are independent and evaluated in parallel; output row order
/// follows each subject's first appearance in the input, so results are
/// deterministic.
pub struct RiskAssessor {
    config: AssessmentConfig,
}

impl RiskAssessor {
    /// Create an assessor from a configuration
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    /// Assess re-identification risk for every subject in the table.
    ///
    /// Returns a table with the id column followed by one column per
    /// size, labeled with the size value, each cell the subject's risk in
    /// [0, 1]. Any precondition violation aborts the whole assessment
    /// before computation starts; there are no partial results.
    pub fn assess(&self, table: &Table) -> RiskResult<Table> {
        let config = &self.config;

        let id_col = table
            .column_index(&config.id_column)
            .ok_or_else(|| RiskError::UnknownColumn(config.id_column.clone()))?;
        for name in &config.excluded_columns {
            if table.column_index(name).is_none() {
                return Err(RiskError::UnknownColumn(name.clone()));
            }
        }
        if config.excluded_columns.iter().any(|c| c == &config.id_column) {
            return Err(RiskError::ExcludedIdColumn(config.id_column.clone()));
        }
        if table.is_empty() {
            return Err(RiskError::EmptyTable);
        }

        // Feature columns in table order: everything except the id column
        // and the exclusions
        let features: Vec<usize> = (0..table.n_cols())
            .filter(|&c| c != id_col)
            .filter(|&c| {
                let name = &table.columns()[c];
                !config.excluded_columns.iter().any(|excluded| excluded == name)
            })
            .collect();

        let n_features = features.len();
        let min_size = config.min_size;
        let max_size = config.max_size.unwrap_or(n_features);
        if min_size < 1 || min_size > max_size {
            return Err(RiskError::InvalidSize {
                size: min_size,
                n_features,
            });
        }
        if max_size > n_features {
            return Err(RiskError::InvalidSize {
                size: max_size,
                n_features,
            });
        }

        if config.progress {
            info!("computing risk for sizes {} to {}", min_size, max_size);
        }

        let subjects = table.partition_by(id_col);

        let risk_rows = subjects
            .par_iter()
            .map(|(subject, rows)| -> RiskResult<Vec<Value>> {
                let mut risks: Vec<f64> = Vec::with_capacity(max_size - min_size + 1);
                for size in min_size..=max_size {
                    if config.progress {
                        info!("[{}] background knowledge size: {}", subject, size);
                    }
                    // Risk cannot decrease with more knowledge: once a
                    // smaller size saturated, larger sizes are 1.0 as well
                    let risk = if risks.last() == Some(&1.0) {
                        1.0
                    } else {
                        risk_for_size(table, rows, &features, size)?
                    };
                    risks.push(risk);
                    if config.progress {
                        info!("[{}] size {} completed: risk {:.4}", subject, size, risk);
                    }
                }

                let mut row = Vec::with_capacity(risks.len() + 1);
                row.push(subject.clone());
                row.extend(risks.into_iter().map(Value::Float));
                Ok(row)
            })
            .collect::<RiskResult<Vec<_>>>()?;

        let mut columns = Vec::with_capacity(max_size - min_size + 2);
        columns.push(config.id_column.clone());
        columns.extend((min_size..=max_size).map(|size| size.to_string()));

        let mut result = Table::new(columns)?;
        for row in risk_rows {
            result.push_row(row)?;
        }
        Ok(result)
    }
}

/// Assess re-identification risk with the given configuration
pub fn assess_risk(table: &Table, config: AssessmentConfig) -> RiskResult<Table> {
    RiskAssessor::new(config).assess(table)
}
