//! Risk table post-processing
//!
//! Utilities over assessment output:
//! - combine several risk tables into one, keeping the worst (maximum)
//!   risk per subject and size;
//! - risk-and-coverage values: the fraction of subjects whose risk stays
//!   at or below a threshold, and a sampled RAC curve.

use crate::data::{Table, Value};
use crate::risk::error::{RiskError, RiskResult};
use std::collections::{HashMap, HashSet};

/// Merge risk tables on the subject id, taking the per-cell maximum.
///
/// Subjects and size columns are the union of the inputs, in
/// first-appearance order; a cell no input table has stays null. Tables
/// produced by runs over the same population line up subject for
/// subject.
pub fn combine_max(tables: &[Table], id_column: &str) -> RiskResult<Table> {
    if tables.is_empty() {
        return Err(RiskError::EmptyTable);
    }

    let mut subject_order: Vec<Value> = Vec::new();
    let mut seen_subjects: HashSet<Value> = HashSet::new();
    let mut column_order: Vec<String> = Vec::new();
    let mut cells: HashMap<(Value, String), f64> = HashMap::new();

    for table in tables {
        let id_col = table
            .column_index(id_column)
            .ok_or_else(|| RiskError::UnknownColumn(id_column.to_string()))?;

        for (c, name) in table.columns().iter().enumerate() {
            if c != id_col && !column_order.contains(name) {
                column_order.push(name.clone());
            }
        }

        for row in table.rows() {
            let subject = row[id_col].clone();
            if seen_subjects.insert(subject.clone()) {
                subject_order.push(subject.clone());
            }
            for (c, name) in table.columns().iter().enumerate() {
                if c == id_col {
                    continue;
                }
                if let Some(value) = row[c].as_f64() {
                    cells
                        .entry((subject.clone(), name.clone()))
                        .and_modify(|current| {
                            if value > *current {
                                *current = value;
                            }
                        })
                        .or_insert(value);
                }
            }
        }
    }

    let mut columns = Vec::with_capacity(column_order.len() + 1);
    columns.push(id_column.to_string());
    columns.extend(column_order.iter().cloned());

    let mut result = Table::new(columns)?;
    for subject in subject_order {
        let mut row = Vec::with_capacity(column_order.len() + 1);
        row.push(subject.clone());
        for name in &column_order {
            let cell = cells
                .get(&(subject.clone(), name.clone()))
                .map(|&v| Value::Float(v))
                .unwrap_or(Value::Null);
            row.push(cell);
        }
        result.push_row(row)?;
    }
    Ok(result)
}

/// Fraction of subjects whose risk is at or below the threshold
pub fn risk_and_coverage(risks: &[f64], threshold: f64) -> f64 {
    if risks.is_empty() {
        return 0.0;
    }
    let covered = risks.iter().filter(|&&r| r <= threshold).count();
    covered as f64 / risks.len() as f64
}

/// The RAC curve sampled at evenly spaced thresholds in [0, 1],
/// as (threshold, coverage) pairs
pub fn rac_points(risks: &[f64], n_points: usize) -> Vec<(f64, f64)> {
    (0..n_points)
        .map(|i| {
            let threshold = if n_points == 1 {
                0.0
            } else {
                i as f64 / (n_points - 1) as f64
            };
            (threshold, risk_and_coverage(risks, threshold))
        })
        .collect()
}

/// Risk values of one size column of a risk table
pub fn risk_values(table: &Table, column: &str) -> RiskResult<Vec<f64>> {
    let col = table
        .column_index(column)
        .ok_or_else(|| RiskError::UnknownColumn(column.to_string()))?;
    Ok(table
        .rows()
        .iter()
        .filter_map(|row| row[col].as_f64())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn risk_table(ids: &[i64], values: &[(&str, Vec<f64>)]) -> Table {
        let mut columns = vec!["U".to_string()];
        columns.extend(values.iter().map(|(name, _)| name.to_string()));
        let rows = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let mut row = vec![Value::Int(id)];
                row.extend(values.iter().map(|(_, col)| Value::Float(col[i])));
                row
            })
            .collect();
        Table::from_rows(columns, rows).unwrap()
    }

    #[test]
    fn test_combine_max_takes_cell_maximum() {
        let first = risk_table(&[1, 2], &[("1", vec![0.2, 0.5]), ("2", vec![0.4, 0.9])]);
        let second = risk_table(&[1, 2], &[("1", vec![0.3, 0.1]), ("2", vec![0.2, 1.0])]);

        let combined = combine_max(&[first, second], "U").unwrap();
        assert_eq!(combined.columns(), &["U", "1", "2"]);
        assert_eq!(combined.value(0, 1), &Value::Float(0.3));
        assert_eq!(combined.value(1, 1), &Value::Float(0.5));
        assert_eq!(combined.value(0, 2), &Value::Float(0.4));
        assert_eq!(combined.value(1, 2), &Value::Float(1.0));
    }

    #[test]
    fn test_combine_max_unions_columns() {
        let first = risk_table(&[1], &[("1", vec![0.5])]);
        let second = risk_table(&[1], &[("1", vec![0.25]), ("2", vec![0.75])]);

        let combined = combine_max(&[first, second], "U").unwrap();
        assert_eq!(combined.columns(), &["U", "1", "2"]);
        assert_eq!(combined.value(0, 1), &Value::Float(0.5));
        assert_eq!(combined.value(0, 2), &Value::Float(0.75));
    }

    #[test]
    fn test_combine_max_missing_cell_is_null() {
        let first = risk_table(&[1], &[("1", vec![0.5])]);
        let second = risk_table(&[2], &[("2", vec![0.75])]);

        let combined = combine_max(&[first, second], "U").unwrap();
        assert_eq!(combined.n_rows(), 2);
        assert_eq!(combined.value(0, 2), &Value::Null);
        assert_eq!(combined.value(1, 1), &Value::Null);
    }

    #[test]
    fn test_combine_max_requires_tables() {
        assert!(matches!(
            combine_max(&[], "U"),
            Err(RiskError::EmptyTable)
        ));
    }

    #[test]
    fn test_combine_max_unknown_id_column() {
        let table = risk_table(&[1], &[("1", vec![0.5])]);
        assert!(matches!(
            combine_max(&[table], "missing"),
            Err(RiskError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_risk_and_coverage() {
        let risks = [0.1, 0.5, 0.5, 1.0];
        assert_relative_eq!(risk_and_coverage(&risks, 0.0), 0.0);
        assert_relative_eq!(risk_and_coverage(&risks, 0.5), 0.75);
        assert_relative_eq!(risk_and_coverage(&risks, 1.0), 1.0);
    }

    #[test]
    fn test_rac_points_monotone() {
        let risks = [0.2, 0.4, 0.6, 0.8];
        let points = rac_points(&risks, 11);

        assert_eq!(points.len(), 11);
        assert_relative_eq!(points[0].0, 0.0);
        assert_relative_eq!(points[10].0, 1.0);
        assert_relative_eq!(points[10].1, 1.0);
        for window in points.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
    }

    #[test]
    fn test_risk_values_reads_a_column() {
        let table = risk_table(&[1, 2], &[("1", vec![0.5, 1.0])]);
        let values = risk_values(&table, "1").unwrap();
        assert_eq!(values, vec![0.5, 1.0]);
        assert!(risk_values(&table, "9").is_err());
    }
}
