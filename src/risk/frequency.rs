//! Grouped frequency counting
//!
//! The leaf operation of the risk engine: for a subset of columns, how
//! many rows share each distinct combination of values in those columns.
//!
//! Nulls are first-class values here: a missing cell forms its own group
//! key component, equal only to another missing cell. Rows with nulls are
//! counted, never dropped.

use crate::data::{Table, Value};
use std::collections::HashMap;

/// Count rows per distinct value combination of the given columns.
///
/// The sum of all counts equals the table's row count.
pub fn count_groups(table: &Table, columns: &[usize]) -> HashMap<Vec<Value>, usize> {
    let mut counts: HashMap<Vec<Value>, usize> = HashMap::new();
    for row in table.rows() {
        let key: Vec<Value> = columns.iter().map(|&c| row[c].clone()).collect();
        *counts.entry(key).or_default() += 1;
    }
    counts
}

/// Count rows per distinct value combination, restricted to a subset of
/// row indices (a subject's rows during assessment).
pub fn count_groups_rows(
    table: &Table,
    rows: &[usize],
    columns: &[usize],
) -> HashMap<Vec<Value>, usize> {
    let mut counts: HashMap<Vec<Value>, usize> = HashMap::new();
    for &index in rows {
        let row = table.row(index);
        let key: Vec<Value> = columns.iter().map(|&c| row[c].clone()).collect();
        *counts.entry(key).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn sample_table() -> Table {
        Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![text("x"), text("p")],
                vec![text("x"), text("q")],
                vec![text("y"), text("p")],
                vec![text("x"), text("p")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_single_column_counts_distinct_values() {
        let table = sample_table();
        let counts = count_groups(&table, &[0]);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&vec![text("x")]], 3);
        assert_eq!(counts[&vec![text("y")]], 1);
    }

    #[test]
    fn test_pair_counts() {
        let table = sample_table();
        let counts = count_groups(&table, &[0, 1]);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&vec![text("x"), text("p")]], 2);
        assert_eq!(counts[&vec![text("x"), text("q")]], 1);
        assert_eq!(counts[&vec![text("y"), text("p")]], 1);
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let table = sample_table();
        for columns in [vec![0], vec![1], vec![0, 1]] {
            let total: usize = count_groups(&table, &columns).values().sum();
            assert_eq!(total, table.n_rows());
        }
    }

    #[test]
    fn test_null_is_a_distinct_group() {
        let table = Table::from_rows(
            vec!["a".to_string()],
            vec![vec![Value::Null], vec![text("x")], vec![Value::Null]],
        )
        .unwrap();

        let counts = count_groups(&table, &[0]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&vec![Value::Null]], 2);
    }

    #[test]
    fn test_row_subset() {
        let table = sample_table();
        let counts = count_groups_rows(&table, &[0, 3], &[0, 1]);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&vec![text("x"), text("p")]], 2);
    }

    #[test]
    fn test_empty_row_subset() {
        let table = sample_table();
        let counts = count_groups_rows(&table, &[], &[0]);
        assert!(counts.is_empty());
    }
}
