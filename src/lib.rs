//! # reid_risk - Re-identification Risk Assessment
//!
//! This library estimates re-identification risk in de-identified tabular
//! microdata. Each row of a table belongs to a subject (identified by an
//! id column) and carries quasi-identifying attributes; for every subject
//! and every background knowledge size, the engine computes the maximum
//! probability that an adversary knowing that many attribute values
//! correctly pinpoints the subject.
//!
//! - `data`: tabular model (`Table`, `Value`), CSV/JSON loading and the
//!   equal-frequency discretizer for continuous columns
//! - `risk`: the assessment engine (frequency counting, combinatorial
//!   subset search with saturation early-exit, per-subject aggregation)
//!   and risk-table post-processing (combination, risk-and-coverage)
//!
//! # Example
//!
//! ```rust
//! use reid_risk::data::{Table, Value};
//! use reid_risk::risk::{assess_risk, AssessmentConfig};
//!
//! let table = Table::from_rows(
//!     vec!["user".to_string(), "age".to_string(), "city".to_string()],
//!     vec![
//!         vec![Value::Int(1), Value::Int(30), Value::Text("rome".to_string())],
//!         vec![Value::Int(2), Value::Int(30), Value::Text("milan".to_string())],
//!     ],
//! )
//! .unwrap();
//!
//! let risk = assess_risk(&table, AssessmentConfig::new("user")).unwrap();
//! assert_eq!(risk.columns(), &["user", "1", "2"]);
//! ```

pub mod data;
pub mod risk;

pub use data::{Table, TableLoader, Value};
pub use risk::{assess_risk, AssessmentConfig, RiskAssessor, RiskError};
