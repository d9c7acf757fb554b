//! Re-identification risk engine

pub mod analysis;
pub mod assessment;
pub mod combinations;
pub mod error;
pub mod frequency;

pub use analysis::{combine_max, rac_points, risk_and_coverage, risk_values};
pub use assessment::{assess_risk, risk_for_size, AssessmentConfig, RiskAssessor};
pub use combinations::Combinations;
pub use error::{RiskError, RiskResult};
pub use frequency::{count_groups, count_groups_rows};
