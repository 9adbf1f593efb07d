use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the human-readable restatement of the answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub value: String,
}

/// Estimated price range, recomputed on every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Lower bound, rounded to the nearest thousand.
    pub min: Decimal,
    /// Upper bound, rounded to the nearest thousand.
    pub max: Decimal,
    /// One entry per question, in questionnaire order.
    pub breakdown: Vec<BreakdownItem>,
}
