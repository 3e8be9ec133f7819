use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parsing::values;

/// One entered result, exactly as captured by the form layer.
///
/// `value` is always text: numeric results are decimal strings and
/// qualitative results are literals such as `"Positive"` or `"Trace"`. An
/// empty (or whitespace-only) value means the result was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub test_name: String,
    pub value: String,
}

impl Observation {
    pub fn new(test_name: impl Into<String>, value: impl Into<String>) -> Self {
        Observation {
            test_name: test_name.into(),
            value: value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Parsed form of the value, or `None` for a cleared result.
    pub fn result(&self) -> Option<ResultValue> {
        values::parse_value(&self.value)
    }
}

/// A result value after a single parse: either a number or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultValue {
    Numeric(Decimal),
    Literal(String),
}

impl ResultValue {
    pub fn numeric(&self) -> Option<Decimal> {
        match self {
            ResultValue::Numeric(v) => Some(*v),
            ResultValue::Literal(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ResultValue::Numeric(_))
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Numeric(v) => write!(f, "{v}"),
            ResultValue::Literal(s) => write!(f, "{s}"),
        }
    }
}

/// Outcome of comparing a result against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    Normal,
    Abnormal,
    /// The range is empty or not numeric, or the value is blank.
    Unknown,
}

impl RangeStatus {
    pub fn is_abnormal(self) -> bool {
        self == RangeStatus::Abnormal
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeStatus::Normal => write!(f, "normal"),
            RangeStatus::Abnormal => write!(f, "abnormal"),
            RangeStatus::Unknown => write!(f, "unknown"),
        }
    }
}
