//! Reference-range classification of individual results.

use crate::model::{RangeStatus, ResultValue};
use crate::parsing::range::{RangeKind, ReferenceRange};
use crate::parsing::values::parse_value;

/// Classify a parsed result against a reference range.
///
/// Numeric results are checked against numeric ranges (interval bounds
/// inclusive, `<max` and `>min` exclusive). A numeric result against a
/// literal range is [`RangeStatus::Unknown`].
///
/// Qualitative results are abnormal unless they match the range text
/// exactly, case included.
pub fn classify_value(value: &ResultValue, range: &ReferenceRange) -> RangeStatus {
    match value {
        ResultValue::Literal(text) => {
            if text == range.as_str() {
                RangeStatus::Normal
            } else {
                RangeStatus::Abnormal
            }
        }
        ResultValue::Numeric(v) => {
            let abnormal = match range.kind() {
                RangeKind::Interval { min, max } => *v < min || *v > max,
                RangeKind::Below { max } => *v >= max,
                RangeKind::Above { min } => *v <= min,
                RangeKind::Literal => return RangeStatus::Unknown,
            };
            if abnormal {
                RangeStatus::Abnormal
            } else {
                RangeStatus::Normal
            }
        }
    }
}

/// Classify raw text against a raw range string. Blank values and
/// malformed numeric ranges are [`RangeStatus::Unknown`].
pub fn classify_str(value: &str, range: &str) -> RangeStatus {
    match parse_value(value) {
        Some(parsed) => classify_value(&parsed, &ReferenceRange::parse_lossy(range)),
        None => RangeStatus::Unknown,
    }
}

/// True if `value` falls outside `range`. Unclassifiable input is not
/// abnormal.
pub fn is_abnormal(value: &str, range: &str) -> bool {
    classify_str(value, range).is_abnormal()
}

/// The in-range indicator for an input field: the exact inverse of
/// [`is_abnormal`], boundaries included.
pub fn is_value_in_range(value: &str, range: &str) -> bool {
    !is_abnormal(value, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_boundaries() {
        assert!(!is_abnormal("100", "70-100"));
        assert!(!is_abnormal("70", "70-100"));
        assert!(is_abnormal("100.01", "70-100"));
        assert!(is_abnormal("69.9", "70-100"));
    }

    #[test]
    fn test_upper_bound_boundaries() {
        assert!(is_abnormal("10", "<10"));
        assert!(!is_abnormal("9.99", "<10"));
    }

    #[test]
    fn test_lower_bound_boundaries() {
        assert!(is_abnormal("5", ">5"));
        assert!(!is_abnormal("5.01", ">5"));
    }

    #[test]
    fn test_in_range_agrees_with_abnormal() {
        let cases = [
            ("100", "70-100"),
            ("100.01", "70-100"),
            ("70", "70-100"),
            ("10", "<10"),
            ("9.99", "<10"),
            ("5", ">5"),
            ("5.01", ">5"),
            ("Negative", "Negative"),
            ("Positive", "Negative"),
            ("12", ""),
            ("12", "5-abc"),
        ];
        for (value, range) in cases {
            assert_eq!(
                is_value_in_range(value, range),
                !is_abnormal(value, range),
                "{value} vs {range}"
            );
        }
        assert!(is_value_in_range("100", "70-100"));
        assert!(!is_value_in_range("10", "<10"));
        assert!(!is_value_in_range("5", ">5"));
    }

    #[test]
    fn test_qualitative_exact_match() {
        assert_eq!(classify_str("Negative", "Negative"), RangeStatus::Normal);
        assert_eq!(classify_str("Positive", "Negative"), RangeStatus::Abnormal);
        // Case differences count as a mismatch.
        assert_eq!(classify_str("negative", "Negative"), RangeStatus::Abnormal);
    }

    #[test]
    fn test_numeric_against_literal_is_unknown() {
        assert_eq!(classify_str("12", ""), RangeStatus::Unknown);
        assert_eq!(classify_str("12", "Normal"), RangeStatus::Unknown);
        assert!(!is_abnormal("12", ""));
    }

    #[test]
    fn test_malformed_range_is_unknown() {
        assert_eq!(classify_str("12", "5-abc"), RangeStatus::Unknown);
        assert_eq!(classify_str("12", "<x"), RangeStatus::Unknown);
    }

    #[test]
    fn test_blank_value_is_unknown() {
        assert_eq!(classify_str("", "70-100"), RangeStatus::Unknown);
        assert_eq!(classify_str("  ", "Negative"), RangeStatus::Unknown);
    }

    #[test]
    fn test_leading_number_is_compared() {
        assert!(!is_abnormal("120/80", "90-120"));
        assert!(is_value_in_range("120/80", "90-120"));
        // A graded value reads as its number, which a literal range cannot
        // classify.
        assert_eq!(classify_str("2+", "Negative"), RangeStatus::Unknown);
        assert!(!is_abnormal("2+", "Negative"));
        assert!(is_value_in_range("2+", "Negative"));
    }

    #[test]
    fn test_value_with_unit_suffix() {
        assert_eq!(classify_str("250 mg/dL", "70-100"), RangeStatus::Abnormal);
    }
}
