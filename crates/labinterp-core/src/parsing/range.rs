use crate::error::LabError;
use crate::parsing::values::parse_leading_number;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of a reference range once its text has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// "min-max", both bounds inclusive.
    Interval { min: Decimal, max: Decimal },
    /// "<max"; a value equal to `max` is outside the range.
    Below { max: Decimal },
    /// ">min"; a value equal to `min` is outside the range.
    Above { min: Decimal },
    /// Anything else ("Negative", "No growth", "" ...), compared as text.
    Literal,
}

/// A catalog reference range such as `"7-20"`, `"<5.7"`, `">40"` or
/// `"Negative"`, parsed once and kept alongside its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceRange {
    text: String,
    kind: RangeKind,
}

impl ReferenceRange {
    /// Parse a range, rejecting numeric ranges with a broken bound
    /// (e.g. "5-abc" or "<x").
    pub fn parse(text: &str) -> Result<ReferenceRange, LabError> {
        let kind = parse_kind(text).map_err(|reason| LabError::InvalidRange {
            range: text.to_string(),
            reason,
        })?;
        Ok(ReferenceRange {
            text: text.to_string(),
            kind,
        })
    }

    /// Parse a range, degrading malformed numeric ranges to literals.
    pub fn parse_lossy(text: &str) -> ReferenceRange {
        let kind = parse_kind(text).unwrap_or(RangeKind::Literal);
        ReferenceRange {
            text: text.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self.kind, RangeKind::Literal)
    }
}

impl Default for ReferenceRange {
    fn default() -> Self {
        ReferenceRange::parse_lossy("")
    }
}

impl FromStr for ReferenceRange {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceRange::parse(s)
    }
}

impl TryFrom<String> for ReferenceRange {
    type Error = LabError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReferenceRange::parse(&value)
    }
}

impl From<ReferenceRange> for String {
    fn from(range: ReferenceRange) -> String {
        range.text
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn parse_kind(text: &str) -> Result<RangeKind, String> {
    let s = text.trim();

    // Split on the first '-' only; "A+/A-/B+" has no numeric bounds at all
    // and stays a literal.
    if let Some((lo, hi)) = s.split_once('-') {
        return match (parse_leading_number(lo), parse_leading_number(hi)) {
            (Some(min), Some(max)) if min <= max => Ok(RangeKind::Interval { min, max }),
            (Some(min), Some(max)) => Err(format!("lower bound {min} exceeds upper bound {max}")),
            (None, None) => Ok(RangeKind::Literal),
            (None, Some(_)) => Err("lower bound is not a number".into()),
            (Some(_), None) => Err("upper bound is not a number".into()),
        };
    }

    if let Some(rest) = s.strip_prefix('<') {
        return parse_leading_number(rest)
            .map(|max| RangeKind::Below { max })
            .ok_or_else(|| "upper bound is not a number".into());
    }

    if let Some(rest) = s.strip_prefix('>') {
        return parse_leading_number(rest)
            .map(|min| RangeKind::Above { min })
            .ok_or_else(|| "lower bound is not a number".into());
    }

    Ok(RangeKind::Literal)
}
