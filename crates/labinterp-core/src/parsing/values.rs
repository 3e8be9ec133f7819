use crate::model::ResultValue;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an entered value into a [`ResultValue`].
///
/// A value is numeric whenever it starts with a number; the rest of the
/// text is ignored:
/// - "68" -> Numeric(68)
/// - "5.6 %" or "7.5 mg/dL" -> Numeric (trailing unit text)
/// - "120/80" -> Numeric(120), "2+" -> Numeric(2)
/// - "Positive", "Trace" -> Literal
/// - "" or whitespace -> None (a cleared result)
///
/// Literals keep the text exactly as entered, since range comparison is
/// character-for-character. Automatic notes read the raw text, so "2+"
/// is still recognised as a semi-quantitative grade there.
pub fn parse_value(s: &str) -> Option<ResultValue> {
    if s.trim().is_empty() {
        return None;
    }

    match parse_leading_number(s) {
        Some(number) => Some(ResultValue::Numeric(number)),
        None => Some(ResultValue::Literal(s.to_string())),
    }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Anything after the number is ignored, so "7-20"
/// yields 7 and "abc" yields `None`.
pub fn parse_leading_number(s: &str) -> Option<Decimal> {
    leading_number(s).map(|(n, _)| n)
}

/// Extract a number from free text the way rule conditions read values:
/// every character other than digits, `.` and `-` is dropped first, then
/// the leading number is parsed. "<0.5" yields 0.5 and "1,250" yields 1250.
pub fn parse_lenient_number(s: &str) -> Option<Decimal> {
    let stripped: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_leading_number(&stripped)
}

fn leading_number(s: &str) -> Option<(Decimal, &str)> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_part = &s[int_start..end];

    let mut frac_part = "";
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if !int_part.is_empty() || frac_end > frac_start {
            frac_part = &s[frac_start..frac_end];
            end = frac_end;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = None;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'-' || bytes[exp_end] == b'+') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = Some(&s[end + 1..exp_end]);
            end = exp_end;
        }
    }

    let mut text = String::with_capacity(end + 2);
    if negative {
        text.push('-');
    }
    text.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        text.push('.');
        text.push_str(frac_part);
    }

    let number = match exponent {
        Some(exp) => {
            text.push('e');
            text.push_str(exp.trim_start_matches('+'));
            Decimal::from_scientific(&text).ok()?
        }
        None => Decimal::from_str(&text).ok()?,
    };

    Some((number, &s[end..]))
}
