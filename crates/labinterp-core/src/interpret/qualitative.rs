//! Automatic notes for qualitative and semi-quantitative results.
//!
//! Each entry pairs a predicate with a message template. Entries are tried
//! in order and the first match produces the note, so the specific
//! test-by-test entries sit ahead of the generic ones.

/// The observation being described, with lower-cased copies for matching.
struct Subject<'a> {
    name: &'a str,
    value: &'a str,
    name_lower: String,
    value_lower: String,
}

struct QualitativeRule {
    applies: fn(&Subject) -> bool,
    render: fn(&Subject) -> String,
}

const SEMI_QUANTITATIVE: &[&str] = &[
    "trace", "+1", "1+", "+2", "2+", "+3", "3+", "+4", "4+",
];
const HEMATURIA_GRADES: &[&str] = &["+1", "1+", "+2", "2+", "+3", "3+"];
const PROTEINURIA_GRADES: &[&str] = &["trace", "+1", "1+", "+2", "2+", "+3", "3+"];

static RULES: &[QualitativeRule] = &[
    QualitativeRule {
        applies: |s| s.name_lower.contains("stool occult") && s.value_lower == "positive",
        render: |_| {
            "Stool Occult Blood: Positive \u{2014} consider GI bleeding; advise clinical correlation."
                .to_string()
        },
    },
    QualitativeRule {
        applies: |s| {
            s.name_lower.contains("urine blood") && HEMATURIA_GRADES.contains(&s.value_lower.as_str())
        },
        render: |s| {
            format!(
                "Urine Blood: {} \u{2014} hematuria; recommend microscopy correlation.",
                s.value
            )
        },
    },
    QualitativeRule {
        applies: |s| {
            s.name_lower.contains("urine protein")
                && PROTEINURIA_GRADES.contains(&s.value_lower.as_str())
        },
        render: |s| {
            format!(
                "Urine Protein: {} \u{2014} proteinuria; evaluate renal status.",
                s.value
            )
        },
    },
    QualitativeRule {
        applies: |s| s.name_lower.contains("culture") && s.value_lower != "no growth",
        render: |s| {
            format!(
                "{}: {} \u{2014} organism(s) reported; manage per sensitivity profile.",
                s.name, s.value
            )
        },
    },
    QualitativeRule {
        applies: |s| s.value_lower == "positive" || s.value_lower == "reactive",
        render: |s| {
            format!(
                "{}: {} \u{2014} presence detected; correlate clinically.",
                s.name, s.value
            )
        },
    },
    QualitativeRule {
        applies: |s| SEMI_QUANTITATIVE.contains(&s.value_lower.as_str()),
        render: |s| {
            format!(
                "{}: {} \u{2014} semi\u{2011}quantitative increase noted.",
                s.name, s.value
            )
        },
    },
];

/// Produce the automatic note for one result, if any applies.
///
/// `name` should already be canonical. Blank values produce nothing.
pub fn describe(name: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let subject = Subject {
        name,
        value,
        name_lower: name.to_lowercase(),
        value_lower: value.to_lowercase(),
    };

    RULES
        .iter()
        .find(|rule| (rule.applies)(&subject))
        .map(|rule| (rule.render)(&subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_positive() {
        assert_eq!(
            describe("HIV", "Positive").unwrap(),
            "HIV: Positive \u{2014} presence detected; correlate clinically."
        );
        assert_eq!(
            describe("VDRL", "REACTIVE").unwrap(),
            "VDRL: REACTIVE \u{2014} presence detected; correlate clinically."
        );
    }

    #[test]
    fn test_semi_quantitative_ignores_case() {
        assert_eq!(
            describe("Urine Sugar", "Trace").unwrap(),
            "Urine Sugar: Trace \u{2014} semi\u{2011}quantitative increase noted."
        );
        assert!(describe("Urine Ketones", "4+").is_some());
        assert!(describe("Urine Ketones", "5+").is_none());
    }

    #[test]
    fn test_stool_occult_overrides_generic_positive() {
        assert_eq!(
            describe("Stool Occult Blood", "Positive").unwrap(),
            "Stool Occult Blood: Positive \u{2014} consider GI bleeding; advise clinical correlation."
        );
    }

    #[test]
    fn test_urine_blood_overrides_semi_quantitative() {
        assert_eq!(
            describe("Urine Blood", "2+").unwrap(),
            "Urine Blood: 2+ \u{2014} hematuria; recommend microscopy correlation."
        );
        // 4+ is not a hematuria grade, so the generic note applies.
        assert_eq!(
            describe("Urine Blood", "4+").unwrap(),
            "Urine Blood: 4+ \u{2014} semi\u{2011}quantitative increase noted."
        );
    }

    #[test]
    fn test_urine_protein_trace() {
        assert_eq!(
            describe("Urine Protein", "Trace").unwrap(),
            "Urine Protein: Trace \u{2014} proteinuria; evaluate renal status."
        );
    }

    #[test]
    fn test_culture_growth() {
        assert_eq!(
            describe("Urine Culture", "E. coli >100K CFU").unwrap(),
            "Urine Culture: E. coli >100K CFU \u{2014} organism(s) reported; manage per sensitivity profile."
        );
        assert!(describe("Blood Culture", "No Growth").is_none());
    }

    #[test]
    fn test_negative_and_blank_produce_nothing() {
        assert!(describe("HIV", "Negative").is_none());
        assert!(describe("HIV", "   ").is_none());
        assert!(describe("Urea", "18").is_none());
    }
}
