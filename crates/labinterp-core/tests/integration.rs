//! End-to-end tests over the public API: fixture rule tables built in the
//! test, plus the bundled catalog, aliases and rules.

use labinterp_core::catalog::builtin::load_builtin as builtin_catalog;
use labinterp_core::classify::{is_abnormal, is_value_in_range};
use labinterp_core::interpret::{InterpretationItem, Interpreter};
use labinterp_core::model::Observation;
use labinterp_core::parsing::normalize::{builtin_aliases, AliasTable};
use labinterp_core::report::Urgency;
use labinterp_core::rules::parse_rules_str;
use labinterp_core::rules::schema::RuleTable;
use labinterp_core::interpret_json;
use rust_decimal_macros::dec;
use serde_json::json;

fn with_rules(rules_json: &str) -> Interpreter {
    Interpreter::new(
        builtin_catalog().unwrap(),
        builtin_aliases().unwrap(),
        parse_rules_str(rules_json).unwrap(),
    )
}

fn obs(pairs: &[(&str, &str)]) -> Vec<Observation> {
    pairs
        .iter()
        .map(|(name, value)| Observation::new(*name, *value))
        .collect()
}

// ---------------------------------------------------------------------------
// Scenario 1: a single threshold rule under a fixture group
// ---------------------------------------------------------------------------
#[test]
fn severe_hyperglycemia_fixture_rule() {
    let interpreter = with_rules(
        r#"{"sugar": [
            {"when": {"test": "Fasting Glucose", "op": ">", "value": 200},
             "message": "Severe hyperglycemia"}
        ]}"#,
    );

    let grouped = interpreter.evaluate_grouped(&obs(&[("Fasting Glucose", "250")]));

    assert_eq!(
        serde_json::to_value(&grouped).unwrap(),
        json!({"sugar": ["Severe hyperglycemia"]})
    );
}

// ---------------------------------------------------------------------------
// Scenario 2: the stool occult override replaces the generic positive note
// ---------------------------------------------------------------------------
#[test]
fn stool_occult_override() {
    let interpreter = with_rules("{}");

    let grouped = interpreter.evaluate_grouped(&obs(&[("Stool Occult Blood", "Positive")]));

    assert_eq!(grouped.len(), 1);
    let items = grouped.get("Stool Routine").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].message(),
        "Stool Occult Blood: Positive \u{2014} consider GI bleeding; advise clinical correlation."
    );
    assert!(!grouped
        .messages()
        .iter()
        .any(|m| m.contains("presence detected")));
}

// ---------------------------------------------------------------------------
// Scenario 3: no observations, no groups
// ---------------------------------------------------------------------------
#[test]
fn empty_observations() {
    let interpreter = Interpreter::builtin().unwrap();
    let grouped = interpreter.evaluate_grouped(&[]);
    assert!(grouped.is_empty());
    assert_eq!(serde_json::to_value(&grouped).unwrap(), json!({}));
    assert!(interpreter.evaluate_flat(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// Pure function: same input, same output
// ---------------------------------------------------------------------------
#[test]
fn evaluation_is_idempotent() {
    let interpreter = Interpreter::builtin().unwrap();
    let input = obs(&[
        ("FBS", "250"),
        ("HbA1c", "8.1"),
        ("Creatinine", "1.9"),
        ("Urea", "48"),
        ("Urine Protein", "2+"),
        ("HIV", "Reactive"),
    ]);

    let first = interpreter.evaluate_grouped(&input);
    let second = interpreter.evaluate_grouped(&input);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

// ---------------------------------------------------------------------------
// No group ever holds two items with the same message
// ---------------------------------------------------------------------------
#[test]
fn groups_never_repeat_a_message() {
    let interpreter = with_rules(
        r#"{
            "sugar": [
                {"when": {"test": "Fasting Glucose", "op": ">", "value": 200}, "message": "High"},
                {"when": {"test": "Fasting Glucose", "op": ">", "value": 150}, "message": "High"},
                {"when": {"test": "HbA1c", "op": ">=", "value": 6.5}, "message": "High",
                 "suggestions": ["Repeat"]}
            ],
            "other": [
                {"when": {"test": "Fasting Glucose", "op": ">", "value": 100}, "message": "High",
                 "group": "sugar"}
            ]
        }"#,
    );

    let grouped = interpreter.evaluate_grouped(&obs(&[
        ("Fasting Glucose", "250"),
        ("HbA1c", "7"),
        ("VDRL", "Reactive"),
        ("VDRL", "Reactive"),
    ]));

    for group in grouped.groups() {
        let mut seen = std::collections::HashSet::new();
        for item in &group.items {
            assert!(seen.insert(item.message()), "duplicate in {}", group.group);
        }
    }
    // The first occurrence is kept, so the bare message wins.
    assert_eq!(
        grouped.get("sugar").unwrap(),
        &[InterpretationItem::Message("High".to_string())]
    );
}

// ---------------------------------------------------------------------------
// A conjunction with any referenced test missing never matches
// ---------------------------------------------------------------------------
#[test]
fn conjunction_needs_every_test() {
    let interpreter = Interpreter::builtin().unwrap();

    let only_creatinine = interpreter.evaluate_grouped(&obs(&[("Creatinine", "1.9")]));
    assert!(only_creatinine.get("Renal Extended").is_none());
    assert!(only_creatinine.get("Kidney Function Test (KFT)").is_some());

    let both = interpreter.evaluate_grouped(&obs(&[("Creatinine", "1.9"), ("Urea", "48")]));
    let renal = both.get("Renal Extended").unwrap();
    assert_eq!(
        renal[0].message(),
        "Combined rise in urea and creatinine; evaluate for acute kidney injury."
    );
}

#[test]
fn conjunction_with_unparsable_value_fails() {
    let interpreter = Interpreter::builtin().unwrap();
    let grouped = interpreter.evaluate_grouped(&obs(&[("Creatinine", "1.9"), ("Urea", "high")]));
    assert!(grouped.get("Renal Extended").is_none());
}

// ---------------------------------------------------------------------------
// Alias canonicalization
// ---------------------------------------------------------------------------
#[test]
fn alias_canonicalization() {
    let aliases: AliasTable = [("sgpt", "SGPT/ALT")].into_iter().collect();
    let interpreter = Interpreter::new(builtin_catalog().unwrap(), aliases, RuleTable::default());

    assert_eq!(interpreter.canonicalize("SGPT"), "SGPT/ALT");
    assert_eq!(interpreter.canonicalize("sgpt"), "SGPT/ALT");
    assert_eq!(
        interpreter.canonicalize("Unknown Test XYZ"),
        "Unknown Test XYZ"
    );
    // Catalog casing is restored for exact names.
    assert_eq!(interpreter.canonicalize("hemoglobin"), "Hemoglobin");
}

#[test]
fn aliased_observation_reaches_rule() {
    let interpreter = Interpreter::builtin().unwrap();
    let grouped = interpreter.evaluate_grouped(&obs(&[("sgpt", "120")]));
    let lft = grouped.get("Liver Function Test (LFT)").unwrap();
    assert_eq!(lft[0].message(), "Raised ALT indicates hepatocellular injury.");
}

// ---------------------------------------------------------------------------
// Range boundaries and the input-field indicator agree
// ---------------------------------------------------------------------------
#[test]
fn range_boundaries() {
    assert!(!is_abnormal("100", "70-100"));
    assert!(is_abnormal("100.01", "70-100"));
    assert!(is_abnormal("10", "<10"));
    assert!(!is_abnormal("9.99", "<10"));
    assert!(is_abnormal("5", ">5"));
    assert!(!is_abnormal("5.01", ">5"));

    assert!(is_value_in_range("100", "70-100"));
    assert!(is_value_in_range("70", "70-100"));
    assert!(!is_value_in_range("10", "<10"));
    assert!(!is_value_in_range("5", ">5"));
}

// ---------------------------------------------------------------------------
// Derived value
// ---------------------------------------------------------------------------
#[test]
fn estimated_average_glucose() {
    let interpreter = Interpreter::builtin().unwrap();
    let estimate = interpreter
        .estimate_mean_glucose(&obs(&[("HbA1c", "7")]))
        .unwrap();
    assert_eq!(estimate.hba1c, dec!(7));
    assert_eq!(estimate.mean_blood_glucose, dec!(154.2));
}

// ---------------------------------------------------------------------------
// Full report from form-state JSON
// ---------------------------------------------------------------------------
#[test]
fn report_from_form_state() {
    let interpreter = Interpreter::builtin().unwrap();
    let report = interpret_json(
        r#"{
            "biochemistry": {"Fasting Glucose": "250", "HbA1c": "8", "Creatinine": "0.9", "TSH": ""},
            "body-fluids": {"Stool Occult Blood": "Positive"}
        }"#,
        &interpreter,
    )
    .unwrap();

    assert_eq!(report.rows.len(), 4);
    assert_eq!(report.abnormal_count(), 3);
    assert_eq!(report.urgency, Urgency::Medium);
    assert_eq!(
        report.summary,
        "3 abnormal finding(s) detected requiring clinical correlation."
    );
    assert!(report
        .abnormal_findings
        .contains(&"Stool Occult Blood: Positive".to_string()));
    assert_eq!(
        report.glucose_estimate.unwrap().mean_blood_glucose,
        dec!(182.9)
    );

    let sugar = report.interpretations.get("Blood Sugar").unwrap();
    assert!(sugar
        .iter()
        .any(|i| i.message().starts_with("Severe fasting hyperglycemia")));
    let hba1c = sugar
        .iter()
        .find(|i| i.message().starts_with("HbA1c elevated"))
        .unwrap();
    assert!(hba1c.detail().is_some());
}

#[test]
fn malformed_observations_are_an_error() {
    let interpreter = Interpreter::builtin().unwrap();
    assert!(interpret_json("[1, 2, 3]", &interpreter).is_err());
}

#[test]
fn builtin_interpreter_ignores_unknown_tests() {
    let interpreter = Interpreter::builtin().unwrap();
    let report = interpreter.build_report(&obs(&[("Unknown Test XYZ", "42")]));
    assert!(report.interpretations.is_empty());
    assert_eq!(report.urgency, Urgency::Low);
    assert_eq!(report.rows[0].normal_range, "");
}
