//! Report assembly: per-result rows, abnormal findings, urgency and the
//! rule interpretations, gathered into one serializable [`LabReport`].

pub mod method;
pub mod narrative;

use crate::classify::classify_value;
use crate::derived::GlucoseEstimate;
use crate::interpret::{GroupedInterpretations, Interpreter};
use crate::model::{Observation, RangeStatus};
use serde::Serialize;
use std::fmt;

/// One printed result line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Catalog category name, if the test is in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Catalog panel name, if the test is in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
    /// Canonical test name.
    pub test_name: String,
    /// The value as entered.
    pub value: String,
    /// Catalog unit, empty for unknown tests.
    pub unit: String,
    /// Catalog reference range text, empty for unknown tests.
    pub normal_range: String,
    pub status: RangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
}

/// How soon the report needs a clinician's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// No findings is low, up to three is medium, more is high.
    pub fn from_finding_count(count: usize) -> Urgency {
        match count {
            0 => Urgency::Low,
            1..=3 => Urgency::Medium,
            _ => Urgency::High,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

/// The assembled report for one set of observations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub rows: Vec<ReportRow>,
    /// `"{test}: {value}"` for every abnormal row, in row order.
    pub abnormal_findings: Vec<String>,
    pub urgency: Urgency,
    pub summary: String,
    pub possible_conditions: Vec<String>,
    /// Narrative sentences for individual results, see [`narrative`].
    pub per_test_interpretation: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose_estimate: Option<GlucoseEstimate>,
    pub interpretations: GroupedInterpretations,
}

impl LabReport {
    pub fn abnormal_count(&self) -> usize {
        self.abnormal_findings.len()
    }
}

/// Build the full report. Blank observations produce no row.
pub fn build_report(interpreter: &Interpreter, observations: &[Observation]) -> LabReport {
    let rows: Vec<ReportRow> = observations
        .iter()
        .filter(|o| !o.is_blank())
        .map(|o| build_row(interpreter, o))
        .collect();

    let abnormal_findings: Vec<String> = rows
        .iter()
        .filter(|r| r.status.is_abnormal())
        .map(|r| format!("{}: {}", r.test_name, r.value))
        .collect();

    LabReport {
        urgency: Urgency::from_finding_count(abnormal_findings.len()),
        summary: summary_text(abnormal_findings.len()),
        possible_conditions: possible_conditions(&abnormal_findings),
        per_test_interpretation: narrative::per_test_interpretation(&rows),
        glucose_estimate: interpreter.estimate_mean_glucose(observations),
        interpretations: interpreter.evaluate_grouped(observations),
        abnormal_findings,
        rows,
    }
}

fn build_row(interpreter: &Interpreter, observation: &Observation) -> ReportRow {
    let test_name = interpreter.canonicalize(&observation.test_name);
    let location = interpreter.catalog().find_test(&test_name);

    let status = match (observation.result(), &location) {
        (Some(value), Some(loc)) => classify_value(&value, &loc.test.normal_range),
        _ => RangeStatus::Unknown,
    };

    ReportRow {
        category: location.as_ref().map(|l| l.category.name.clone()),
        panel: location.as_ref().map(|l| l.panel.name.clone()),
        unit: location
            .as_ref()
            .map(|l| l.test.unit.clone())
            .unwrap_or_default(),
        normal_range: location
            .as_ref()
            .map(|l| l.test.normal_range.to_string())
            .unwrap_or_default(),
        method: method::method_for(&test_name),
        value: observation.value.trim().to_string(),
        test_name,
        status,
    }
}

fn summary_text(abnormal: usize) -> String {
    if abnormal > 0 {
        format!("{abnormal} abnormal finding(s) detected requiring clinical correlation.")
    } else {
        "All tested parameters within normal limits.".to_string()
    }
}

fn possible_conditions(findings: &[String]) -> Vec<String> {
    if findings.is_empty() {
        return vec!["No specific conditions suggested".to_string()];
    }
    let mut conditions = vec!["Further evaluation recommended".to_string()];
    if findings.iter().any(|f| f.contains("Glucose")) {
        conditions.push("Diabetes mellitus screening indicated".to_string());
    }
    if findings.iter().any(|f| f.contains("Creatinine")) {
        conditions.push("Kidney function assessment needed".to_string());
    }
    conditions
}
