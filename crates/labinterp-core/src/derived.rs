use crate::model::Observation;
use crate::parsing::normalize::Canonicalizer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// HbA1c together with the estimated average glucose (eAG) derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseEstimate {
    /// HbA1c in %.
    pub hba1c: Decimal,
    /// Estimated average glucose in mg/dL, one decimal place.
    pub mean_blood_glucose: Decimal,
}

/// Find the first HbA1c result and derive the estimated average glucose.
///
/// Blank entries are skipped. Returns `None` if there is no HbA1c result
/// or it is not numeric.
pub fn estimate_mean_glucose(
    canon: &Canonicalizer<'_>,
    observations: &[Observation],
) -> Option<GlucoseEstimate> {
    let obs = observations.iter().find(|o| {
        !o.is_blank()
            && canon
                .canonicalize(&o.test_name)
                .to_lowercase()
                .contains("hba1c")
    })?;
    let hba1c = obs.result()?.numeric()?;

    Some(GlucoseEstimate {
        hba1c,
        mean_blood_glucose: mean_glucose_from_hba1c(hba1c),
    })
}

/// ADA eAG formula: `28.7 * HbA1c - 46.7`, rounded half-up to one decimal.
pub fn mean_glucose_from_hba1c(hba1c: Decimal) -> Decimal {
    let slope = Decimal::new(287, 1);
    let intercept = Decimal::new(467, 1);
    let ten = Decimal::TEN;

    let raw = slope * hba1c - intercept;
    ((raw * ten + Decimal::new(5, 1)).floor() / ten).normalize()
}
