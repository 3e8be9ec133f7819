//! Short clinical sentences for individual renal, electrolyte and HbA1c
//! results, printed under the report table.

use crate::model::RangeStatus;
use crate::parsing::values::parse_leading_number;
use crate::report::ReportRow;
use rust_decimal::Decimal;

type Narrate = fn(abnormal: bool, value: Decimal) -> Option<&'static str>;

/// Matched against the lower-cased test name; first entry wins.
/// The ratio has to come before its two components.
const NARRATIVES: &[(&str, Narrate)] = &[
    ("bun/creatinine", bun_creatinine_ratio),
    ("creatinine", creatinine),
    ("urea nitrogen", bun),
    ("bun", bun),
    ("uric acid", uric_acid),
    ("sodium", sodium),
    ("potassium", potassium),
    ("chloride", chloride),
    ("hba1c", hba1c),
];

fn bun_creatinine_ratio(abnormal: bool, _value: Decimal) -> Option<&'static str> {
    Some(if abnormal {
        "Abnormal BUN/Creatinine ratio: high suggests pre\u{2011}renal causes (dehydration); low may reflect liver disease or low protein."
    } else {
        "BUN/Creatinine ratio in range\u{2014}no pre\u{2011}renal pattern."
    })
}

fn creatinine(abnormal: bool, value: Decimal) -> Option<&'static str> {
    Some(match abnormal {
        true if value > Decimal::new(12, 1) => {
            "Elevated creatinine suggests reduced kidney filtration (consider CKD, dehydration, or medication effects)."
        }
        true => "Low creatinine can be seen with low muscle mass or pregnancy.",
        false => "Creatinine within reference range indicates stable kidney filtration.",
    })
}

fn bun(abnormal: bool, value: Decimal) -> Option<&'static str> {
    Some(match abnormal {
        true if value > Decimal::from(23) => {
            "High BUN may indicate dehydration, high protein intake, or kidney impairment."
        }
        true => "Low BUN can occur in liver disease or malnutrition.",
        false => "BUN within range supports adequate protein metabolism and kidney clearance.",
    })
}

fn uric_acid(abnormal: bool, value: Decimal) -> Option<&'static str> {
    if !abnormal {
        return None;
    }
    Some(if value > Decimal::new(72, 1) {
        "High uric acid increases gout risk; assess diet, alcohol, diuretics."
    } else {
        "Low uric acid is uncommon and usually benign."
    })
}

fn sodium(abnormal: bool, value: Decimal) -> Option<&'static str> {
    if !abnormal {
        return None;
    }
    Some(if value > Decimal::from(145) {
        "Hypernatremia: consider dehydration or endocrine causes."
    } else {
        "Hyponatremia: evaluate fluids, medications, SIADH."
    })
}

fn potassium(abnormal: bool, value: Decimal) -> Option<&'static str> {
    if !abnormal {
        return None;
    }
    Some(if value > Decimal::new(55, 1) {
        "Hyperkalemia: risk of arrhythmia\u{2014}review renal function and medications (ACEi, ARBs, K\u{2011}sparing)."
    } else {
        "Hypokalemia: may cause cramps/arrhythmia\u{2014}check GI loss or diuretics."
    })
}

fn chloride(abnormal: bool, _value: Decimal) -> Option<&'static str> {
    abnormal.then_some("Abnormal chloride may reflect acid\u{2013}base imbalance or fluid status.")
}

fn hba1c(abnormal: bool, _value: Decimal) -> Option<&'static str> {
    Some(if abnormal {
        "HbA1c elevated\u{2014}indicates suboptimal glycemic control over last ~3 months; adjust lifestyle/therapy."
    } else {
        "HbA1c within goal\u{2014}continue current diabetes management."
    })
}

/// One sentence per row that has a numeric value and a matching entry, in
/// row order. Rows with an unknown status read as in range.
pub fn per_test_interpretation(rows: &[ReportRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| {
            let value = parse_leading_number(&row.value)?;
            let name = row.test_name.to_lowercase();
            let (_, narrate) = NARRATIVES.iter().find(|(needle, _)| name.contains(needle))?;
            narrate(row.status == RangeStatus::Abnormal, value)
        })
        .map(str::to_string)
        .collect()
}
