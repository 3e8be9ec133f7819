//! Assay method shown next to each reported result.

/// How a method entry matches a lower-cased test name.
#[derive(Debug, Clone, Copy)]
enum NameMatch {
    Contains(&'static str),
    Exact(&'static str),
}

impl NameMatch {
    fn matches(self, name: &str) -> bool {
        match self {
            NameMatch::Contains(needle) => name.contains(needle),
            NameMatch::Exact(exact) => name == exact,
        }
    }
}

use NameMatch::{Contains, Exact};

/// First matching entry wins, so more specific names come first
/// ("urea nitrogen" before "urea", "hba1c" before "glucose").
const METHODS: &[(NameMatch, &str)] = &[
    // Renal and electrolytes
    (Contains("creatinine"), "Enzymatic IFCC"),
    (Contains("urea nitrogen"), "Calculated"),
    (Exact("bun"), "Calculated"),
    (Contains("urea"), "Urease"),
    (Contains("uric acid"), "Uricase"),
    (Contains("sodium"), "ISE"),
    (Contains("potassium"), "ISE"),
    (Contains("chloride"), "ISE"),
    (Contains("egfr"), "CKD-EPI (Calculated)"),
    // Sugar
    (Contains("hba1c"), "HPLC"),
    (Contains("glucose"), "GOD-POD"),
    // Liver
    (Contains("sgpt"), "IFCC (ALT)"),
    (Contains("alt"), "IFCC (ALT)"),
    (Contains("sgot"), "IFCC (AST)"),
    (Contains("ast"), "IFCC (AST)"),
    (Contains("bilirubin"), "Diazo (Jendrassik-Grof)"),
    (Contains("albumin"), "BCG Dye-Binding"),
    (Contains("total protein"), "Biuret"),
    (Exact("protein"), "Biuret"),
    // Lipids
    (Contains("total cholesterol"), "CHOD-PAP"),
    (Contains("hdl"), "Direct Homogeneous Assay"),
    (Contains("ldl"), "Calculated (Friedewald)"),
    (Contains("triglycer"), "GPO-PAP"),
    // Thyroid
    (Exact("t3"), "CLIA"),
    (Contains(" t3"), "CLIA"),
    (Exact("t4"), "CLIA"),
    (Contains(" t4"), "CLIA"),
    (Contains("tsh"), "CLIA"),
    // Hematology and coagulation
    (Contains("hemoglobin"), "SLS-Hb (Analyzer)"),
    (Contains("hematocrit"), "Analyzer Derived"),
    (Contains("rbc count"), "Hematology Analyzer (Impedance/Optical)"),
    (Contains("wbc count"), "Hematology Analyzer (Impedance/Optical)"),
    (Contains("platelet"), "Hematology Analyzer (Impedance/Optical)"),
    (Contains("mcv"), "Analyzer Derived Index"),
    (Contains("mch"), "Analyzer Derived Index"),
    (Contains("rdw"), "Analyzer Derived Index"),
    (Contains("mpv"), "Analyzer Derived Index"),
    (Contains("pct"), "Analyzer Derived Index"),
    (Contains("neutrophil"), "Analyzer 5-part Differential"),
    (Contains("lymphocyte"), "Analyzer 5-part Differential"),
    (Contains("monocyte"), "Analyzer 5-part Differential"),
    (Contains("eosinophil"), "Analyzer 5-part Differential"),
    (Contains("basophil"), "Analyzer 5-part Differential"),
    (Contains("esr"), "Westergren"),
    (Contains("inr"), "Optical Clot Detection"),
    (Contains("pt "), "Optical Clot Detection"),
    (Contains("aptt"), "Optical Clot Detection"),
    (Contains("reticulocyte"), "Flow Cytometry (Analyzer)"),
    // Immunology and serology
    (Contains("crp"), "Immunoturbidimetry"),
    (Contains("ra factor"), "Latex Agglutination"),
    (Exact("rafactor"), "Latex Agglutination"),
    (Exact("ra"), "Latex Agglutination"),
    (Contains("aso"), "Latex Agglutination"),
    (Exact("ana"), "ELISA"),
    (Contains("anti nuclear"), "ELISA"),
    (Exact("hiv"), "CLIA"),
    (Contains("hbsag"), "CLIA"),
    (Exact("hcv"), "CLIA"),
    (Contains("hepatitis c"), "CLIA"),
    // Blood grouping
    (
        Contains("abo"),
        "Forward & Reverse Grouping (Tube/Slide Agglutination)",
    ),
    (Contains("rh"), "Anti\u{2011}D Agglutination (Tube/Slide)"),
    // Microbiology
    (Contains("culture"), "Culture & Sensitivity"),
    (Contains("sputum afb"), "Ziehl\u{2013}Neelsen Microscopy"),
    (Contains("malaria"), "Rapid Immunochromatographic"),
    (Contains("dengue"), "Rapid Immunochromatographic"),
    (Contains("widal"), "Tube Agglutination"),
    // Urine and body fluids
    (Contains("urine protein"), "Urine Dipstick (Strip)"),
    (Contains("urine sugar"), "Urine Dipstick (Strip)"),
    (Contains("urine ketone"), "Urine Dipstick (Strip)"),
    (Contains("urine blood"), "Urine Dipstick (Strip)"),
    (Contains("urine wbc"), "Microscopy"),
    (Contains("urine rbc"), "Microscopy"),
    (Contains("stool occult"), "Immunochemical"),
    (Contains("parasite"), "Microscopy"),
    (Contains("semen"), "Microscopy & Biochemical Assessment"),
    (Contains("csf"), "Microscopy & Biochemical Assessment"),
    (Contains("ascitic"), "Microscopy & Biochemical Assessment"),
];

/// Look up the assay method for a test name (case-insensitive).
pub fn method_for(test_name: &str) -> Option<&'static str> {
    let name = test_name.to_lowercase();
    METHODS
        .iter()
        .find(|(matcher, _)| matcher.matches(&name))
        .map(|(_, method)| *method)
}
