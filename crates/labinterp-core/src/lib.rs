pub mod bioref;
pub mod catalog;
pub mod classify;
pub mod derived;
pub mod error;
pub mod interpret;
pub mod model;
pub mod parsing;
pub mod report;
pub mod rules;

use error::LabError;
use interpret::Interpreter;
use model::Observation;
use report::LabReport;
use std::path::Path;

/// Read observations from a JSON file (a list of `{testName, value}` or
/// form state keyed by category).
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, LabError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LabError::ObservationsLoad(format!("{}: {e}", path.display())))?;
    parsing::parse_observations(&content)
}

/// Main API entry point: parse observations and build the full report.
pub fn interpret_json(json: &str, interpreter: &Interpreter) -> Result<LabReport, LabError> {
    let observations = parsing::parse_observations(json)?;
    tracing::debug!(count = observations.len(), "parsed observations");
    Ok(interpreter.build_report(&observations))
}
