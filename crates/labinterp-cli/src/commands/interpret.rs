use labinterp_core::catalog::{self, Catalog};
use labinterp_core::error::LabError;
use labinterp_core::interpret::Interpreter;
use labinterp_core::parsing::normalize::{self, AliasTable};
use labinterp_core::rules::{self, schema::RuleTable};
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    input_file: PathBuf,
    catalog_file: Option<PathBuf>,
    aliases_file: Option<PathBuf>,
    rules_file: Option<PathBuf>,
    output_format: &str,
    flat: bool,
) -> Result<(), LabError> {
    let interpreter = Interpreter::new(
        load_catalog(catalog_file.as_deref())?,
        load_aliases(aliases_file.as_deref())?,
        load_rules(rules_file.as_deref())?,
    );

    let observations = labinterp_core::load_observations(&input_file)?;
    tracing::debug!(
        file = %input_file.display(),
        count = observations.len(),
        "loaded observations"
    );

    if flat {
        let messages = interpreter.evaluate_flat(&observations);
        return match output_format {
            "json" => output::json::print(&messages),
            _ => {
                output::table::print_messages(&messages);
                Ok(())
            }
        };
    }

    let report = interpreter.build_report(&observations);
    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, LabError> {
    match path {
        Some(p) => catalog::load_catalog(p),
        None => catalog::builtin::load_builtin(),
    }
}

fn load_aliases(path: Option<&Path>) -> Result<AliasTable, LabError> {
    match path {
        Some(p) => normalize::load_aliases(p),
        None => normalize::builtin_aliases(),
    }
}

pub(crate) fn load_rules(path: Option<&Path>) -> Result<RuleTable, LabError> {
    match path {
        Some(p) => rules::load_rules(p),
        None => rules::builtin::load_builtin(),
    }
}
