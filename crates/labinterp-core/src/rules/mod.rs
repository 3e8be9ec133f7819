pub mod builtin;
pub mod schema;

use crate::error::LabError;
use schema::RuleTable;
use std::path::Path;

/// Load a rule table from a JSON file.
pub fn load_rules(path: &Path) -> Result<RuleTable, LabError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rules(&content, path)
}

/// Parse a rule table from a JSON string.
pub fn parse_rules(json: &str, source: &Path) -> Result<RuleTable, LabError> {
    let table: RuleTable = serde_json::from_str(json).map_err(|e| LabError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rules(&table)?;
    Ok(table)
}

/// Parse a rule table from a JSON string (no file path context).
pub fn parse_rules_str(json: &str) -> Result<RuleTable, LabError> {
    let table: RuleTable = serde_json::from_str(json).map_err(LabError::Json)?;
    validate_rules(&table)?;
    Ok(table)
}

/// Validate that a rule table is well-formed.
///
/// A rule without `when` or `all` is accepted (it can never match) but
/// logged, so a typo in a rule file does not silently disable a finding.
pub fn validate_rules(table: &RuleTable) -> Result<(), LabError> {
    for group in table.groups() {
        if group.key.trim().is_empty() {
            return Err(LabError::RulesInvalid("group key must not be empty".into()));
        }

        for rule in &group.rules {
            if rule.message.trim().is_empty() {
                return Err(LabError::RulesInvalid(format!(
                    "group '{}' has a rule with an empty message",
                    group.key
                )));
            }

            if let Some(ref target) = rule.group {
                if target.trim().is_empty() {
                    return Err(LabError::RulesInvalid(format!(
                        "rule '{}' has an empty group override",
                        rule.message
                    )));
                }
            }

            match rule.conditions() {
                Some(conditions) => {
                    if let Some(c) = conditions.iter().find(|c| c.test.trim().is_empty()) {
                        return Err(LabError::RulesInvalid(format!(
                            "rule '{}' has a condition without a test name ({})",
                            rule.message, c
                        )));
                    }
                }
                None => tracing::warn!(
                    group = %group.key,
                    message = %rule.message,
                    "rule has neither 'when' nor 'all' and will never match"
                ),
            }
        }
    }

    Ok(())
}
