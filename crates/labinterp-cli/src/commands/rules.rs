use labinterp_core::error::LabError;
use labinterp_core::rules::schema::{Rule, RuleTable};
use std::path::{Path, PathBuf};

use super::interpret::load_rules;

pub fn list(rules_file: Option<PathBuf>) -> Result<(), LabError> {
    let table = load_rules(rules_file.as_deref())?;

    println!("Rule groups ({} rules):\n", table.rule_count());
    let width = table
        .groups()
        .iter()
        .map(|g| g.key.chars().count())
        .max()
        .unwrap_or(10);
    for group in table.groups() {
        println!(
            "  {:<width$}  {} rule(s)",
            group.key,
            group.rules.len(),
            width = width
        );
    }
    Ok(())
}

pub fn explain(group_key: &str, rules_file: Option<PathBuf>) -> Result<(), LabError> {
    let table = load_rules(rules_file.as_deref())?;

    let group = table.groups().iter().find(|g| g.key == group_key).ok_or_else(|| {
        LabError::RulesInvalid(format!(
            "no rule group '{group_key}' (available: {})",
            group_names(&table)
        ))
    })?;

    println!("{} ({} rules)\n", group.key, group.rules.len());
    for rule in &group.rules {
        println!("  If {}:", describe_conditions(rule));
        println!("    {}", rule.message);
        if let Some(ref target) = rule.group {
            println!("    (reported under '{target}')");
        }
        print_list("Suggested actions", rule.suggestions.as_deref());
        print_list("Drug classes", rule.drug_classes.as_deref());
        print_list("References", rule.refs.as_deref());
        println!();
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LabError> {
    let table = labinterp_core::rules::load_rules(file)?;

    println!("Rule table '{}' is valid.", file.display());
    println!("  Groups: {}", group_names(&table));
    println!("  Rules: {}", table.rule_count());

    let mut warnings = Vec::new();
    for group in table.groups() {
        for rule in &group.rules {
            if rule.conditions().is_none() {
                warnings.push(format!(
                    "rule '{}' in '{}' has no conditions and will never match",
                    rule.message, group.key
                ));
            }
            if rule.when.is_some() && !rule.all.is_empty() {
                warnings.push(format!(
                    "rule '{}' in '{}' has both 'when' and 'all'; 'all' is ignored",
                    rule.message, group.key
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn group_names(table: &RuleTable) -> String {
    table
        .groups()
        .iter()
        .map(|g| g.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_conditions(rule: &Rule) -> String {
    match rule.conditions() {
        Some(conditions) => conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" and "),
        None => "never (no conditions)".to_string(),
    }
}

fn print_list(title: &str, items: Option<&[String]>) {
    if let Some(items) = items.filter(|i| !i.is_empty()) {
        println!("    {title}: {}", items.join("; "));
    }
}
