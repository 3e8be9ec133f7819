use crate::catalog::Catalog;
use crate::derived::{self, GlucoseEstimate};
use crate::error::LabError;
use crate::interpret::outcome::{GroupedInterpretations, InterpretationItem};
use crate::interpret::qualitative;
use crate::model::Observation;
use crate::parsing::normalize::{self, AliasTable, Canonicalizer};
use crate::parsing::values::parse_lenient_number;
use crate::report::{self, LabReport};
use crate::rules::schema::{Condition, Rule, RuleTable};
use crate::{catalog, rules};
use std::collections::HashMap;

/// Fallback group for results the catalog cannot place.
pub const FALLBACK_GROUP: &str = "Findings";

/// The interpretation engine.
///
/// Holds the reference data it works from; every evaluation is a pure
/// function of that data and the observations passed in.
#[derive(Debug, Clone)]
pub struct Interpreter {
    catalog: Catalog,
    aliases: AliasTable,
    rules: RuleTable,
}

impl Interpreter {
    pub fn new(catalog: Catalog, aliases: AliasTable, rules: RuleTable) -> Interpreter {
        Interpreter {
            catalog,
            aliases,
            rules,
        }
    }

    /// An interpreter over the bundled catalog, aliases and rules.
    pub fn builtin() -> Result<Interpreter, LabError> {
        Ok(Interpreter::new(
            catalog::builtin::load_builtin()?,
            normalize::builtin_aliases()?,
            rules::builtin::load_builtin()?,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn canonicalizer(&self) -> Canonicalizer<'_> {
        Canonicalizer::new(&self.aliases, &self.catalog)
    }

    pub fn canonicalize(&self, raw: &str) -> String {
        self.canonicalizer().canonicalize(raw)
    }

    /// Evaluate all rules and automatic notes, grouped for display.
    pub fn evaluate_grouped(&self, observations: &[Observation]) -> GroupedInterpretations {
        let canon = self.canonicalizer();
        let mut result = GroupedInterpretations::new();

        // Later observations of the same test overwrite earlier ones.
        let mut by_name: HashMap<String, &str> = HashMap::new();
        for obs in observations {
            let name = canon.canonicalize(&obs.test_name);
            by_name.insert(name.to_lowercase(), &obs.value);
        }

        for group in self.rules.groups() {
            for rule in &group.rules {
                if !rule_matches(rule, &by_name, &canon) {
                    continue;
                }
                let bucket = rule.group.as_deref().filter(|g| !g.is_empty()).unwrap_or(&group.key);
                tracing::debug!(group = bucket, message = %rule.message, "rule matched");
                result.push(bucket, InterpretationItem::from(rule));
            }
        }

        for obs in observations {
            let name = canon.canonicalize(&obs.test_name);
            if let Some(note) = qualitative::describe(&name, &obs.value) {
                let bucket = self.display_group(&name);
                result.push(&bucket, InterpretationItem::Message(note));
            }
        }

        result.dedup();
        result
    }

    /// All interpretation messages, unique, in display order.
    pub fn evaluate_flat(&self, observations: &[Observation]) -> Vec<String> {
        self.evaluate_grouped(observations).messages()
    }

    /// Estimated average glucose from the first HbA1c result, if any.
    pub fn estimate_mean_glucose(&self, observations: &[Observation]) -> Option<GlucoseEstimate> {
        derived::estimate_mean_glucose(&self.canonicalizer(), observations)
    }

    /// Rows, findings, urgency and interpretations for a whole report.
    pub fn build_report(&self, observations: &[Observation]) -> LabReport {
        report::build_report(self, observations)
    }

    /// Panel name for a canonical test name, falling back to the category
    /// and then to [`FALLBACK_GROUP`].
    pub fn display_group(&self, name: &str) -> String {
        self.catalog
            .find_test(name)
            .map(|loc| {
                if loc.panel.name.is_empty() {
                    loc.category.name.clone()
                } else {
                    loc.panel.name.clone()
                }
            })
            .unwrap_or_else(|| FALLBACK_GROUP.to_string())
    }
}

fn rule_matches(rule: &Rule, by_name: &HashMap<String, &str>, canon: &Canonicalizer<'_>) -> bool {
    match rule.conditions() {
        Some(conditions) => conditions
            .iter()
            .all(|c| condition_holds(c, by_name, canon)),
        None => false,
    }
}

fn condition_holds(
    condition: &Condition,
    by_name: &HashMap<String, &str>,
    canon: &Canonicalizer<'_>,
) -> bool {
    let key = canon.canonicalize(&condition.test).to_lowercase();
    by_name
        .get(&key)
        .and_then(|value| parse_lenient_number(value))
        .is_some_and(|value| condition.op.compare(value, condition.threshold))
}
