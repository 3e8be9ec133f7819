use crate::parsing::Entries;
use rust_decimal::Decimal;
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
}

impl Operator {
    /// Apply the operator as `value <op> threshold`.
    pub fn compare(self, value: Decimal, threshold: Decimal) -> bool {
        match self {
            Operator::Gt => value > threshold,
            Operator::Lt => value < threshold,
            Operator::Ge => value >= threshold,
            Operator::Le => value <= threshold,
            Operator::Eq => value == threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Eq => "==",
        };
        write!(f, "{s}")
    }
}

/// A numeric comparison against one test's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Test name; aliases are resolved before lookup.
    pub test: String,
    pub op: Operator,
    #[serde(rename = "value", deserialize_with = "decimal_from_number_or_str")]
    pub threshold: Decimal,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.test, self.op, self.threshold)
    }
}

/// A declarative interpretation rule.
///
/// `when` is a single condition; `all` is a conjunction. When both are
/// present `when` is used. A rule with neither never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<Condition>,
    pub message: String,
    /// Destination group, overriding the table key the rule is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<Vec<String>>,
}

impl Rule {
    /// The conditions that must all hold, or `None` for a rule that can
    /// never match.
    pub fn conditions(&self) -> Option<&[Condition]> {
        match &self.when {
            Some(when) => Some(std::slice::from_ref(when)),
            None if !self.all.is_empty() => Some(&self.all),
            None => None,
        }
    }

    /// True if the rule carries suggestions, drug classes or references.
    pub fn is_detailed(&self) -> bool {
        self.suggestions.is_some() || self.drug_classes.is_some() || self.refs.is_some()
    }
}

/// Rules listed under one table key (a category or panel name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    pub key: String,
    pub rules: Vec<Rule>,
}

/// The rule table: group key -> ordered rules, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    groups: Vec<RuleGroup>,
}

impl RuleTable {
    pub fn new() -> RuleTable {
        RuleTable::default()
    }

    /// Append rules under `key`, extending the group if it already exists.
    pub fn push(&mut self, key: impl Into<String>, rules: Vec<Rule>) {
        let key = key.into();
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.rules.extend(rules),
            None => self.groups.push(RuleGroup { key, rules }),
        }
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&[Rule]> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.rules.as_slice())
    }

    /// Total number of rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Rule>)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Rule>)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (key, rules) in iter {
            table.push(key, rules);
        }
        table
    }
}

impl Serialize for RuleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.rules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Entries(groups) = Entries::<Vec<Rule>>::deserialize(deserializer)?;
        Ok(groups.into_iter().collect())
    }
}

/// Accept thresholds written either as JSON numbers or as strings.
fn decimal_from_number_or_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    let text = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    };
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| de::Error::custom(format!("invalid threshold '{text}': {e}")))
}
