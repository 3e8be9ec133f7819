use crate::rules::schema::Rule;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// A matched rule's message together with its supporting detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedFinding {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<Vec<String>>,
}

/// One line of interpretation: a bare message or a detailed finding.
///
/// Serializes as a JSON string or an object respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterpretationItem {
    Message(String),
    Detailed(DetailedFinding),
}

impl InterpretationItem {
    pub fn message(&self) -> &str {
        match self {
            InterpretationItem::Message(m) => m,
            InterpretationItem::Detailed(d) => &d.message,
        }
    }

    pub fn detail(&self) -> Option<&DetailedFinding> {
        match self {
            InterpretationItem::Message(_) => None,
            InterpretationItem::Detailed(d) => Some(d),
        }
    }
}

impl From<&Rule> for InterpretationItem {
    fn from(rule: &Rule) -> InterpretationItem {
        if rule.is_detailed() {
            InterpretationItem::Detailed(DetailedFinding {
                message: rule.message.clone(),
                suggestions: rule.suggestions.clone(),
                drug_classes: rule.drug_classes.clone(),
                refs: rule.refs.clone(),
            })
        } else {
            InterpretationItem::Message(rule.message.clone())
        }
    }
}

/// Interpretation items under one display group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationGroup {
    pub group: String,
    pub items: Vec<InterpretationItem>,
}

/// Interpretation items keyed by group, in first-insertion order.
///
/// Groups only exist once an item has been added to them, so a finished
/// result never contains an empty group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedInterpretations {
    groups: Vec<InterpretationGroup>,
}

impl GroupedInterpretations {
    pub fn new() -> GroupedInterpretations {
        GroupedInterpretations::default()
    }

    pub fn push(&mut self, group: &str, item: InterpretationItem) {
        match self.groups.iter_mut().find(|g| g.group == group) {
            Some(existing) => existing.items.push(item),
            None => self.groups.push(InterpretationGroup {
                group: group.to_string(),
                items: vec![item],
            }),
        }
    }

    /// Drop repeated messages within each group, keeping the first
    /// occurrence (and whatever detail it carries).
    pub fn dedup(&mut self) {
        for group in &mut self.groups {
            let mut seen = HashSet::new();
            group
                .items
                .retain(|item| seen.insert(item.message().to_string()));
        }
    }

    pub fn get(&self, group: &str) -> Option<&[InterpretationItem]> {
        self.groups
            .iter()
            .find(|g| g.group == group)
            .map(|g| g.items.as_slice())
    }

    pub fn groups(&self) -> &[InterpretationGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every message across all groups, unique, in order of first
    /// appearance.
    pub fn messages(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .map(InterpretationItem::message)
            .filter(|m| seen.insert(*m))
            .map(str::to_string)
            .collect()
    }
}

impl Serialize for GroupedInterpretations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.group, &group.items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(message: &str) -> InterpretationItem {
        InterpretationItem::Detailed(DetailedFinding {
            message: message.into(),
            suggestions: Some(vec!["Repeat test".into()]),
            drug_classes: None,
            refs: None,
        })
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut result = GroupedInterpretations::new();
        result.push("sugar", detailed("High"));
        result.push("sugar", InterpretationItem::Message("High".into()));
        result.push("sugar", InterpretationItem::Message("Other".into()));
        result.dedup();

        let items = result.get("sugar").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].detail().is_some());
        assert_eq!(items[1].message(), "Other");
    }

    #[test]
    fn test_dedup_is_per_group() {
        let mut result = GroupedInterpretations::new();
        result.push("a", InterpretationItem::Message("same".into()));
        result.push("b", InterpretationItem::Message("same".into()));
        result.dedup();
        assert_eq!(result.get("a").unwrap().len(), 1);
        assert_eq!(result.get("b").unwrap().len(), 1);
        assert_eq!(result.messages(), vec!["same"]);
    }

    #[test]
    fn test_groups_keep_insertion_order() {
        let mut result = GroupedInterpretations::new();
        result.push("zeta", InterpretationItem::Message("1".into()));
        result.push("alpha", InterpretationItem::Message("2".into()));
        result.push("zeta", InterpretationItem::Message("3".into()));
        let keys: Vec<&str> = result.groups().iter().map(|g| g.group.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_serializes_bare_and_detailed_items() {
        let mut result = GroupedInterpretations::new();
        result.push("sugar", InterpretationItem::Message("plain".into()));
        result.push("sugar", detailed("rich"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sugar"][0], "plain");
        assert_eq!(json["sugar"][1]["message"], "rich");
        assert_eq!(json["sugar"][1]["suggestions"][0], "Repeat test");
        assert!(json["sugar"][1].get("refs").is_none());
    }
}
