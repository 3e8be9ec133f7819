use super::parse_rules_str;
use super::schema::RuleTable;
use crate::error::LabError;

const RULES_JSON: &str = include_str!("../../../../data/rules.json");

/// Load the interpretation rules bundled with the crate.
pub fn load_builtin() -> Result<RuleTable, LabError> {
    parse_rules_str(RULES_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_rules() {
        let table = load_builtin().unwrap();
        assert!(!table.is_empty());
        assert!(table.get("Blood Sugar").is_some());
    }

    #[test]
    fn test_builtin_groups_in_file_order() {
        let table = load_builtin().unwrap();
        assert_eq!(table.groups()[0].key, "Blood Sugar");
        assert_eq!(table.groups()[1].key, "Kidney Function Test (KFT)");
    }

    #[test]
    fn test_builtin_rules_all_have_conditions() {
        let table = load_builtin().unwrap();
        for group in table.groups() {
            for rule in &group.rules {
                assert!(rule.conditions().is_some(), "{}", rule.message);
            }
        }
    }
}
