pub mod normalize;
pub mod range;
pub mod values;

use crate::error::LabError;
use crate::model::Observation;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// A JSON object read as `(key, value)` pairs in document order.
pub(crate) struct Entries<V>(pub(crate) Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Entries<V>, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Accepted shapes for a batch of entered results.
#[derive(Deserialize)]
#[serde(untagged)]
enum ObservationInput {
    /// `[{"testName": "...", "value": "..."}, ...]`
    List(Vec<Observation>),
    /// Form state keyed by category, then test name:
    /// `{"biochemistry": {"Urea": "18", ...}, ...}`
    Form(Entries<Entries<String>>),
}

/// Parse observations from JSON, either as a flat list or as form state.
///
/// Form state is flattened in document order, category by category. Blank
/// values are kept; the engine treats them as absent.
pub fn parse_observations(json: &str) -> Result<Vec<Observation>, LabError> {
    let input: ObservationInput = serde_json::from_str(json)
        .map_err(|e| LabError::ObservationsLoad(e.to_string()))?;

    let observations = match input {
        ObservationInput::List(list) => list,
        ObservationInput::Form(form) => flatten_form(form),
    };

    Ok(observations)
}

fn flatten_form(form: Entries<Entries<String>>) -> Vec<Observation> {
    form.0
        .into_iter()
        .flat_map(|(_, tests)| {
            tests
                .0
                .into_iter()
                .map(|(test_name, value)| Observation { test_name, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let obs = parse_observations(
            r#"[{"testName": "HbA1c", "value": "7"}, {"testName": "Urine Blood", "value": "2+"}]"#,
        )
        .unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0], Observation::new("HbA1c", "7"));
        assert_eq!(obs[1].value, "2+");
    }

    #[test]
    fn test_parse_form_state() {
        let obs = parse_observations(
            r#"{"biochemistry": {"Urea": "18", "Creatinine": ""}, "fluids": {"Urine Blood": "1+"}}"#,
        )
        .unwrap();
        assert_eq!(obs.len(), 3);
        assert!(obs.contains(&Observation::new("Urea", "18")));
        assert!(obs.iter().any(|o| o.test_name == "Creatinine" && o.is_blank()));
    }

    #[test]
    fn test_form_state_keeps_entry_order() {
        let obs = parse_observations(
            r#"{"z": {"HbA1c": "9", "Another": "1"}, "a": {"Glucose": "5"}}"#,
        )
        .unwrap();
        let names: Vec<&str> = obs.iter().map(|o| o.test_name.as_str()).collect();
        assert_eq!(names, vec!["HbA1c", "Another", "Glucose"]);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_observations("[]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(parse_observations(r#"{"testName": 5}"#).is_err());
        assert!(parse_observations("not json").is_err());
    }
}
