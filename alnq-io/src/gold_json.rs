use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use alnq_core::utils::get_dynamic_reader;

use crate::error::{ParserError, Result};

///
/// Category of a gold solution as written in the file: a label looked up in the score
/// modifier table, or an explicit weight.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Weight(f64),
    Label(String),
}

///
/// One acceptable placement of a residue: a target residue number (or `*` for "not aligned")
/// with its category.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub key: String,
    pub category: RawCategory,
}

///
/// Extended gold standard: for every non-target identifier, the solutions of each of its
/// residues, in file order.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldJson {
    pub target: String,
    pub score_modifiers: HashMap<String, f64>,
    pub alignments: BTreeMap<String, BTreeMap<u32, Vec<RawSolution>>>,
}

#[derive(Deserialize)]
struct GoldJsonFile {
    target: String,
    #[serde(default)]
    score_modifiers: HashMap<String, f64>,
    alignments: BTreeMap<String, Map<String, Value>>,
}

fn parse_solutions(id: &str, residue: &str, value: Value) -> Result<Vec<RawSolution>> {
    let Value::Object(solutions) = value else {
        return Err(ParserError::GoldJson(format!(
            "solutions of residue {} of {} are not an object",
            residue, id
        )));
    };

    // insertion order is kept by serde_json's preserve_order
    solutions
        .into_iter()
        .map(|(key, category)| {
            let category = serde_json::from_value::<RawCategory>(category).map_err(|_| {
                ParserError::GoldJson(format!(
                    "invalid category for residue {} of {} (solution {})",
                    residue, id, key
                ))
            })?;
            Ok(RawSolution { key, category })
        })
        .collect()
}

///
/// Parse extended gold standard JSON text.
///
pub fn parse_gold_json(text: &str) -> Result<GoldJson> {
    let file: GoldJsonFile = serde_json::from_str(text)?;

    let mut alignments = BTreeMap::new();
    for (id, residues) in file.alignments {
        let mut parsed = BTreeMap::new();
        for (residue, value) in residues {
            let position: u32 = residue.trim().parse().map_err(|_| {
                ParserError::GoldJson(format!("invalid residue number {} of {}", residue, id))
            })?;
            parsed.insert(position, parse_solutions(&id, &residue, value)?);
        }
        alignments.insert(id, parsed);
    }

    Ok(GoldJson {
        target: file.target,
        score_modifiers: file.score_modifiers,
        alignments,
    })
}

///
/// Read an extended gold standard JSON file.
///
pub fn read_gold_json(path: &Path) -> Result<GoldJson> {
    info!("Parsing gold standard JSON: {:?}", path);
    if !path.exists() {
        return Err(ParserError::FileNotFound(path.to_path_buf()));
    }
    let text = std::io::read_to_string(get_dynamic_reader(path)?)?;
    parse_gold_json(&text)
}

///
/// The multiple `.Var` file holding the full sequences of a gold JSON file:
/// `final_core.json` pairs with `final_core.txt.Var`.
///
pub fn companion_var_path(path: &Path) -> PathBuf {
    path.with_extension("txt.Var")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn gold_text() -> &'static str {
        r#"{
            "target": "1ABCA",
            "score_modifiers": {"a": 1, "b": 0.8, "u": -1},
            "alignments": {
                "1DEFA": {
                    "1": {"*": "u"},
                    "4": {"28": "partial(0.5)", "27": "m2", "3": 0.25},
                    "5": {"2": "a"}
                }
            }
        }"#
    }

    #[rstest]
    fn test_parse_gold_json(gold_text: &str) {
        let gold = parse_gold_json(gold_text).unwrap();
        assert_eq!(gold.target, "1ABCA");
        assert_eq!(gold.score_modifiers["b"], 0.8);

        let residues = &gold.alignments["1DEFA"];
        assert_eq!(residues.keys().copied().collect::<Vec<u32>>(), vec![1, 4, 5]);

        // file order, not sorted
        let keys: Vec<&str> = residues[&4].iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["28", "27", "3"]);
        assert_eq!(
            residues[&4][2].category,
            RawCategory::Weight(0.25)
        );
        assert_eq!(
            residues[&1][0],
            RawSolution {
                key: "*".to_string(),
                category: RawCategory::Label("u".to_string())
            }
        );
    }

    #[rstest]
    fn test_parse_gold_json_without_modifiers() {
        let gold = parse_gold_json(r#"{"target": "a", "alignments": {}}"#).unwrap();
        assert!(gold.score_modifiers.is_empty());
        assert!(gold.alignments.is_empty());
    }

    #[rstest]
    #[case(r#"{"target": "a", "alignments": {"b": {"x": {"1": "a"}}}}"#)]
    #[case(r#"{"target": "a", "alignments": {"b": {"1": ["a"]}}}"#)]
    #[case(r#"{"target": "a", "alignments": {"b": {"1": {"2": true}}}}"#)]
    fn test_parse_gold_json_invalid(#[case] text: &str) {
        assert!(matches!(parse_gold_json(text), Err(ParserError::GoldJson(_))));
    }

    #[rstest]
    fn test_read_gold_json(gold_text: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("final_core.json");
        std::fs::write(&path, gold_text).unwrap();

        let gold = read_gold_json(&path).unwrap();
        assert_eq!(gold.alignments.len(), 1);
        assert_eq!(companion_var_path(&path), tempdir.path().join("final_core.txt.Var"));
    }
}
