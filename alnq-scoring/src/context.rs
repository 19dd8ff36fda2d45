use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const ALIGNED: &str = "a";
pub const UNALIGNED: &str = "u";
pub const DONT_KNOW: &str = "d";

///
/// How residues the test alignment leaves unplaced are treated in extended scoring.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtendedMode {
    /// residues gold aligns but the test leaves out are penalised
    #[default]
    Strict,
    /// unplaced residues are ignored
    Lenient,
}

///
/// Configuration passed to every scoring function.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    /// weight of each score category label
    pub weights: HashMap<String, f64>,
    pub mode: ExtendedMode,
}

fn default_weights() -> HashMap<String, f64> {
    HashMap::from([
        (ALIGNED.to_string(), 1.0),
        ("b".to_string(), 0.8),
        ("c".to_string(), 0.5),
        (DONT_KNOW.to_string(), 0.0),
        (UNALIGNED.to_string(), -1.0),
    ])
}

impl Default for ScoringContext {
    fn default() -> Self {
        ScoringContext {
            weights: default_weights(),
            mode: ExtendedMode::default(),
        }
    }
}

impl ScoringContext {
    pub fn new(mode: ExtendedMode) -> Self {
        ScoringContext {
            mode,
            ..Default::default()
        }
    }

    ///
    /// Override category weights, e.g. with the `score_modifiers` of a gold file.
    ///
    pub fn with_modifiers(mut self, modifiers: &HashMap<String, f64>) -> Self {
        for (label, weight) in modifiers {
            self.weights.insert(label.clone(), *weight);
        }
        self
    }

    pub fn weight(&self, label: &str) -> Option<f64> {
        self.weights.get(label).copied()
    }

    pub fn aligned_weight(&self) -> f64 {
        self.weight(ALIGNED).unwrap_or(1.0)
    }

    /// Penalty for a residue aligned where it should not be
    pub fn unaligned_weight(&self) -> f64 {
        self.weight(UNALIGNED).unwrap_or(-1.0)
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ExtendedMode::Strict
    }
}
