use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::{ExtendedMode, ScoringContext};

///
/// Scoring settings read from a TOML file:
///
/// ```toml
/// mode = "lenient"
///
/// [weights]
/// b = 0.7
/// ```
///
#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ScoringConfig {
    pub mode: Option<ExtendedMode>,
    /// overrides of the default category weights
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Error, Debug)]
pub enum ScoringConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl TryFrom<&Path> for ScoringConfig {
    type Error = ScoringConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl From<ScoringConfig> for ScoringContext {
    fn from(config: ScoringConfig) -> Self {
        let ctx = ScoringContext::new(config.mode.unwrap_or_default());
        match config.weights {
            Some(weights) => ctx.with_modifiers(&weights),
            None => ctx,
        }
    }
}
