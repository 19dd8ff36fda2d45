use thiserror::Error;

use alnq_core::models::{ConfusionMatrix, GroundedSeq, PairKey};

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Aligned sequences {id1} and {id2} are not of the same length: {len1} and {len2}")]
    LengthMismatch {
        id1: String,
        id2: String,
        len1: usize,
        len2: usize,
    },

    #[error(
        "Sum of values in the confusion matrix ({matrix}, total {total}) should be equal to the total number of residues ({residues})\n{id1}: {seq1}\n{id2}: {seq2}\nvar {id1}: {var1:?}\nvar {id2}: {var2:?}"
    )]
    SanityCheck {
        id1: String,
        id2: String,
        seq1: GroundedSeq,
        seq2: GroundedSeq,
        var1: Vec<u32>,
        var2: Vec<u32>,
        matrix: ConfusionMatrix,
        total: u32,
        residues: u32,
    },

    #[error("Residue {residue} from sequence {id} is not present in the gold alignment")]
    ResidueNotInGold { id: String, residue: u32 },

    #[error("No gold standard alignment for the pair {0}")]
    MissingGoldPair(PairKey),

    #[error("Unknown score category: {0}")]
    UnknownCategory(String),

    #[error("Score weight {0} is outside [-1, 1]")]
    WeightOutOfRange(f64),

    #[error("Invalid solution {key} for residue {residue} of {id}")]
    InvalidSolution { id: String, residue: u32, key: String },

    #[error("Target sequence {0} is not present in the test alignment")]
    MissingTarget(String),

    #[error("Score on position {position} of {id} is higher than the max score: {score} vs {max}")]
    AboveMax {
        id: String,
        position: u32,
        score: f64,
        max: f64,
    },
}
