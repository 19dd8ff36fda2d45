use std::io;
use std::path::PathBuf;

use thiserror::Error;

use alnq_grounding::GroundingError;

/// Error type for alnq-io operations.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("No such directory: {0:?}")]
    NoSuchDirectory(PathBuf),

    #[error("File is empty: {0:?}")]
    EmptyFile(PathBuf),

    #[error("Sequence {0} is duplicated")]
    DuplicateSequence(String),

    #[error("Sequence data found before the first FASTA header in {0:?}")]
    MissingHeader(PathBuf),

    #[error("final_core file has incorrect format")]
    FinalCoreFormat,

    #[error("Core {core1} and {core2} have different lengths")]
    CoreLengthMismatch { core1: String, core2: String },

    #[error("Incorrect Var file: check number of cores")]
    WrongCoreCount,

    #[error("Malformed line in {path:?}: {line}")]
    MalformedLine { path: PathBuf, line: String },

    #[error("Invalid input format: {0}")]
    InvalidInputFormat(String),

    #[error("Invalid gold standard JSON: {0}")]
    GoldJson(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Grounding(#[from] GroundingError),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Read(#[from] anyhow::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for alnq-io operations.
pub type Result<T> = std::result::Result<T, ParserError>;
