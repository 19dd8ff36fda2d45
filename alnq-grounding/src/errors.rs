use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroundingError {
    #[error("Didn't find a way to split up the core {span}\nfull sequence[{offset}:]: {remainder}")]
    UnresolvedSpan {
        span: String,
        offset: usize,
        remainder: String,
    },

    #[error("Didn't find the {core} core in the full sequence")]
    KnownCoreNotFound { core: String },

    #[error("{count} residue(s) before the first core boundary ({first}) in {aligned}")]
    ResiduesBeforeFirstCore {
        count: usize,
        first: usize,
        aligned: String,
    },

    #[error("No full sequence found for {0}")]
    UnknownSequence(String),

    #[error("Incorrect character ({ch}) in the sequence ({seq})")]
    InvalidCharacter { ch: char, seq: String },

    #[error("Incorrect character ({ch}) in the corvar line ({line})")]
    InvalidCorvarChar { ch: char, line: String },

    #[error(
        "There was an error processing sequence {id}.\nfull sequence:\n{full}\ncore sequence:\n{aligned}\n{source}"
    )]
    Sequence {
        id: String,
        full: String,
        aligned: String,
        source: Box<GroundingError>,
    },
}
