use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlnqCoreError {
    #[error("Invalid residue position token: {0}")]
    InvalidPosition(String),

    #[error("Residue position 0 is not allowed, positions are 1-based")]
    ZeroPosition,
}
