//! # Readers for alignments and gold standards.
//!
//! Every reader returns plain data: aligned sequences as strings, gold standards as grounded
//! sequences or raw per-residue solution tables. Building the scoring model from them is
//! left to `alnq-scoring`.
//!
//! All readers accept gzip'd files transparently.
//!
pub mod core_aln;
pub mod error;
pub mod fasta;
pub mod final_core;
pub mod gold_json;
pub mod utils;
pub mod var_file;

// re-expose core functions
pub use core_aln::*;
pub use error::*;
pub use fasta::*;
pub use final_core::*;
pub use gold_json::*;
pub use var_file::*;
