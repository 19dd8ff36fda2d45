//! Grounding engine for alignment quality scoring.
//!
//! An aligned "core" sequence only tells us which residues sit in which alignment column.
//! To compare it against a gold standard we need to know, for every aligned residue, its
//! 1-based position in the full ungapped sequence it came from. This crate computes that
//! mapping ("grounding").
//!
//! All position bookkeeping lives here. The io and scoring crates consume
//! [GroundedSeq](alnq_core::GroundedSeq) values and should not re-derive positions.
//!
//! ## Quick Start
//!
//! ```rust
//! use alnq_grounding::{ground_core_seq, variable_region};
//!
//! let result = ground_core_seq("--ABC--D", "SABCSD").unwrap();
//! assert_eq!(result.grounded.to_string(), "- - 2 3 4 - - 6");
//!
//! // full-sequence positions left out of every core
//! let var = variable_region(&result.grounded, 6);
//! assert_eq!(var, vec![1, 5]);
//! ```
//!
//! ## Repeated and interrupted cores
//!
//! A core that cannot be found verbatim in the full sequence (because the aligner stitched
//! together residues that are not contiguous) is split into sub-spans, each located after
//! the previous one. Searching always resumes after the last resolved span, so an earlier,
//! shorter duplicate of a core is never matched twice.
//!
//! Core boundaries can also be supplied from a `final_core` file, in which case
//! [ground_known_cores] skips the search and split logic entirely.
//!
pub mod corvar;
pub mod errors;
pub mod grounding;
pub mod span;
pub mod split;
pub mod variable;

// re-exports
pub use corvar::{CorvarSeq, aln_seq_to_num, corvar_to_num};
pub use errors::GroundingError;
pub use grounding::{
    GroundingResult, core_indexes_from_grounded, ground_alignment, ground_core_seq,
    ground_known_cores,
};
pub use span::{CoreSpan, find_wildcard, next_core_span};
pub use split::{Segment, SplitFailure, resolve_span};
pub use variable::variable_region;
