//! # alnq: alignment quality scoring
//!
//! Scores a test protein alignment against a gold standard. The test alignment is first
//! "grounded" (every aligned residue replaced by its position in the full sequence), then
//! compared pair by pair against pairwise or multiple gold alignments, or residue by residue
//! against a multi-solution gold standard.
//!
//! Each part lives in its own crate and is re-exported here behind a feature:
//!
//! - `core`: value types ([core::GroundedSeq], [core::ConfusionMatrix], ...)
//! - `grounding`: the grounding engine and variable-region derivation
//! - `io`: readers for alignments and gold standards
//! - `scoring`: simple and extended scoring, stats and reports
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use alnq_core as core;

#[cfg(feature = "grounding")]
#[doc(inline)]
pub use alnq_grounding as grounding;

#[cfg(feature = "io")]
#[doc(inline)]
pub use alnq_io as io;

#[cfg(feature = "scoring")]
#[doc(inline)]
pub use alnq_scoring as scoring;
