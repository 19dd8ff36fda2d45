//! # Alignment quality scoring
//!
//! Scores a grounded test alignment against a gold standard in two modes:
//!
//! - simple: pairwise or multiple gold alignments, a confusion matrix and a normalised SP
//!   score per pair of sequences ([calc_scores])
//! - extended: a multi-solution gold standard with weighted acceptable placements per
//!   residue ([calc_scores_extended])
//!
//! Stats, reports and the comparison of two alignments of the same sequences live here too.
pub mod compare;
pub mod config;
pub mod context;
pub mod errors;
pub mod extended;
pub mod gold;
pub mod pairwise;
pub mod report;
pub mod sanity;
pub mod stats;

// re-exports
pub use compare::{ComparisonResult, compare_alignments, compare_pairwise};
pub use config::{ScoringConfig, ScoringConfigError};
pub use context::{ExtendedMode, ScoringContext};
pub use errors::ScoringError;
pub use extended::{ExtendedScoreResult, ResidueScore, calc_scores_extended};
pub use gold::{ExtendedGold, GoldLookup, MultiGold, PairwiseGold, ScoreCategory, SolutionKey};
pub use pairwise::{PairwiseScoreResult, ScoreSummary, calc_scores, score_pair};
pub use report::{ExtendedReport, ScoreReport, extended_text_report, text_report};
pub use stats::{Stats, calc_stats};
