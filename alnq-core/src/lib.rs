//! # Core models for alignment quality scoring.
//!
//! This crate holds the value types every other alnq crate passes around:
//!
//! - [GroundedSeq]: an aligned sequence where every residue is replaced by its 1-based
//!   position in the full, ungapped sequence
//! - [GroundedAlignment]: a set of grounded sequences plus their variable regions
//! - [PairKey]: an order-independent key for a pair of sequence identifiers
//! - [ConfusionMatrix]: TP/FP/TN/FN counters
//!
//! It also carries small reader and merge utilities shared by the io and scoring crates.
//!
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use errors::AlnqCoreError;
pub use models::{ConfusionMatrix, GroundedAlignment, GroundedSeq, PairKey};
