//! Extended scoring against a multi-solution gold standard.
//!
//! Every residue of a non-target sequence is scored on its own: the core pass rewards the
//! target residue it is aligned to with the weight of the matching gold solution, the
//! unplaced pass (strict mode only) penalises residues the test alignment leaves out while
//! the gold standard aligns them.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use alnq_core::models::{GroundedAlignment, GroundedSeq};

use crate::context::ScoringContext;
use crate::errors::ScoringError;
use crate::gold::{ExtendedGold, Solution, SolutionKey};

///
/// Outcome for one residue: whether its placement is acceptable, and the weight it added
/// to the total.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "(bool, f64)")]
pub struct ResidueScore {
    pub accepted: bool,
    pub weight: f64,
}

impl ResidueScore {
    pub fn new(accepted: bool, weight: f64) -> Self {
        ResidueScore { accepted, weight }
    }
}

impl From<ResidueScore> for (bool, f64) {
    fn from(value: ResidueScore) -> Self {
        (value.accepted, value.weight)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtendedScoreResult {
    /// total divided by the max attainable score; `None` when that is 0
    pub overall_score: Option<f64>,
    pub total_score: f64,
    pub max_score: f64,
    pub per_residue_scores: BTreeMap<String, BTreeMap<u32, ResidueScore>>,
    pub max_scores: BTreeMap<String, BTreeMap<u32, f64>>,
    /// identifiers that could not be scored, with the reason
    pub failures: BTreeMap<String, String>,
}

///
/// Highest weight a residue can earn: the best target-keyed, non-penalty solution, or 0.
///
pub fn residue_max_score(solutions: &[Solution]) -> f64 {
    solutions
        .iter()
        .filter(|s| matches!(s.key, SolutionKey::Target(_)) && !s.category.is_penalty())
        .fold(0.0, |max, s| f64::max(max, s.weight))
}

///
/// Max attainable score of every residue of every non-target gold identifier.
///
pub fn max_scores(gold: &ExtendedGold) -> BTreeMap<String, BTreeMap<u32, f64>> {
    gold.alignments
        .iter()
        .filter(|(id, _)| **id != gold.target)
        .map(|(id, residues)| {
            let maxes = residues
                .iter()
                .map(|(residue, solutions)| (*residue, residue_max_score(solutions)))
                .collect();
            (id.clone(), maxes)
        })
        .collect()
}

///
/// Score a residue aligned to target residue `target_residue`.
///
/// Solutions are walked in file order: a `*` solution stops the walk with the unaligned
/// penalty, a solution naming `target_residue` awards its weight.
///
pub fn score_aligned_residue(
    solutions: Option<&[Solution]>,
    target_residue: u32,
    ctx: &ScoringContext,
) -> ResidueScore {
    let penalty = ResidueScore::new(false, ctx.unaligned_weight());

    for solution in solutions.unwrap_or_default() {
        match solution.key {
            SolutionKey::Unaligned => return penalty,
            SolutionKey::Target(t) if t == target_residue => {
                return ResidueScore::new(true, solution.weight);
            }
            SolutionKey::Target(_) => {}
        }
    }
    penalty
}

///
/// Score a residue the test alignment leaves unplaced.
///
/// Correct when the gold standard has no entry for it or only lists `*`, otherwise
/// penalised by the mean weight of all its listed solutions.
///
pub fn score_unplaced_residue(solutions: Option<&[Solution]>) -> ResidueScore {
    let solutions = solutions.unwrap_or_default();
    if solutions.iter().all(|s| s.key == SolutionKey::Unaligned) {
        return ResidueScore::new(true, 0.0);
    }

    let avg = solutions.iter().map(|s| s.weight).sum::<f64>() / solutions.len() as f64;
    ResidueScore::new(false, -avg)
}

///
/// Score every residue of one non-target sequence.
///
fn score_sequence(
    gold: &ExtendedGold,
    id: &str,
    seq: &GroundedSeq,
    var: &[u32],
    target_seq: &GroundedSeq,
    ctx: &ScoringContext,
) -> Result<BTreeMap<u32, ResidueScore>, ScoringError> {
    if seq.len() != target_seq.len() {
        return Err(ScoringError::LengthMismatch {
            id1: id.to_string(),
            id2: gold.target.clone(),
            len1: seq.len(),
            len2: target_seq.len(),
        });
    }

    let mut scores = BTreeMap::new();
    let mut unplaced: BTreeSet<u32> = var.iter().copied().collect();

    for (residue, target_residue) in seq.iter().zip(target_seq.iter()) {
        let Some(residue) = *residue else {
            continue;
        };
        match target_residue {
            Some(t) => {
                let score = score_aligned_residue(gold.solutions(id, residue), *t, ctx);
                scores.insert(residue, score);
            }
            // aligned to nothing on the target side
            None => {
                unplaced.insert(residue);
            }
        }
    }

    if ctx.is_strict() {
        for residue in unplaced {
            scores.insert(residue, score_unplaced_residue(gold.solutions(id, residue)));
        }
    }

    Ok(scores)
}

///
/// Score a grounded test alignment against an extended gold standard.
///
/// # Arguments
/// - gold: extended gold standard
/// - test: grounded test alignment, which must contain the gold target
/// - ctx: weights and mode
pub fn calc_scores_extended(
    gold: &ExtendedGold,
    test: &GroundedAlignment,
    ctx: &ScoringContext,
) -> Result<ExtendedScoreResult, ScoringError> {
    info!("Calculating extended scores ({:?} mode)", ctx.mode);

    let target_seq = test
        .seq(&gold.target)
        .ok_or_else(|| ScoringError::MissingTarget(gold.target.clone()))?;

    let ids: Vec<&String> = test
        .ids()
        .filter(|id| **id != gold.target)
        .filter(|id| {
            let known = gold.alignments.contains_key(id.as_str());
            if !known {
                warn!("Sequence {} is not part of the gold standard, skipping", id);
            }
            known
        })
        .collect();

    let results: Vec<(&String, Result<BTreeMap<u32, ResidueScore>, ScoringError>)> = ids
        .par_iter()
        .map(|&id| {
            debug!("Scoring residues of {} against {}", id, gold.target);
            let scores = match test.seq(id) {
                Some(seq) => {
                    score_sequence(gold, id, seq, test.var_region(id), target_seq, ctx)
                }
                None => Ok(BTreeMap::new()),
            };
            (id, scores)
        })
        .collect();

    let max_scores = max_scores(gold);
    let mut result = ExtendedScoreResult {
        max_score: max_scores.values().flat_map(|m| m.values()).sum(),
        max_scores,
        ..Default::default()
    };

    for (id, scores) in results {
        match scores {
            Ok(scores) => {
                result.total_score += scores.values().map(|s| s.weight).sum::<f64>();
                result.per_residue_scores.insert(id.clone(), scores);
            }
            Err(e) => {
                warn!("Could not score {}: {}", id, e);
                result.failures.insert(id.clone(), e.to_string());
            }
        }
    }

    result.overall_score =
        (result.max_score != 0.0).then(|| result.total_score / result.max_score);
    Ok(result)
}
