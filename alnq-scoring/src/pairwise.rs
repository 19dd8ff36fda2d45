//! Simple (pairwise) scoring of a grounded test alignment against a gold standard.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use alnq_core::models::{ConfusionMatrix, GroundedAlignment, GroundedSeq, PairKey};
use alnq_core::utils::merge_counts;

use crate::errors::ScoringError;
use crate::gold::GoldLookup;
use crate::sanity::check_pairwise_score;

/// Columns flagged as wrong, with the number of pairs that flagged them
pub type WrongCols = BTreeMap<usize, u32>;

///
/// Scores of one pair of test sequences.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PairwiseScoreResult {
    pub matrix: ConfusionMatrix,
    /// SP score divided by the highest reachable one; `None` when that is 0
    pub sp_score: Option<f64>,
    /// un-normalised SP score
    pub raw_sp_score: i64,
    pub wrong_cols: BTreeMap<String, WrongCols>,
}

///
/// Scores of a whole test alignment.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub pairwise: BTreeMap<PairKey, ConfusionMatrix>,
    pub full: ConfusionMatrix,
    pub sp_scores: BTreeMap<PairKey, Option<f64>>,
    pub wrong_cols: BTreeMap<String, WrongCols>,
    /// pairs that could not be scored, with the reason
    pub failures: BTreeMap<PairKey, String>,
}

impl ScoreSummary {
    ///
    /// Mean of the defined pairwise SP scores
    ///
    pub fn average_sp_score(&self) -> Option<f64> {
        let defined: Vec<f64> = self.sp_scores.values().flatten().copied().collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }
}

///
/// Score the variable-region residues of `id1`: correct (TN) when the gold standard leaves
/// them unaligned to `id2`, missed (FN) otherwise.
///
pub fn score_var_regions<G: GoldLookup + ?Sized>(
    gold: &G,
    id1: &str,
    id2: &str,
    var1: &[u32],
) -> Result<ConfusionMatrix, ScoringError> {
    let mut matrix = ConfusionMatrix::default();
    for &position in var1 {
        match gold.aligned_residue(id1, id2, position)? {
            None => matrix.tn += 1,
            Some(_) => matrix.fn_ += 1,
        }
    }
    Ok(matrix)
}

///
/// Score one pair of grounded test sequences against the gold standard.
///
/// A residue pair aligned as in the gold standard counts 2 true positives, otherwise 2 false
/// positives. A residue aligned to a gap counts 1 true negative when the gold standard
/// leaves it unaligned too, otherwise 1 false negative. Variable-region residues of both
/// sequences are scored the same way.
///
/// # Arguments
/// - gold: gold standard
/// - (id1, seq1, var1): identifier, grounded sequence and variable region of the first sequence
/// - (id2, seq2, var2): same for the second sequence
pub fn score_pair<G: GoldLookup + ?Sized>(
    gold: &G,
    (id1, seq1, var1): (&str, &GroundedSeq, &[u32]),
    (id2, seq2, var2): (&str, &GroundedSeq, &[u32]),
) -> Result<PairwiseScoreResult, ScoringError> {
    if seq1.len() != seq2.len() {
        return Err(ScoringError::LengthMismatch {
            id1: id1.to_string(),
            id2: id2.to_string(),
            len1: seq1.len(),
            len2: seq2.len(),
        });
    }

    let mut matrix = ConfusionMatrix::default();
    let mut sp: i64 = 0;
    let mut wrong: Vec<usize> = Vec::new();

    for (i, (res1, res2)) in seq1.iter().zip(seq2.iter()).enumerate() {
        match (*res1, *res2) {
            (Some(r1), Some(r2)) => {
                if gold.aligned_residue(id1, id2, r1)? == Some(r2) {
                    matrix.tp += 2;
                    sp += 2;
                } else {
                    matrix.fp += 2;
                    sp -= 2;
                    wrong.push(i);
                }
            }
            (Some(r), None) | (None, Some(r)) => {
                let (query, other) = if res1.is_some() { (id1, id2) } else { (id2, id1) };
                if gold.aligned_residue(query, other, r)?.is_none() {
                    matrix.tn += 1;
                    sp += 1;
                } else {
                    matrix.fn_ += 1;
                    wrong.push(i);
                }
            }
            (None, None) => {}
        }
    }

    let var_matrix1 = score_var_regions(gold, id1, id2, var1)?;
    let var_matrix2 = score_var_regions(gold, id2, id1, var2)?;
    matrix += var_matrix1 + var_matrix2;

    check_pairwise_score((id1, seq1, var1), (id2, seq2, var2), &matrix)?;

    let max_sp = gold.max_sp_score(id1, id2)?;
    let sp_score = (max_sp != 0).then(|| sp as f64 / max_sp as f64);

    let wrong_cols: WrongCols = wrong.into_iter().map(|i| (i, 1)).collect();
    Ok(PairwiseScoreResult {
        matrix,
        sp_score,
        raw_sp_score: sp,
        wrong_cols: BTreeMap::from([
            (id1.to_string(), wrong_cols.clone()),
            (id2.to_string(), wrong_cols),
        ]),
    })
}

///
/// Score every pair of test sequences that both belong to the gold standard.
///
/// Pairs are independent: they are scored in parallel and a pair that fails is logged and
/// recorded in [ScoreSummary::failures] without stopping the others.
///
pub fn calc_scores<G: GoldLookup + ?Sized>(gold: &G, test: &GroundedAlignment) -> ScoreSummary {
    info!("Calculating confusion matrices");

    let gold_ids = gold.ids();
    let ids: Vec<&String> = test.ids().filter(|id| gold_ids.contains(*id)).collect();

    let pairs: Vec<(&String, &String)> = ids
        .iter()
        .enumerate()
        .flat_map(|(i, id1)| ids[i + 1..].iter().map(move |id2| (*id1, *id2)))
        .collect();

    let results: Vec<(PairKey, Result<PairwiseScoreResult, ScoringError>)> = pairs
        .par_iter()
        .map(|&(id1, id2)| {
            debug!("Calculating confusion matrix for sequences {} and {}", id1, id2);
            let result = match (test.seq(id1), test.seq(id2)) {
                (Some(seq1), Some(seq2)) => score_pair(
                    gold,
                    (id1, seq1, test.var_region(id1)),
                    (id2, seq2, test.var_region(id2)),
                ),
                _ => Err(ScoringError::MissingGoldPair(PairKey::new(
                    id1.as_str(),
                    id2.as_str(),
                ))),
            };
            (PairKey::new(id1.as_str(), id2.as_str()), result)
        })
        .collect();

    let mut summary = ScoreSummary::default();
    for (key, result) in results {
        match result {
            Ok(scores) => {
                for (id, cols) in &scores.wrong_cols {
                    merge_counts(summary.wrong_cols.entry(id.clone()).or_default(), cols);
                }
                summary.full += scores.matrix;
                summary.pairwise.insert(key.clone(), scores.matrix);
                summary.sp_scores.insert(key, scores.sp_score);
            }
            Err(e) => {
                warn!("Could not score the pair {}: {}", key, e);
                summary.failures.insert(key, e.to_string());
            }
        }
    }

    summary
}
