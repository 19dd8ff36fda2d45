//! Turning scores into reports: plain text for people, serializable structs for JSON.

use std::collections::BTreeMap;
use std::fmt::Display;

use log::{error, info};
use serde::Serialize;

use alnq_core::models::{ConfusionMatrix, PairKey};

use crate::errors::ScoringError;
use crate::extended::{ExtendedScoreResult, ResidueScore};
use crate::pairwise::{ScoreSummary, WrongCols};
use crate::stats::{Stats, calc_stats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub matrix: ConfusionMatrix,
    pub stats: Stats,
    pub sp_score: Option<f64>,
}

///
/// Serializable report of a simple scoring run.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub full: ConfusionMatrix,
    pub full_stats: Stats,
    /// mean of the defined pairwise SP scores
    pub sp_score: Option<f64>,
    pub pairwise: BTreeMap<PairKey, PairReport>,
    pub wrong_cols: BTreeMap<String, WrongCols>,
    pub failures: BTreeMap<PairKey, String>,
}

impl From<&ScoreSummary> for ScoreReport {
    fn from(summary: &ScoreSummary) -> Self {
        let pairwise = summary
            .pairwise
            .iter()
            .map(|(key, matrix)| {
                let report = PairReport {
                    matrix: *matrix,
                    stats: calc_stats(matrix),
                    sp_score: summary.sp_scores.get(key).copied().flatten(),
                };
                (key.clone(), report)
            })
            .collect();

        ScoreReport {
            full: summary.full,
            full_stats: calc_stats(&summary.full),
            sp_score: summary.average_sp_score(),
            pairwise,
            wrong_cols: summary.wrong_cols.clone(),
            failures: summary.failures.clone(),
        }
    }
}

fn fmt_opt<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn write_stats(out: &mut String, matrix: &ConfusionMatrix, stats: &Stats) {
    out.push_str(&format!("{}\n", matrix));
    out.push_str(&format!("sensitivity: {}\n", fmt_opt(stats.sensitivity)));
    out.push_str(&format!("specificity: {}\n", fmt_opt(stats.specificity)));
    out.push_str(&format!("ppv: {}\n", fmt_opt(stats.ppv)));
    out.push_str(&format!("npv: {}\n", fmt_opt(stats.npv)));
    out.push_str(&format!("mcc: {}\n", fmt_opt(stats.mcc)));
    out.push('\n');
}

///
/// Plain text report of a simple scoring run: the full matrix and its stats, the average SP
/// score, then one block per pair.
///
pub fn text_report(report: &ScoreReport) -> String {
    info!("Processing the results");

    let mut out = String::from("#### RESULTS ####\n");
    write_stats(&mut out, &report.full, &report.full_stats);
    out.push_str(&format!("SP score: {}\n", fmt_opt(report.sp_score)));

    for (key, pair) in &report.pairwise {
        out.push_str(&format!("# {}\n", key));
        write_stats(&mut out, &pair.matrix, &pair.stats);
        out.push_str(&format!("SP score: {}\n", fmt_opt(pair.sp_score)));
    }

    for (key, reason) in &report.failures {
        out.push_str(&format!("# {} (not scored)\n", key));
        out.push_str(&format!("{}\n", reason));
    }
    out
}

///
/// Serializable report of an extended scoring run.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedReport {
    pub target: String,
    pub overall_score: Option<f64>,
    pub total_score: f64,
    pub max_score: f64,
    /// per residue weights divided by the residue's max score
    pub per_residue_scores: BTreeMap<String, BTreeMap<u32, ResidueScore>>,
    pub failures: BTreeMap<String, String>,
}

impl ExtendedReport {
    pub fn new(
        result: &ExtendedScoreResult,
        target: &str,
        target_len: usize,
    ) -> Result<Self, ScoringError> {
        Ok(ExtendedReport {
            target: target.to_string(),
            overall_score: result.overall_score,
            total_score: result.total_score,
            max_score: result.max_score,
            per_residue_scores: normalize_per_residue(
                &result.per_residue_scores,
                &result.max_scores,
                target,
                target_len,
            )?,
            failures: result.failures.clone(),
        })
    }
}

pub fn extended_text_report(report: &ExtendedReport) -> String {
    let mut out = String::from("#### RESULTS ####\n");
    out.push_str(&format!("Target: {}\n", report.target));
    out.push_str(&format!("Overall score: {}\n", fmt_opt(report.overall_score)));
    out.push_str(&format!("Total: {} Max: {}\n", report.total_score, report.max_score));

    for (id, residues) in &report.per_residue_scores {
        if *id == report.target {
            continue;
        }
        let accepted = residues.values().filter(|s| s.accepted).count();
        out.push_str(&format!("# {}\n", id));
        out.push_str(&format!("accepted: {} of {}\n", accepted, residues.len()));
    }
    for (id, reason) in &report.failures {
        out.push_str(&format!("# {} (not scored)\n", id));
        out.push_str(&format!("{}\n", reason));
    }
    out
}

///
/// Divide every residue weight by that residue's max attainable weight.
///
/// A residue with no max keeps `1.0` when accepted and gets `-1.0` otherwise. The target is
/// added with `(true, 1.0)` on each of its positions.
///
/// # Arguments
/// - per_residue: per identifier, per residue scores
/// - max_scores: per identifier, per residue max attainable weight
/// - target: target identifier
/// - target_len: length of the full target sequence
pub fn normalize_per_residue(
    per_residue: &BTreeMap<String, BTreeMap<u32, ResidueScore>>,
    max_scores: &BTreeMap<String, BTreeMap<u32, f64>>,
    target: &str,
    target_len: usize,
) -> Result<BTreeMap<String, BTreeMap<u32, ResidueScore>>, ScoringError> {
    let mut normalized = BTreeMap::new();

    for (id, residues) in per_residue {
        let mut scores = BTreeMap::new();
        for (residue, score) in residues {
            let max = max_scores
                .get(id)
                .and_then(|maxes| maxes.get(residue))
                .copied()
                .unwrap_or(0.0);

            if max < score.weight {
                let err = ScoringError::AboveMax {
                    id: id.clone(),
                    position: *residue,
                    score: score.weight,
                    max,
                };
                error!("{}", err);
                return Err(err);
            }

            let weight = match (score.accepted, max != 0.0) {
                (true, true) => score.weight / max,
                (true, false) => 1.0,
                (false, _) => -1.0,
            };
            scores.insert(*residue, ResidueScore::new(score.accepted, weight));
        }
        normalized.insert(id.clone(), scores);
    }

    normalized.entry(target.to_string()).or_insert_with(|| {
        (1..=target_len as u32)
            .map(|position| (position, ResidueScore::new(true, 1.0)))
            .collect()
    });

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn summary() -> ScoreSummary {
        let key = PairKey::new("1", "2");
        ScoreSummary {
            pairwise: BTreeMap::from([(key.clone(), ConfusionMatrix::new(2, 2, 2, 1))]),
            full: ConfusionMatrix::new(2, 2, 2, 1),
            sp_scores: BTreeMap::from([(key, Some(0.5))]),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_text_report(summary: ScoreSummary) {
        let text = text_report(&ScoreReport::from(&summary));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "#### RESULTS ####");
        assert_eq!(lines[1], "TP: 2 FP: 2 TN: 2 FN: 1");
        assert_eq!(lines[3], "specificity: 0.5");
        assert!(text.contains("SP score: 0.5\n# 1 2\n"));
        assert!(text.ends_with("SP score: 0.5\n"));
    }

    #[rstest]
    fn test_text_report_undefined_values() {
        let summary = ScoreSummary::default();
        let text = text_report(&ScoreReport::from(&summary));
        assert!(text.contains("sensitivity: None\n"));
        assert!(text.contains("SP score: None\n"));
    }

    #[rstest]
    fn test_text_report_failures(mut summary: ScoreSummary) {
        summary
            .failures
            .insert(PairKey::new("1", "3"), "Sequences 1 and 3 differ in length".to_string());
        let text = text_report(&ScoreReport::from(&summary));
        assert!(text.ends_with("# 1 3 (not scored)\nSequences 1 and 3 differ in length\n"));
    }

    #[rstest]
    fn test_score_report_json(summary: ScoreSummary) {
        let json = serde_json::to_value(ScoreReport::from(&summary)).unwrap();
        assert_eq!(json["full"]["TP"], 2);
        assert_eq!(json["pairwise"]["1 2"]["sp_score"], 0.5);
        assert!(json["full_stats"]["mcc"].is_number());
    }

    #[rstest]
    fn test_normalize_per_residue() {
        let per_residue = BTreeMap::from([(
            "S".to_string(),
            BTreeMap::from([
                (1, ResidueScore::new(true, 0.25)),
                (2, ResidueScore::new(true, 0.0)),
                (3, ResidueScore::new(false, -0.5)),
            ]),
        )]);
        let max_scores = BTreeMap::from([(
            "S".to_string(),
            BTreeMap::from([(1, 0.5), (2, 0.0), (3, 1.0)]),
        )]);

        let normalized = normalize_per_residue(&per_residue, &max_scores, "T", 2).unwrap();
        assert_eq!(
            normalized["S"],
            BTreeMap::from([
                (1, ResidueScore::new(true, 0.5)),
                (2, ResidueScore::new(true, 1.0)),
                (3, ResidueScore::new(false, -1.0)),
            ])
        );
        assert_eq!(
            normalized["T"],
            BTreeMap::from([
                (1, ResidueScore::new(true, 1.0)),
                (2, ResidueScore::new(true, 1.0)),
            ])
        );
    }

    #[rstest]
    fn test_normalize_above_max() {
        let per_residue = BTreeMap::from([(
            "S".to_string(),
            BTreeMap::from([(1, ResidueScore::new(true, 0.75))]),
        )]);
        let max_scores = BTreeMap::from([("S".to_string(), BTreeMap::from([(1, 0.5)]))]);
        assert!(matches!(
            normalize_per_residue(&per_residue, &max_scores, "T", 1),
            Err(ScoringError::AboveMax { position: 1, .. })
        ));
    }

    #[rstest]
    fn test_extended_text_report() {
        let result = ExtendedScoreResult {
            overall_score: Some(0.5),
            total_score: 1.0,
            max_score: 2.0,
            per_residue_scores: BTreeMap::from([(
                "S".to_string(),
                BTreeMap::from([
                    (1, ResidueScore::new(true, 1.0)),
                    (2, ResidueScore::new(false, 0.0)),
                ]),
            )]),
            max_scores: BTreeMap::from([(
                "S".to_string(),
                BTreeMap::from([(1, 1.0), (2, 1.0)]),
            )]),
            failures: BTreeMap::new(),
        };
        let report = ExtendedReport::new(&result, "T", 3).unwrap();
        assert_eq!(report.per_residue_scores["T"].len(), 3);

        let text = extended_text_report(&report);
        assert!(text.contains("Overall score: 0.5\n"));
        assert!(text.contains("# S\naccepted: 1 of 2\n"));
        assert!(!text.contains("# T\n"));
    }
}
