use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use rstest::*;

use alnq::core::{ConfusionMatrix, GroundedAlignment, PairKey};
use alnq::grounding::ground_alignment;
use alnq::io::{
    InputFormat, companion_var_path, read_core_alignment, read_fasta, read_gold_dir,
    read_gold_json, read_multi_var,
};
use alnq::scoring::{
    ExtendedGold, ExtendedMode, ExtendedReport, GoldLookup, MultiGold, PairwiseGold,
    ScoreReport, ScoringContext, calc_scores, calc_scores_extended, compare_alignments,
    text_report,
};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tests/data")
}

fn ground_test_aln<G: GoldLookup>(
    gold: &G,
    full: &BTreeMap<String, String>,
    path: &Path,
) -> GroundedAlignment {
    let ids: HashSet<String> = gold.ids().into_iter().collect();
    let records = read_core_alignment(path, Some(InputFormat::Fasta), Some(&ids)).unwrap();
    ground_alignment(&records.seqs, full, Some(&ids), None).unwrap()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_score_against_pairwise_gold(path_to_data: PathBuf) {
        let gold = PairwiseGold::from(read_gold_dir(&path_to_data.join("gold")).unwrap());
        assert_eq!(gold.alns.len(), 3);

        let test = ground_test_aln(&gold, &gold.full, &path_to_data.join("test_aln.fasta"));
        assert_eq!(test.var_region("SEQA"), &[1]);
        assert_eq!(test.var_region("SEQB"), &[6]);
        assert_eq!(test.var_region("SEQC"), &[9]);

        let summary = calc_scores(&gold, &test);
        assert!(summary.failures.is_empty());
        for matrix in summary.pairwise.values() {
            assert_eq!(*matrix, ConfusionMatrix::new(16, 0, 2, 0));
        }
        assert_eq!(summary.full, ConfusionMatrix::new(48, 0, 6, 0));

        // variable residues are not part of the SP score
        let average = summary.average_sp_score().unwrap();
        assert!((average - 16.0 / 18.0).abs() < 1e-12);

        let text = text_report(&ScoreReport::from(&summary));
        assert!(text.starts_with("#### RESULTS ####\nTP: 48 FP: 0 TN: 6 FN: 0\n"));
        assert!(text.contains("# SEQA SEQB\n"));
    }

    #[rstest]
    fn test_score_shifted_alignment(path_to_data: PathBuf) {
        let gold = PairwiseGold::from(read_gold_dir(&path_to_data.join("gold")).unwrap());
        let test = ground_test_aln(&gold, &gold.full, &path_to_data.join("shifted_aln.fasta"));

        let summary = calc_scores(&gold, &test);
        let ab = PairKey::new("SEQA", "SEQB");
        assert_eq!(summary.pairwise[&ab], ConfusionMatrix::new(0, 14, 2, 2));
        assert_eq!(summary.sp_scores[&ab], Some(-14.0 / 18.0));
        assert_eq!(
            summary.pairwise[&PairKey::new("SEQA", "SEQC")],
            ConfusionMatrix::new(16, 0, 2, 0)
        );
        assert_eq!(summary.wrong_cols["SEQB"].len(), 9);
    }

    #[rstest]
    fn test_score_against_multi_gold(path_to_data: PathBuf) {
        let multi = read_multi_var(&path_to_data.join("final_core.txt.Var")).unwrap();
        let gold = MultiGold::from(multi);
        assert_eq!(gold.target, "SEQA");

        let test = ground_test_aln(&gold, &gold.full, &path_to_data.join("test_aln.fasta"));
        let summary = calc_scores(&gold, &test);

        assert_eq!(summary.full, ConfusionMatrix::new(48, 0, 6, 0));
        assert_eq!(summary.sp_scores[&PairKey::new("SEQB", "SEQC")], Some(16.0 / 18.0));
    }

    #[rstest]
    #[case(ExtendedMode::Strict)]
    #[case(ExtendedMode::Lenient)]
    fn test_score_against_extended_gold(path_to_data: PathBuf, #[case] mode: ExtendedMode) {
        let gold_path = path_to_data.join("final_core.json");
        let json = read_gold_json(&gold_path).unwrap();
        let full = read_multi_var(&companion_var_path(&gold_path)).unwrap().full;

        let ctx = ScoringContext::new(mode).with_modifiers(&json.score_modifiers);
        let gold = ExtendedGold::from_json(json, full, &ctx).unwrap();

        let ids: HashSet<String> = gold.ids().into_iter().collect();
        let records = read_core_alignment(&path_to_data.join("test_aln.fasta"), None, Some(&ids))
            .unwrap();
        let test = ground_alignment(&records.seqs, &gold.full, None, None).unwrap();

        let result = calc_scores_extended(&gold, &test, &ctx).unwrap();
        // residue 5 of SEQC is one of two equally good placements
        assert_eq!(result.total_score, 15.5);
        assert_eq!(result.max_score, 15.5);
        assert_eq!(result.overall_score, Some(1.0));

        // the unaligned variable residues only show up in strict mode
        let scored_b = result.per_residue_scores["SEQB"].len();
        match mode {
            ExtendedMode::Strict => assert_eq!(scored_b, 9),
            ExtendedMode::Lenient => assert_eq!(scored_b, 8),
        }

        let report = ExtendedReport::new(&result, &gold.target, 9).unwrap();
        assert_eq!(report.per_residue_scores["SEQA"].len(), 9);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["per_residue_scores"]["SEQC"]["5"][1], 1.0);
    }

    #[rstest]
    fn test_compare_alignments(path_to_data: PathBuf) {
        let full = read_fasta(&path_to_data.join("full.fasta"), None).unwrap().into_map();
        let aln1 = read_fasta(&path_to_data.join("test_aln.fasta"), None).unwrap();
        let aln2 = read_fasta(&path_to_data.join("shifted_aln.fasta"), None).unwrap();

        let grounded1 = ground_alignment(&aln1.seqs, &full, None, None).unwrap();
        let grounded2 = ground_alignment(&aln2.seqs, &full, None, None).unwrap();

        let result = compare_alignments(&grounded1, &grounded2);
        assert!(!result.diff_cols1["SEQA"].is_empty());
        assert!(compare_alignments(&grounded1, &grounded1)
            .diff_cols1
            .values()
            .all(|cols| cols.is_empty()));
    }
}
