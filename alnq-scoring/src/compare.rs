//! Comparison of two alignments of the same sequences.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use alnq_core::models::{GroundedAlignment, GroundedSeq};
use alnq_core::utils::merge_counts;

use crate::pairwise::WrongCols;

///
/// Columns of each alignment where a residue is aligned differently than in the other one,
/// per identifier.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub diff_cols1: BTreeMap<String, WrongCols>,
    pub diff_cols2: BTreeMap<String, WrongCols>,
}

///
/// Compare how two sequences are aligned to each other in two alignments.
///
/// For every residue of the first sequence in the first alignment whose partner also occurs
/// in the second alignment, the partner there is looked up; if it differs, the column is
/// flagged in both alignments under the first identifier. A gap partner always counts as
/// occurring.
///
/// # Arguments
/// - (id1, seq1_aln1, seq1_aln2): first identifier and its grounded sequence in both alignments
/// - (id2, seq2_aln1, seq2_aln2): same for the second identifier
pub fn compare_pairwise(
    (id1, seq1_aln1, seq1_aln2): (&str, &GroundedSeq, &GroundedSeq),
    (id2, seq2_aln1, seq2_aln2): (&str, &GroundedSeq, &GroundedSeq),
) -> ComparisonResult {
    let mut diff1 = WrongCols::new();
    let mut diff2 = WrongCols::new();

    for (i, (res_i1, res_j1)) in seq1_aln1.iter().zip(seq2_aln1.iter()).enumerate() {
        let Some(res_i1) = *res_i1 else {
            continue;
        };
        let Some(aln2_index) = seq1_aln2.column_of(res_i1) else {
            continue;
        };
        if res_j1.is_some_and(|r| !seq2_aln2.contains(r)) {
            continue;
        }

        let res_j2 = seq2_aln2.positions().get(aln2_index).copied().flatten();
        if res_j2 != *res_j1 {
            diff1.insert(i, 1);
            diff2.insert(aln2_index, 1);
        }
    }

    ComparisonResult {
        diff_cols1: BTreeMap::from([(id1.to_string(), diff1), (id2.to_string(), WrongCols::new())]),
        diff_cols2: BTreeMap::from([(id1.to_string(), diff2), (id2.to_string(), WrongCols::new())]),
    }
}

///
/// Compare two grounded alignments over every ordered pair of identifiers they share.
/// Flags are summed over the pairs an identifier takes part in.
///
pub fn compare_alignments(aln1: &GroundedAlignment, aln2: &GroundedAlignment) -> ComparisonResult {
    info!("Comparing alignments");

    let mut result = ComparisonResult {
        diff_cols1: aln1.ids().map(|id| (id.clone(), WrongCols::new())).collect(),
        diff_cols2: aln2.ids().map(|id| (id.clone(), WrongCols::new())).collect(),
    };

    for id1 in aln1.ids() {
        for id2 in aln1.ids() {
            if id1 == id2 {
                continue;
            }
            let (Some(s1a1), Some(s2a1), Some(s1a2), Some(s2a2)) =
                (aln1.seq(id1), aln1.seq(id2), aln2.seq(id1), aln2.seq(id2))
            else {
                continue;
            };

            let pair = compare_pairwise((id1, s1a1, s1a2), (id2, s2a1, s2a2));
            for (id, cols) in &pair.diff_cols1 {
                merge_counts(result.diff_cols1.entry(id.clone()).or_default(), cols);
            }
            for (id, cols) in &pair.diff_cols2 {
                merge_counts(result.diff_cols2.entry(id.clone()).or_default(), cols);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn gs(text: &str) -> GroundedSeq {
        text.parse().unwrap()
    }

    #[fixture]
    fn alignments() -> (GroundedAlignment, GroundedAlignment) {
        let mut aln1 = GroundedAlignment::new();
        aln1.insert("1".to_string(), gs("-1234--"), vec![]);
        aln1.insert("2".to_string(), gs("-1234--"), vec![]);

        let mut aln2 = GroundedAlignment::new();
        aln2.insert("1".to_string(), gs("-123-4-"), vec![]);
        aln2.insert("2".to_string(), gs("1-23-4-"), vec![]);
        (aln1, aln2)
    }

    #[rstest]
    fn test_compare_pairwise(alignments: (GroundedAlignment, GroundedAlignment)) {
        let (aln1, aln2) = alignments;
        let result = compare_pairwise(
            ("1", aln1.seq("1").unwrap(), aln2.seq("1").unwrap()),
            ("2", aln1.seq("2").unwrap(), aln2.seq("2").unwrap()),
        );

        // residue 1 of "1" faces 1 of "2" in the first alignment, a gap in the second
        assert_eq!(
            result.diff_cols1,
            BTreeMap::from([
                ("1".to_string(), BTreeMap::from([(1, 1)])),
                ("2".to_string(), BTreeMap::new()),
            ])
        );
        assert_eq!(result.diff_cols2, result.diff_cols1);
    }

    #[rstest]
    fn test_compare_alignments(alignments: (GroundedAlignment, GroundedAlignment)) {
        let (aln1, aln2) = alignments;
        let result = compare_alignments(&aln1, &aln2);

        assert_eq!(result.diff_cols1["1"], BTreeMap::from([(1, 1)]));
        assert_eq!(result.diff_cols1["2"], BTreeMap::from([(1, 1)]));
        assert_eq!(result.diff_cols2["1"], BTreeMap::from([(1, 1)]));
        assert_eq!(result.diff_cols2["2"], BTreeMap::from([(0, 1)]));
    }

    #[rstest]
    fn test_compare_identical(alignments: (GroundedAlignment, GroundedAlignment)) {
        let (aln1, _) = alignments;
        let result = compare_alignments(&aln1, &aln1);
        assert!(result.diff_cols1.values().all(|cols| cols.is_empty()));
        assert!(result.diff_cols2.values().all(|cols| cols.is_empty()));
    }

    #[rstest]
    fn test_compare_skips_missing_partner() {
        // residue 2 of "2" is absent from the second alignment
        let result = compare_pairwise(
            ("1", &gs("12"), &gs("1-2")),
            ("2", &gs("12"), &gs("1--")),
        );
        assert!(result.diff_cols1["1"].is_empty());
    }
}
