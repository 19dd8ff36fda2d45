use alnq_core::models::{ConfusionMatrix, GroundedSeq};

use crate::errors::ScoringError;

///
/// Check that a pairwise confusion matrix accounts for every residue exactly once: the
/// aligned residues of both sequences plus the variable-region residues of both.
///
pub fn check_pairwise_score(
    (id1, seq1, var1): (&str, &GroundedSeq, &[u32]),
    (id2, seq2, var2): (&str, &GroundedSeq, &[u32]),
    matrix: &ConfusionMatrix,
) -> Result<(), ScoringError> {
    let residues =
        (seq1.residue_count() + seq2.residue_count() + var1.len() + var2.len()) as u32;

    if residues != matrix.total() {
        return Err(ScoringError::SanityCheck {
            id1: id1.to_string(),
            id2: id2.to_string(),
            seq1: seq1.clone(),
            seq2: seq2.clone(),
            var1: var1.to_vec(),
            var2: var2.to_vec(),
            matrix: *matrix,
            total: matrix.total(),
            residues,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_check_pairwise_score() {
        let seq1: GroundedSeq = "1-23--".parse().unwrap();
        let seq2: GroundedSeq = "12-34-".parse().unwrap();

        let matrix = ConfusionMatrix::new(2, 2, 3, 2);
        assert!(check_pairwise_score(("1", &seq1, &[4, 5]), ("2", &seq2, &[]), &matrix).is_ok());

        let matrix = ConfusionMatrix::new(2, 2, 2, 1);
        let err = check_pairwise_score(("1", &seq1, &[4, 5]), ("2", &seq2, &[]), &matrix)
            .unwrap_err();
        assert!(matches!(err, ScoringError::SanityCheck { total: 7, residues: 9, .. }));
        assert!(err.to_string().contains("var 1: [4, 5]"));
    }
}
