//! Numbering of corvar lines and plain aligned sequences.
//!
//! A corvar line interleaves core residues (upper-case) with variable residues
//! (lower-case). Digits and whitespace are separators and carry no meaning.

use alnq_core::models::GroundedSeq;

use crate::errors::GroundingError;

///
/// A corvar line converted to positions.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorvarSeq {
    /// upper-case residues numbered in full-sequence order, gaps kept
    pub cores: GroundedSeq,
    /// positions of the lower-case residues
    pub var: Vec<u32>,
    /// upper-cased ungapped full sequence
    pub full: String,
}

///
/// Convert a corvar line into its grounded core sequence, variable region and full sequence.
///
pub fn corvar_to_num(line: &str) -> Result<CorvarSeq, GroundingError> {
    let mut result = CorvarSeq::default();
    let mut count = 1;

    for ch in line
        .chars()
        .filter(|c| !(c.is_ascii_digit() || c.is_whitespace()))
    {
        match ch {
            '-' => result.cores.push(None),
            c if c.is_ascii_uppercase() => {
                result.cores.push(Some(count));
                result.full.push(c);
                count += 1;
            }
            c if c.is_ascii_lowercase() => {
                result.var.push(count);
                result.full.push(c.to_ascii_uppercase());
                count += 1;
            }
            c => {
                return Err(GroundingError::InvalidCorvarChar {
                    ch: c,
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(result)
}

///
/// Number the residues of a plain aligned sequence `1..n`, keeping gaps.
///
pub fn aln_seq_to_num(seq: &str) -> GroundedSeq {
    let mut count = 0;
    seq.chars()
        .map(|c| {
            if c == '-' {
                None
            } else {
                count += 1;
                Some(count)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_corvar_to_num() {
        let corvar = corvar_to_num("ab0CD-E0f g").unwrap();
        assert_eq!(corvar.cores, "3 4 - 5".parse::<GroundedSeq>().unwrap());
        assert_eq!(corvar.var, vec![1, 2, 6, 7]);
        assert_eq!(corvar.full, "ABCDEFG");
    }

    #[rstest]
    fn test_corvar_to_num_rejects_other_characters() {
        let err = corvar_to_num("AB.C").unwrap_err();
        assert!(matches!(err, GroundingError::InvalidCorvarChar { ch: '.', .. }));
    }

    #[rstest]
    #[case("-AB-C", "- 1 2 - 3")]
    #[case("abc", "1 2 3")]
    #[case("--", "- -")]
    fn test_aln_seq_to_num(#[case] seq: &str, #[case] expected: &str) {
        assert_eq!(aln_seq_to_num(seq), expected.parse::<GroundedSeq>().unwrap());
    }
}
