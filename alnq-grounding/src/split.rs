//! Resolving a core span against the full sequence, splitting it when it is not present
//! verbatim.

use log::debug;

use crate::errors::GroundingError;
use crate::span::find_wildcard;

///
/// A resolved piece of a core span: `len` residues starting at 0-based `offset` of the
/// full sequence.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub offset: usize,
    pub len: usize,
}

impl Segment {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    ///
    /// 1-based full-sequence positions covered by this segment
    ///
    pub fn positions(&self) -> impl Iterator<Item = u32> {
        (self.offset + 1..=self.end()).map(|p| p as u32)
    }
}

///
/// A span (or the unresolved tail of one) that no split could place in the full sequence.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFailure {
    pub span: String,
    pub offset: usize,
    pub remainder: String,
    pub resolved: Vec<Segment>,
}

impl From<SplitFailure> for GroundingError {
    fn from(value: SplitFailure) -> Self {
        GroundingError::UnresolvedSpan {
            span: value.span,
            offset: value.offset,
            remainder: value.remainder,
        }
    }
}

///
/// Locate `span` in `full`, searching no earlier than `cursor`.
///
/// The span is first looked up verbatim. When that fails it is split: the longest left part
/// found in the remaining sequence is accepted, and the right part is resolved the same way
/// against the sequence after the left match. Every resolved piece lies after the previous
/// one, so the returned segments are ordered and non-overlapping.
///
/// # Arguments
/// - span: upper-cased core residues
/// - full: upper-cased full sequence
/// - cursor: 0-based offset in `full` where the search starts
pub fn resolve_span(
    span: &[u8],
    full: &[u8],
    cursor: usize,
) -> Result<Vec<Segment>, SplitFailure> {
    let mut segments = Vec::new();
    let mut pending = span;
    let mut from = cursor.min(full.len());

    while !pending.is_empty() {
        let remainder = &full[from..];

        if let Some(pos) = find_wildcard(remainder, pending) {
            segments.push(Segment {
                offset: from + pos,
                len: pending.len(),
            });
            break;
        }

        debug!(
            "Splitting up a core: {} full seq[{}:]: {}",
            String::from_utf8_lossy(pending),
            from,
            String::from_utf8_lossy(remainder)
        );

        // split points from the longest left part down to a single residue
        let split = (1..pending.len()).find_map(|i| {
            let (left, right) = pending.split_at(pending.len() - i);
            find_wildcard(remainder, left).map(|pos| (left, right, from + pos))
        });

        match split {
            Some((left, right, left_start)) => {
                let left_segment = Segment {
                    offset: left_start,
                    len: left.len(),
                };
                segments.push(left_segment);
                pending = right;
                from = left_segment.end();
            }
            None => {
                return Err(SplitFailure {
                    span: String::from_utf8_lossy(pending).into_owned(),
                    offset: from,
                    remainder: String::from_utf8_lossy(remainder).into_owned(),
                    resolved: segments,
                });
            }
        }
    }

    debug!(
        "Resolved core {} in {} segment(s): {:?}",
        String::from_utf8_lossy(span),
        segments.len(),
        segments
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn seg(offset: usize, len: usize) -> Segment {
        Segment { offset, len }
    }

    #[rstest]
    fn test_verbatim() {
        let segments = resolve_span(b"ABC", b"SABCSD", 0).unwrap();
        assert_eq!(segments, vec![seg(1, 3)]);
        assert_eq!(segments[0].positions().collect::<Vec<u32>>(), vec![2, 3, 4]);
    }

    #[rstest]
    fn test_verbatim_respects_cursor() {
        // the first ABC is behind the cursor
        let segments = resolve_span(b"ABC", b"ABCDABC", 3).unwrap();
        assert_eq!(segments, vec![seg(4, 3)]);
    }

    #[rstest]
    fn test_split_into_three() {
        let segments = resolve_span(b"ASTGHMTG", b"ASMGTMGTTGHKLMKLMWMTG", 0).unwrap();
        assert_eq!(segments, vec![seg(0, 2), seg(8, 3), seg(18, 3)]);
    }

    #[rstest]
    fn test_split_interrupted_core() {
        let full = b"KSWGKWYVNTTNIDGFRLDAVKHIKFSFFPDWLSYVRSQTGKPLFTVYDINKLHNYIMKTNGTMSLFDAPLHNKFYTASK";
        let segments = resolve_span(b"SYVSQTPLFTVNKLHNY", full, 3).unwrap();
        let positions: Vec<u32> = segments.iter().flat_map(|s| s.positions()).collect();
        assert_eq!(
            positions,
            vec![34, 35, 36, 38, 39, 40, 43, 44, 45, 46, 47, 51, 52, 53, 54, 55, 56]
        );
    }

    #[rstest]
    fn test_split_with_ambiguous_residue() {
        // the X in the core matches the second T of the full sequence
        let segments = resolve_span(b"TXGHMTG", b"ASMGTMGTTGHKLMKLMWMTG", 6).unwrap();
        let positions: Vec<u32> = segments.iter().flat_map(|s| s.positions()).collect();
        assert_eq!(positions, vec![8, 9, 10, 11, 19, 20, 21]);
    }

    #[rstest]
    fn test_split_failure() {
        let failure = resolve_span(b"ASYTGHMTG", b"ASMGTMGTYGHKLMKLMWMTG", 0).unwrap_err();
        assert_eq!(failure.span, "HMTG");
        assert_eq!(failure.offset, 21);
        assert_eq!(failure.remainder, "");
        assert_eq!(failure.resolved, vec![seg(0, 2), seg(8, 1), seg(19, 2)]);
    }

    #[rstest]
    fn test_single_residue_not_found() {
        let failure = resolve_span(b"W", b"ABC", 0).unwrap_err();
        assert_eq!(failure.span, "W");
        assert_eq!(failure.remainder, "ABC");
    }
}
