//! Scanning aligned sequences for core spans, and wildcard-aware substring search.

const GAP: u8 = b'-';
const WILDCARD: u8 = b'X';

///
/// A run of aligned residues resolved as one unit by the grounding engine.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSpan {
    /// upper-cased residues of the span
    pub residues: Vec<u8>,
    /// 0-based column of the first residue in the aligned sequence
    pub start: usize,
}

impl CoreSpan {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Column just past the last residue of the span
    pub fn end(&self) -> usize {
        self.start + self.residues.len()
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.residues).unwrap_or_default()
    }
}

///
/// Find the next core span starting at or after column `from`.
///
/// A span starts at the first non-gap character. It runs through upper-case residues and
/// ends either at a gap (not included) or at a lower-case residue other than its first one
/// (included). A lower-case residue may open a span.
///
/// Returns `None` when no residue is left.
///
pub fn next_core_span(aligned: &[u8], from: usize) -> Option<CoreSpan> {
    let start = from + aligned.get(from..)?.iter().position(|&c| c != GAP)?;

    let mut residues = vec![aligned[start].to_ascii_uppercase()];
    for &c in &aligned[start + 1..] {
        if c == GAP {
            break;
        }
        residues.push(c.to_ascii_uppercase());
        if c.is_ascii_lowercase() {
            break;
        }
    }

    Some(CoreSpan { residues, start })
}

#[inline]
fn residues_match(a: u8, b: u8) -> bool {
    a == b || a == WILDCARD || b == WILDCARD
}

///
/// Position of the first occurrence of `needle` in `haystack`, where the ambiguous residue
/// `X` on either side matches any residue.
///
pub fn find_wildcard(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(&a, &b)| residues_match(a, b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("--ASDFSSSDFH-SS-", 0, "ASDFSSSDFH", 2)]
    #[case("--ASDFSSSDFH-SS-", 12, "SS", 13)]
    #[case("GRH--wGhwGH", 3, "WGH", 5)]
    #[case("GRhwGH", 3, "WGH", 3)]
    #[case("abc", 0, "A", 0)]
    fn test_next_core_span(
        #[case] aligned: &str,
        #[case] from: usize,
        #[case] expected: &str,
        #[case] expected_start: usize,
    ) {
        let span = next_core_span(aligned.as_bytes(), from).unwrap();
        assert_eq!(span.as_str(), expected);
        assert_eq!(span.start, expected_start);
    }

    #[rstest]
    fn test_next_core_span_lower_case_closes_span() {
        // upper-case run closed by a lower-case edge residue
        let span = next_core_span(b"ABcDE", 0).unwrap();
        assert_eq!(span.as_str(), "ABC");
        assert_eq!(span.end(), 3);

        let span = next_core_span(b"ABcDE", span.end()).unwrap();
        assert_eq!(span.as_str(), "DE");
    }

    #[rstest]
    #[case("----", 0)]
    #[case("AB--", 2)]
    #[case("AB", 5)]
    fn test_next_core_span_none(#[case] aligned: &str, #[case] from: usize) {
        assert!(next_core_span(aligned.as_bytes(), from).is_none());
    }

    #[rstest]
    fn test_find_wildcard() {
        assert_eq!(find_wildcard(b"SABCSD", b"ABC"), Some(1));
        assert_eq!(find_wildcard(b"SABCSD", b"ABD"), None);
        // ambiguous residue in the full sequence
        assert_eq!(find_wildcard(b"SAXCSD", b"ABC"), Some(1));
        // ambiguous residue in the core
        assert_eq!(find_wildcard(b"SABCSD", b"XBC"), Some(1));
        assert_eq!(find_wildcard(b"AB", b"ABC"), None);
        assert_eq!(find_wildcard(b"AB", b""), Some(0));
    }
}
