use std::path::Path;

use alnq_core::utils::read_lines;

use crate::error::{ParserError, Result};

///
/// Read all lines of a file, failing with [ParserError::FileNotFound] when it does not exist.
///
pub fn read_existing_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ParserError::FileNotFound(path.to_path_buf()));
    }
    Ok(read_lines(path)?)
}

///
/// Python-style `islower`: at least one cased character and no upper-case ones.
///
pub fn is_lower_segment(segment: &str) -> bool {
    segment.chars().any(|c| c.is_ascii_lowercase())
        && !segment.chars().any(|c| c.is_ascii_uppercase())
}

///
/// Python-style `isupper`: at least one cased character and no lower-case ones.
///
pub fn is_upper_segment(segment: &str) -> bool {
    segment.chars().any(|c| c.is_ascii_uppercase())
        && !segment.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    #[case("abc", true, false)]
    #[case("ABC", false, true)]
    #[case("A-C", false, true)]
    #[case("aBc", false, false)]
    #[case("---", false, false)]
    fn test_segment_case(#[case] segment: &str, #[case] lower: bool, #[case] upper: bool) {
        assert_eq!(is_lower_segment(segment), lower);
        assert_eq!(is_upper_segment(segment), upper);
    }

    #[rstest]
    fn test_read_existing_lines_missing_file() {
        let err = read_existing_lines(Path::new("/definitely/not/here.fasta")).unwrap_err();
        assert!(matches!(err, ParserError::FileNotFound(_)));
    }
}
