use std::path::Path;

use crate::error::{ParserError, Result};
use crate::utils::read_existing_lines;

///
/// Core boundaries from the first line of a `final_core` file.
///
/// The line starts with a 5-character structure identifier, or with a 4-character PDB code
/// followed by a 1-character chain. The remaining tokens are the cores; the boundaries are
/// their cumulative start columns.
///
pub fn parse_final_core_line(line: &str) -> Result<Vec<usize>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let cores = match tokens.as_slice() {
        [first, rest @ ..] if first.len() == 5 => rest,
        [first, chain, rest @ ..] if first.len() == 4 && chain.len() == 1 => rest,
        _ => return Err(ParserError::FinalCoreFormat),
    };

    let mut indexes = Vec::with_capacity(cores.len());
    let mut start = 0;
    for core in cores {
        indexes.push(start);
        start += core.len();
    }
    Ok(indexes)
}

///
/// Read core boundaries from a `final_core` file.
///
pub fn read_final_core(path: &Path) -> Result<Vec<usize>> {
    let lines = read_existing_lines(path)?;
    let first = lines
        .first()
        .ok_or_else(|| ParserError::EmptyFile(path.to_path_buf()))?;
    parse_final_core_line(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("1ABCA ABCD ABC ABC-- DFGJH", vec![0, 4, 7, 12])]
    #[case("1ABC A ABCD ABC ABC-- DFGJH", vec![0, 4, 7, 12])]
    #[case("1ABCA", vec![])]
    fn test_parse_final_core_line(#[case] line: &str, #[case] expected: Vec<usize>) {
        assert_eq!(parse_final_core_line(line).unwrap(), expected);
    }

    #[rstest]
    #[case("1ABCAB ABCD")]
    #[case("1AB ABCD")]
    #[case("")]
    fn test_parse_final_core_line_bad_format(#[case] line: &str) {
        assert!(matches!(
            parse_final_core_line(line),
            Err(ParserError::FinalCoreFormat)
        ));
    }

    #[rstest]
    fn test_read_final_core() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("final_core.txt");
        std::fs::write(&path, "1ABCA ABCDE --FGHI --JKL\n1DEFA AAAAA AAAAAA AAAAA\n").unwrap();
        assert_eq!(read_final_core(&path).unwrap(), vec![0, 5, 11]);
    }
}
