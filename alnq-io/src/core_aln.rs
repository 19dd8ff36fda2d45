//! Readers for test alignments in the formats produced by structure aligners.

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use log::info;

use crate::error::{ParserError, Result};
use crate::fasta::{SeqRecords, parse_fasta_lines};
use crate::utils::{is_upper_segment, read_existing_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Fasta,
    /// one `id [chain] sequence` line per structure
    ThreeDm,
    /// like 3DM, `?` marks a gap
    ThreeSsp,
    Fatcat,
    /// 3DM csv export with corvar-like sequences
    Csv,
}

impl FromStr for InputFormat {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fasta" => Ok(InputFormat::Fasta),
            "3dm" => Ok(InputFormat::ThreeDm),
            "3SSP" | "3ssp" => Ok(InputFormat::ThreeSsp),
            "fatcat" => Ok(InputFormat::Fatcat),
            "csv" => Ok(InputFormat::Csv),
            other => Err(ParserError::InvalidInputFormat(other.to_string())),
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Fasta => "fasta",
            InputFormat::ThreeDm => "3dm",
            InputFormat::ThreeSsp => "3SSP",
            InputFormat::Fatcat => "fatcat",
            InputFormat::Csv => "csv",
        };
        write!(f, "{}", name)
    }
}

///
/// Guess the format of an alignment from its first line: a `>` header is FASTA, an
/// upper-case line with more than two fields is 3SSP, anything else 3DM.
///
pub fn detect_input_format(lines: &[String]) -> InputFormat {
    match lines.first() {
        Some(first) if first.starts_with('>') => InputFormat::Fasta,
        Some(first) if is_upper_segment(first) && first.split_whitespace().count() > 2 => {
            InputFormat::ThreeSsp
        }
        _ => InputFormat::ThreeDm,
    }
}

fn malformed(path: &Path, line: &str) -> ParserError {
    ParserError::MalformedLine {
        path: path.to_path_buf(),
        line: line.to_string(),
    }
}

fn keep(ids: Option<&HashSet<String>>, id: &str) -> bool {
    ids.is_none_or(|ids| ids.contains(id))
}

///
/// Parse a 3SSP alignment: `code chain sequence` per line.
///
pub fn parse_3ssp_lines(lines: &[String], path: &Path) -> Result<SeqRecords> {
    let mut records = SeqRecords::default();
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [code, chain, seq, ..] = tokens.as_slice() else {
            return Err(malformed(path, line));
        };
        records.insert(format!("{}{}", code, chain), seq.replace('?', "-"))?;
    }
    Ok(records)
}

///
/// Parse a FATCAT/3DM core alignment.
///
/// A line is either `code chain sequence`, when code and chain join into a 5-character
/// identifier, or `identifier sequence`.
///
pub fn parse_fatcat_lines(
    lines: &[String],
    ids: Option<&HashSet<String>>,
    path: &Path,
) -> Result<SeqRecords> {
    let mut records = SeqRecords::default();
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (id, seq) = match tokens.as_slice() {
            [code, chain, seq, ..] if code.len() + chain.len() == 5 => {
                (format!("{}{}", code, chain), *seq)
            }
            [id, seq, ..] => (id.to_string(), *seq),
            _ => return Err(malformed(path, line)),
        };
        if keep(ids, &id) {
            records.insert(id, seq.to_string())?;
        }
    }
    Ok(records)
}

///
/// Parse a 3DM csv export.
///
/// The first field of every line (the protein id) is dropped and the rest is joined back
/// without quotes, leaving `identifier, segments...`. Upper-case segments are cores and are
/// concatenated into the aligned sequence; lower-case segments are variable regions and are
/// left out. A header line containing `alnsequence` is skipped.
///
pub fn parse_csv_lines(
    lines: &[String],
    ids: Option<&HashSet<String>>,
    path: &Path,
) -> Result<SeqRecords> {
    let start = match lines.first() {
        Some(header) if header.contains("alnsequence") => 1,
        _ => 0,
    };

    let mut records = SeqRecords::default();
    for line in lines[start.min(lines.len())..]
        .iter()
        .filter(|l| !l.trim().is_empty())
    {
        let joined = line
            .split(',')
            .skip(1)
            .map(|field| field.replace('"', ""))
            .collect::<Vec<String>>()
            .join(", ");

        let id = joined
            .split(',')
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| malformed(path, line))?
            .to_string();

        let seq: String = joined
            .split_whitespace()
            .skip(1)
            .filter(|segment| is_upper_segment(segment))
            .collect();

        if keep(ids, &id) {
            records.insert(id, seq)?;
        }
    }
    Ok(records)
}

///
/// Read a test alignment.
///
/// # Arguments
/// - path: path to the alignment
/// - format: input format; detected from the first line when absent
/// - ids: when given, only these identifiers are kept (3SSP files are always read whole)
pub fn read_core_alignment(
    path: &Path,
    format: Option<InputFormat>,
    ids: Option<&HashSet<String>>,
) -> Result<SeqRecords> {
    let lines = read_existing_lines(path)?;
    let format = format.unwrap_or_else(|| detect_input_format(&lines));
    info!("Parsing the input alignment [{}]: {:?}", format, path);

    match format {
        InputFormat::Fasta => parse_fasta_lines(&lines, ids, path),
        InputFormat::ThreeDm | InputFormat::Fatcat => parse_fatcat_lines(&lines, ids, path),
        InputFormat::ThreeSsp => parse_3ssp_lines(&lines, path),
        InputFormat::Csv => parse_csv_lines(&lines, ids, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[rstest]
    #[case("fasta", InputFormat::Fasta)]
    #[case("3dm", InputFormat::ThreeDm)]
    #[case("3SSP", InputFormat::ThreeSsp)]
    #[case("fatcat", InputFormat::Fatcat)]
    #[case("csv", InputFormat::Csv)]
    fn test_input_format_from_str(#[case] name: &str, #[case] expected: InputFormat) {
        assert_eq!(name.parse::<InputFormat>().unwrap(), expected);
    }

    #[rstest]
    fn test_input_format_invalid() {
        assert!(matches!(
            "json".parse::<InputFormat>(),
            Err(ParserError::InvalidInputFormat(_))
        ));
    }

    #[rstest]
    #[case("1ABC A --ABC-D", InputFormat::ThreeSsp)]
    #[case("1ABCA --ABC-D", InputFormat::ThreeDm)]
    #[case("1abc A --abc-d", InputFormat::ThreeDm)]
    #[case(">1ABCA|chain A", InputFormat::Fasta)]
    fn test_detect_input_format(#[case] first: &str, #[case] expected: InputFormat) {
        assert_eq!(detect_input_format(&lines(first)), expected);
    }

    #[rstest]
    fn test_parse_3ssp() {
        let records =
            parse_3ssp_lines(&lines("1ABC A --AB?C\n2DEF B QW??ER\n"), Path::new("a.3ssp"))
                .unwrap();
        assert_eq!(records.order, vec!["1ABCA", "2DEFB"]);
        assert_eq!(records.seqs["1ABCA"], "--AB-C");
        assert_eq!(records.seqs["2DEFB"], "QW--ER");
    }

    #[rstest]
    fn test_parse_3ssp_malformed() {
        let err = parse_3ssp_lines(&lines("1ABC --AB"), Path::new("a.3ssp")).unwrap_err();
        assert!(matches!(err, ParserError::MalformedLine { .. }));
    }

    #[rstest]
    fn test_parse_fatcat() {
        let ids: HashSet<String> = ["1ABCA", "template"].iter().map(|s| s.to_string()).collect();
        let records = parse_fatcat_lines(
            &lines("1ABC A --ABC\ntemplate QW-ER\n2DEF B ABCDE\n"),
            Some(&ids),
            Path::new("a.fatcat"),
        )
        .unwrap();
        assert_eq!(records.order, vec!["1ABCA", "template"]);
        assert_eq!(records.seqs["template"], "QW-ER");
    }

    #[rstest]
    fn test_parse_csv() {
        let text = "proteinid,id,alnsequence\n\
                    \"7\",\"1ABCA\",\"ABC dfg FGH 0 IJK\"\n\
                    \"8\",\"1DEFA\",\"qq AB-C FGH 0 IJK\"\n";
        let records = parse_csv_lines(&lines(text), None, Path::new("a.csv")).unwrap();
        assert_eq!(records.seqs["1ABCA"], "ABCFGHIJK");
        assert_eq!(records.seqs["1DEFA"], "AB-CFGHIJK");
    }

    #[rstest]
    fn test_read_core_alignment_detects_format() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("aln.txt");
        std::fs::write(&path, "1ABC A --ABC\n2DEF B ABCDE\n").unwrap();

        let records = read_core_alignment(&path, None, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.seqs["1ABCA"], "--ABC");
    }
}
