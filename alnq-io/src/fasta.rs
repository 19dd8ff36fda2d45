use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::info;

use crate::error::{ParserError, Result};
use crate::utils::read_existing_lines;

///
/// Sequences read from an alignment or FASTA file, keyed by identifier, plus the order in
/// which the identifiers appeared.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeqRecords {
    pub seqs: BTreeMap<String, String>,
    pub order: Vec<String>,
}

impl SeqRecords {
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.seqs
    }

    ///
    /// Add a sequence, failing when the identifier is already present.
    ///
    pub fn insert(&mut self, id: String, seq: String) -> Result<()> {
        if self.seqs.contains_key(&id) {
            return Err(ParserError::DuplicateSequence(id));
        }
        self.order.push(id.clone());
        self.seqs.insert(id, seq);
        Ok(())
    }
}

///
/// Identifier of a FASTA header line: text after `>` up to the first `|`.
///
fn header_id(line: &str) -> &str {
    let header = line.trim_start_matches('>');
    header.split('|').next().unwrap_or(header).trim()
}

///
/// Parse FASTA content.
///
/// Sequence lines are upper-cased and stripped of a trailing `*`. A repeated identifier is
/// an error even when it is filtered out.
///
/// # Arguments
/// - lines: file content
/// - ids: when given, only these identifiers are kept
/// - path: used for error messages
pub fn parse_fasta_lines(
    lines: &[String],
    ids: Option<&HashSet<String>>,
    path: &Path,
) -> Result<SeqRecords> {
    let mut records = SeqRecords::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current: Option<String> = None;

    for line in lines {
        if line.starts_with('>') {
            let id = header_id(line).to_string();
            if !seen.insert(id.clone()) {
                return Err(ParserError::DuplicateSequence(id));
            }
            if ids.is_none_or(|ids| ids.contains(&id)) {
                records.seqs.insert(id.clone(), String::new());
                records.order.push(id.clone());
            }
            current = Some(id);
            continue;
        }

        let seq_line = line.trim();
        if seq_line.is_empty() {
            continue;
        }

        match &current {
            Some(id) => {
                if let Some(seq) = records.seqs.get_mut(id) {
                    seq.push_str(&seq_line.to_ascii_uppercase());
                    while seq.ends_with('*') {
                        seq.pop();
                    }
                }
            }
            None => return Err(ParserError::MissingHeader(path.to_path_buf())),
        }
    }

    Ok(records)
}

///
/// Read a (possibly gzip'd) FASTA file.
///
/// # Arguments
/// - path: path to the file
/// - ids: when given, only these identifiers are kept
pub fn read_fasta(path: &Path, ids: Option<&HashSet<String>>) -> Result<SeqRecords> {
    info!("Parsing FASTA: {:?}", path);
    let lines = read_existing_lines(path)?;
    parse_fasta_lines(&lines, ids, path)
}
