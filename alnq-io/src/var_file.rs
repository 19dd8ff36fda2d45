//! Readers for `.Var` corvar files.
//!
//! A `.Var` file holds one `identifier,corvar` line per structure. Pairwise files have
//! exactly two lines and describe one gold standard pairwise alignment; multiple files hold
//! the corvar line of every structure of a gold standard multiple alignment. In both cases
//! the first line is the target.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use glob::glob;
use log::{debug, info};

use alnq_core::models::{GroundedSeq, PairKey};
use alnq_grounding::{aln_seq_to_num, corvar_to_num};

use crate::error::{ParserError, Result};
use crate::utils::{is_lower_segment, is_upper_segment, read_existing_lines};

///
/// A pairwise gold standard alignment read from a `.Var` file.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseVar {
    pub target: String,
    pub ids: [String; 2],
    /// grounded gold sequences, same length
    pub alns: BTreeMap<String, GroundedSeq>,
    /// ungapped full sequences
    pub full: BTreeMap<String, String>,
}

impl PairwiseVar {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.ids[0].as_str(), self.ids[1].as_str())
    }
}

///
/// A multiple gold standard alignment read from a `.Var` file.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiVar {
    pub target: String,
    /// identifiers in file order
    pub ids: Vec<String>,
    pub cores: BTreeMap<String, GroundedSeq>,
    pub var: BTreeMap<String, Vec<u32>>,
    pub full: BTreeMap<String, String>,
}

///
/// All pairwise gold standard alignments of a directory.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairwiseVarSet {
    pub alns: BTreeMap<PairKey, PairwiseVar>,
    pub ids: BTreeSet<String>,
    pub full: BTreeMap<String, String>,
}

fn split_var_line<'a>(line: &'a str, path: &Path) -> Result<(&'a str, &'a str)> {
    let mut fields = line.split(',');
    match (fields.next(), fields.next()) {
        (Some(id), Some(corvar)) if !id.trim().is_empty() => Ok((id.trim(), corvar)),
        _ => Err(ParserError::MalformedLine {
            path: path.to_path_buf(),
            line: line.to_string(),
        }),
    }
}

fn var_lines(lines: &[String]) -> impl Iterator<Item = &String> {
    lines.iter().filter(|l| !l.trim().is_empty())
}

///
/// Turn two corvar lines into two aligned sequences.
///
/// Variable segments (lower-case) of one sequence are placed against gaps in the other; core
/// segments (upper-case) of both sequences are aligned to each other and must have the same
/// length. `0` characters only separate cores.
///
pub fn corvar_pair_to_aln(corvar1: &str, corvar2: &str) -> Result<(String, String)> {
    let cleaned1 = corvar1.replace('0', "");
    let cleaned2 = corvar2.replace('0', "");
    let segs1: Vec<&str> = cleaned1.split_whitespace().collect();
    let segs2: Vec<&str> = cleaned2.split_whitespace().collect();

    let mut aln1 = String::new();
    let mut aln2 = String::new();
    let (mut i, mut j) = (0, 0);

    while i < segs1.len() || j < segs2.len() {
        let seg1 = segs1.get(i).copied();
        let seg2 = segs2.get(j).copied();

        match (seg1, seg2) {
            (Some(s1), _) if is_lower_segment(s1) => {
                aln1.push_str(&s1.to_ascii_uppercase());
                aln2.push_str(&"-".repeat(s1.len()));
                i += 1;
            }
            (_, Some(s2)) if is_lower_segment(s2) => {
                aln2.push_str(&s2.to_ascii_uppercase());
                aln1.push_str(&"-".repeat(s2.len()));
                j += 1;
            }
            (Some(s1), Some(s2)) if is_upper_segment(s1) && is_upper_segment(s2) => {
                if s1.len() != s2.len() {
                    return Err(ParserError::CoreLengthMismatch {
                        core1: s1.to_string(),
                        core2: s2.to_string(),
                    });
                }
                aln1.push_str(s1);
                aln2.push_str(s2);
                i += 1;
                j += 1;
            }
            _ => return Err(ParserError::WrongCoreCount),
        }
    }

    Ok((aln1, aln2))
}

///
/// Parse the lines of a pairwise `.Var` file.
///
pub fn parse_pairwise_var(lines: &[String], path: &Path) -> Result<PairwiseVar> {
    let mut records = var_lines(lines);
    let (line1, line2) = match (records.next(), records.next()) {
        (Some(l1), Some(l2)) => (l1, l2),
        _ => {
            return Err(ParserError::MalformedLine {
                path: path.to_path_buf(),
                line: lines.join("\n"),
            });
        }
    };

    let (id1, corvar1) = split_var_line(line1, path)?;
    let (id2, corvar2) = split_var_line(line2, path)?;
    if id1 == id2 {
        return Err(ParserError::DuplicateSequence(id1.to_string()));
    }

    let (aln1, aln2) = corvar_pair_to_aln(corvar1, corvar2)?;

    let mut alns = BTreeMap::new();
    let mut full = BTreeMap::new();
    for (id, aln) in [(id1, &aln1), (id2, &aln2)] {
        full.insert(id.to_string(), aln.replace('-', ""));
        alns.insert(id.to_string(), aln_seq_to_num(aln));
    }

    Ok(PairwiseVar {
        target: id1.to_string(),
        ids: [id1.to_string(), id2.to_string()],
        alns,
        full,
    })
}

///
/// Read a pairwise `.Var` file.
///
pub fn read_pairwise_var(path: &Path) -> Result<PairwiseVar> {
    debug!("Parsing var file: {:?}; multi: false", path);
    let lines = read_existing_lines(path)?;
    parse_pairwise_var(&lines, path)
}

///
/// Parse the lines of a multiple `.Var` file.
///
pub fn parse_multi_var(lines: &[String], path: &Path) -> Result<MultiVar> {
    let mut multi = MultiVar::default();

    for line in var_lines(lines) {
        let (id, corvar) = split_var_line(line, path)?;
        if multi.full.contains_key(id) {
            return Err(ParserError::DuplicateSequence(id.to_string()));
        }

        let numbered = corvar_to_num(corvar)?;
        multi.ids.push(id.to_string());
        multi.cores.insert(id.to_string(), numbered.cores);
        multi.var.insert(id.to_string(), numbered.var);
        multi.full.insert(id.to_string(), numbered.full);
    }

    multi.target = multi
        .ids
        .first()
        .cloned()
        .ok_or_else(|| ParserError::EmptyFile(path.to_path_buf()))?;

    Ok(multi)
}

///
/// Read a multiple `.Var` file.
///
pub fn read_multi_var(path: &Path) -> Result<MultiVar> {
    debug!("Parsing var file: {:?}; multi: true", path);
    let lines = read_existing_lines(path)?;
    parse_multi_var(&lines, path)
}

///
/// Read every `*.Var` file of a directory as a pairwise gold standard alignment.
///
pub fn read_gold_dir(dir: &Path) -> Result<PairwiseVarSet> {
    info!("Getting gold standard alignments");
    if !dir.is_dir() {
        return Err(ParserError::NoSuchDirectory(dir.to_path_buf()));
    }

    let pattern = dir.join("*.Var");
    let mut files = glob(&pattern.to_string_lossy())?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ParserError::Io(e.into_error()))?;
    files.sort();
    info!("Got {} var files", files.len());

    let mut set = PairwiseVarSet::default();
    for file in files {
        let var = read_pairwise_var(&file)?;
        set.ids.extend(var.ids.iter().cloned());
        for (id, seq) in &var.full {
            set.full.insert(id.clone(), seq.clone());
        }
        set.alns.insert(var.key(), var);
    }

    info!("Finished parsing .Var files");
    Ok(set)
}
