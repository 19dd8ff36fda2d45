use std::collections::{BTreeMap, HashSet};

use log::{debug, error, info};

use alnq_core::models::{GroundedAlignment, GroundedSeq};

use crate::errors::GroundingError;
use crate::span::{find_wildcard, next_core_span};
use crate::split::{Segment, resolve_span};
use crate::variable::variable_region;

const GAP: u8 = b'-';

///
/// Output of grounding one aligned sequence.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingResult {
    pub grounded: GroundedSeq,
    /// 0-based columns where a positionally discontinuous core starts; always begins with 0
    pub core_indexes: Vec<usize>,
}

fn check_alphabet(seq: &str) -> Result<(), GroundingError> {
    match seq.chars().find(|&c| !(c.is_ascii_alphabetic() || c == '-')) {
        Some(ch) => Err(GroundingError::InvalidCharacter {
            ch,
            seq: seq.to_string(),
        }),
        None => Ok(()),
    }
}

///
/// Ground an aligned core sequence against the full sequence it was derived from.
///
/// Core spans are resolved left to right; each span is searched for after the end of the
/// previously resolved one. Gaps stay gaps, including leading and trailing ones.
///
/// # Arguments
/// - aligned: aligned sequence, `-` for gaps, lower-case for ambiguous edge residues
/// - full: the full ungapped sequence
pub fn ground_core_seq(aligned: &str, full: &str) -> Result<GroundingResult, GroundingError> {
    check_alphabet(aligned)?;

    let aligned_bytes = aligned.as_bytes();
    let full_bytes = full.to_ascii_uppercase().into_bytes();

    if aligned_bytes.iter().all(|&c| c == GAP) {
        return Ok(GroundingResult {
            grounded: GroundedSeq::gaps(aligned_bytes.len()),
            core_indexes: vec![0],
        });
    }

    let mut grounded = GroundedSeq::new(Vec::with_capacity(aligned_bytes.len()));
    let mut column = 0;
    let mut cursor = 0;
    let mut all_segments: Vec<Segment> = Vec::new();

    while let Some(span) = next_core_span(aligned_bytes, column) {
        grounded.extend_gaps(span.start - column);
        column = span.end();

        let segments = match resolve_span(&span.residues, &full_bytes, cursor) {
            Ok(segments) => segments,
            Err(failure) => {
                error!("Found these cores: {:?}", all_segments);
                return Err(failure.into());
            }
        };

        for segment in &segments {
            for position in segment.positions() {
                grounded.push(Some(position));
            }
        }
        if let Some(last) = segments.last() {
            cursor = last.end();
        }
        all_segments.extend(segments);
    }

    // c-terminal gaps
    grounded.extend_gaps(aligned_bytes.len() - grounded.len());

    let core_indexes = core_indexes_from_grounded(&grounded);
    Ok(GroundingResult {
        grounded,
        core_indexes,
    })
}

///
/// Ground an aligned sequence whose core boundaries are already known, e.g. from a
/// `final_core` file.
///
/// Each slice between two boundaries is degapped and located in the full sequence after
/// the previous slice. Columns before the first boundary must be gaps.
///
/// # Arguments
/// - aligned: aligned sequence
/// - full: the full ungapped sequence
/// - core_indexes: 0-based start columns of the cores, ascending
pub fn ground_known_cores(
    aligned: &str,
    full: &str,
    core_indexes: &[usize],
) -> Result<GroundedSeq, GroundingError> {
    check_alphabet(aligned)?;

    let aligned_bytes = aligned.to_ascii_uppercase().into_bytes();
    let full_bytes = full.to_ascii_uppercase().into_bytes();
    let len = aligned_bytes.len();

    let mut grounded = GroundedSeq::new(Vec::with_capacity(len));
    let first = core_indexes.first().copied().unwrap_or(len).min(len);
    let leading = aligned_bytes[..first].iter().filter(|&&c| c != GAP).count();
    if leading > 0 {
        return Err(GroundingError::ResiduesBeforeFirstCore {
            count: leading,
            first,
            aligned: aligned.to_string(),
        });
    }
    grounded.extend_gaps(first);

    let mut cursor = 0;
    for (i, &start) in core_indexes.iter().enumerate() {
        let start = start.min(len);
        let end = core_indexes
            .get(i + 1)
            .copied()
            .unwrap_or(len)
            .clamp(start, len);
        let core = &aligned_bytes[start..end];

        let degapped: Vec<u8> = core.iter().copied().filter(|&c| c != GAP).collect();
        let offset = find_wildcard(&full_bytes[cursor..], &degapped)
            .map(|pos| cursor + pos)
            .ok_or_else(|| GroundingError::KnownCoreNotFound {
                core: String::from_utf8_lossy(core).into_owned(),
            })?;

        let mut res_count = 0;
        for &c in core {
            if c == GAP {
                grounded.push(None);
            } else {
                grounded.push(Some((offset + res_count + 1) as u32));
                res_count += 1;
            }
        }
        cursor = offset + res_count;
    }

    Ok(grounded)
}

///
/// Columns where a new, positionally discontinuous core starts.
///
/// Always starts with 0. A column is added when it and the column before it both hold
/// residues whose positions are not consecutive.
///
pub fn core_indexes_from_grounded(grounded: &GroundedSeq) -> Vec<usize> {
    let mut core_indexes = vec![0];
    let positions = grounded.positions();
    for i in 1..positions.len() {
        if let (Some(prev), Some(current)) = (positions[i - 1], positions[i]) {
            if prev + 1 != current {
                core_indexes.push(i);
            }
        }
    }
    core_indexes
}

///
/// Ground every sequence of an alignment and derive its variable region.
///
/// # Arguments
/// - aligned: aligned sequences by identifier
/// - full: full sequences by identifier
/// - ids: when given, only these identifiers are grounded
/// - known_cores: core boundaries shared by all sequences; when absent, cores are found
///   by searching the full sequences
pub fn ground_alignment(
    aligned: &BTreeMap<String, String>,
    full: &BTreeMap<String, String>,
    ids: Option<&HashSet<String>>,
    known_cores: Option<&[usize]>,
) -> Result<GroundedAlignment, GroundingError> {
    info!("Converting alignment to grounded sequences");

    let mut result = GroundedAlignment::new();

    for (id, seq) in aligned {
        if ids.is_some_and(|ids| !ids.contains(id)) {
            continue;
        }
        let full_seq = full
            .get(id)
            .ok_or_else(|| GroundingError::UnknownSequence(id.clone()))?;

        let grounded = match known_cores {
            Some(core_indexes) => {
                ground_known_cores(seq, full_seq, core_indexes).map(|grounded| {
                    GroundingResult {
                        grounded,
                        core_indexes: core_indexes.to_vec(),
                    }
                })
            }
            None => ground_core_seq(seq, full_seq),
        }
        .map_err(|e| GroundingError::Sequence {
            id: id.clone(),
            full: full_seq.clone(),
            aligned: seq.clone(),
            source: Box::new(e),
        })?;

        debug!("Grounded {}: {}", id, grounded.grounded);

        let var = variable_region(&grounded.grounded, full_seq.len());
        result.core_indexes.extend(grounded.core_indexes);
        result.insert(id.clone(), grounded.grounded, var);
    }

    Ok(result)
}
