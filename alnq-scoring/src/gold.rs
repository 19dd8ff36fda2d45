//! The gold standard model.
//!
//! Pairwise and multiple gold standards answer one question for the simple scorer: which
//! residue of another sequence does a residue align to. The extended gold standard instead
//! lists, per residue, every acceptable target residue with a weight.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use alnq_core::models::{GroundedSeq, PairKey};
use alnq_io::{GoldJson, MultiVar, PairwiseVarSet, RawCategory};

use crate::context::{ALIGNED, DONT_KNOW, ScoringContext, UNALIGNED};
use crate::errors::ScoringError;

///
/// Read-only access to a gold standard used by the simple scorer.
///
pub trait GoldLookup: Sync {
    ///
    /// Residue of `other` that residue `position` of `query` is aligned to in the gold
    /// standard, `None` when it is aligned to a gap.
    ///
    fn aligned_residue(
        &self,
        query: &str,
        other: &str,
        position: u32,
    ) -> Result<Option<u32>, ScoringError>;

    ///
    /// Highest SP score reachable for the pair: 2 per column where both gold residues are
    /// present, 1 where only one is.
    ///
    fn max_sp_score(&self, id1: &str, id2: &str) -> Result<u32, ScoringError>;

    fn ids(&self) -> BTreeSet<String>;
}

fn column_sp_score(seq1: &GroundedSeq, seq2: &GroundedSeq) -> u32 {
    seq1.iter()
        .zip(seq2.iter())
        .map(|pair| match pair {
            (Some(_), Some(_)) => 2,
            (Some(_), None) | (None, Some(_)) => 1,
            (None, None) => 0,
        })
        .sum()
}

fn partner_at(
    other_id: &str,
    other: &GroundedSeq,
    query_id: &str,
    query: &GroundedSeq,
    column: usize,
) -> Result<Option<u32>, ScoringError> {
    if other.len() != query.len() {
        return Err(ScoringError::LengthMismatch {
            id1: query_id.to_string(),
            id2: other_id.to_string(),
            len1: query.len(),
            len2: other.len(),
        });
    }
    Ok(other[column])
}

///
/// Gold standard made of independent pairwise alignments.
///
#[derive(Debug, Clone, Default)]
pub struct PairwiseGold {
    pub alns: BTreeMap<PairKey, BTreeMap<String, GroundedSeq>>,
    pub full: BTreeMap<String, String>,
}

impl From<PairwiseVarSet> for PairwiseGold {
    fn from(value: PairwiseVarSet) -> Self {
        PairwiseGold {
            alns: value
                .alns
                .into_iter()
                .map(|(key, var)| (key, var.alns))
                .collect(),
            full: value.full,
        }
    }
}

impl PairwiseGold {
    fn pair(&self, id1: &str, id2: &str) -> Result<&BTreeMap<String, GroundedSeq>, ScoringError> {
        let key = PairKey::new(id1, id2);
        self.alns
            .get(&key)
            .ok_or(ScoringError::MissingGoldPair(key))
    }

    fn seq<'a>(
        pair: &'a BTreeMap<String, GroundedSeq>,
        id1: &str,
        id2: &str,
    ) -> Result<&'a GroundedSeq, ScoringError> {
        pair.get(id1)
            .ok_or_else(|| ScoringError::MissingGoldPair(PairKey::new(id1, id2)))
    }
}

impl GoldLookup for PairwiseGold {
    fn aligned_residue(
        &self,
        query: &str,
        other: &str,
        position: u32,
    ) -> Result<Option<u32>, ScoringError> {
        let pair = self.pair(query, other)?;
        let query_seq = Self::seq(pair, query, other)?;
        let other_seq = Self::seq(pair, other, query)?;

        let column = query_seq
            .column_of(position)
            .ok_or_else(|| ScoringError::ResidueNotInGold {
                id: query.to_string(),
                residue: position,
            })?;
        partner_at(other, other_seq, query, query_seq, column)
    }

    fn max_sp_score(&self, id1: &str, id2: &str) -> Result<u32, ScoringError> {
        let pair = self.pair(id1, id2)?;
        Ok(column_sp_score(
            Self::seq(pair, id1, id2)?,
            Self::seq(pair, id2, id1)?,
        ))
    }

    fn ids(&self) -> BTreeSet<String> {
        self.alns
            .keys()
            .flat_map(|key| [key.first().to_string(), key.second().to_string()])
            .collect()
    }
}

///
/// Gold standard given as one multiple alignment in corvar notation.
///
#[derive(Debug, Clone, Default)]
pub struct MultiGold {
    pub target: String,
    pub cores: BTreeMap<String, GroundedSeq>,
    pub var: BTreeMap<String, Vec<u32>>,
    pub full: BTreeMap<String, String>,
}

impl From<MultiVar> for MultiGold {
    fn from(value: MultiVar) -> Self {
        MultiGold {
            target: value.target,
            cores: value.cores,
            var: value.var,
            full: value.full,
        }
    }
}

impl MultiGold {
    fn cores_of(&self, id: &str) -> Result<&GroundedSeq, ScoringError> {
        self.cores
            .get(id)
            .ok_or_else(|| ScoringError::MissingGoldPair(PairKey::new(id, self.target.as_str())))
    }

    fn var_of(&self, id: &str) -> &[u32] {
        self.var.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}

impl GoldLookup for MultiGold {
    fn aligned_residue(
        &self,
        query: &str,
        other: &str,
        position: u32,
    ) -> Result<Option<u32>, ScoringError> {
        let query_seq = self.cores_of(query)?;
        let other_seq = self.cores_of(other)?;

        match query_seq.column_of(position) {
            Some(column) => partner_at(other, other_seq, query, query_seq, column),
            None if self.var_of(query).contains(&position) => Ok(None),
            None => Err(ScoringError::ResidueNotInGold {
                id: query.to_string(),
                residue: position,
            }),
        }
    }

    fn max_sp_score(&self, id1: &str, id2: &str) -> Result<u32, ScoringError> {
        // every gold variable residue is a correctly unaligned one
        let var_score = (self.var_of(id1).len() + self.var_of(id2).len()) as u32;
        Ok(var_score + column_sp_score(self.cores_of(id1)?, self.cores_of(id2)?))
    }

    fn ids(&self) -> BTreeSet<String> {
        self.cores.keys().cloned().collect()
    }
}

///
/// Where a gold solution places a residue.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionKey {
    /// `*`: the residue must not be aligned to anything
    Unaligned,
    /// aligned to this target residue
    Target(u32),
}

impl Display for SolutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionKey::Unaligned => write!(f, "*"),
            SolutionKey::Target(position) => write!(f, "{}", position),
        }
    }
}

///
/// Score category of a gold solution.
///
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreCategory {
    Aligned,
    Unaligned,
    DontKnow,
    /// any other label of the weight table
    Label(String),
    /// one of `N` equally good solutions, `mN`
    Multiple(u32),
    /// `partial(w)`
    Partial(f64),
    /// explicit weight
    Weight(f64),
}

fn checked_weight(w: f64) -> Result<f64, ScoringError> {
    if (-1.0..=1.0).contains(&w) {
        Ok(w)
    } else {
        Err(ScoringError::WeightOutOfRange(w))
    }
}

impl ScoreCategory {
    ///
    /// Parse a category label.
    ///
    /// Labels of the weight table win over the `mN` and `partial(w)` forms, so a file can
    /// define `m1` itself.
    ///
    pub fn parse(label: &str, ctx: &ScoringContext) -> Result<Self, ScoringError> {
        match label {
            ALIGNED => return Ok(ScoreCategory::Aligned),
            UNALIGNED => return Ok(ScoreCategory::Unaligned),
            DONT_KNOW => return Ok(ScoreCategory::DontKnow),
            _ => {}
        }
        if ctx.weight(label).is_some() {
            return Ok(ScoreCategory::Label(label.to_string()));
        }
        if let Some(n) = label.strip_prefix('m').and_then(|n| n.parse::<u32>().ok()) {
            if n > 0 {
                return Ok(ScoreCategory::Multiple(n));
            }
        }
        if let Some(w) = label
            .strip_prefix("partial(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|w| w.trim().parse::<f64>().ok())
        {
            return checked_weight(w).map(ScoreCategory::Partial);
        }
        Err(ScoringError::UnknownCategory(label.to_string()))
    }

    pub fn from_raw(raw: &RawCategory, ctx: &ScoringContext) -> Result<Self, ScoringError> {
        match raw {
            RawCategory::Weight(w) => checked_weight(*w).map(ScoreCategory::Weight),
            RawCategory::Label(label) => Self::parse(label, ctx),
        }
    }

    pub fn weight(&self, ctx: &ScoringContext) -> f64 {
        match self {
            ScoreCategory::Aligned => ctx.aligned_weight(),
            ScoreCategory::Unaligned => ctx.unaligned_weight(),
            ScoreCategory::DontKnow => ctx.weight(DONT_KNOW).unwrap_or(0.0),
            ScoreCategory::Label(label) => ctx.weight(label).unwrap_or(0.0),
            ScoreCategory::Multiple(n) => ctx.aligned_weight() / *n as f64,
            ScoreCategory::Partial(w) | ScoreCategory::Weight(w) => *w,
        }
    }

    pub fn is_penalty(&self) -> bool {
        matches!(self, ScoreCategory::Unaligned)
    }
}

///
/// One acceptable placement of a residue, with its weight resolved.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub key: SolutionKey,
    pub category: ScoreCategory,
    pub weight: f64,
}

///
/// Extended gold standard: per non-target identifier, per residue, the acceptable target
/// residues in file order.
///
#[derive(Debug, Clone, Default)]
pub struct ExtendedGold {
    pub target: String,
    pub alignments: BTreeMap<String, BTreeMap<u32, Vec<Solution>>>,
    pub full: BTreeMap<String, String>,
}

impl ExtendedGold {
    ///
    /// Build the model from a parsed gold JSON file.
    ///
    /// # Arguments
    /// - json: parsed gold file
    /// - full: full sequences of the gold identifiers
    /// - ctx: scoring context, already updated with the file's score modifiers
    pub fn from_json(
        json: GoldJson,
        full: BTreeMap<String, String>,
        ctx: &ScoringContext,
    ) -> Result<Self, ScoringError> {
        let mut alignments = BTreeMap::new();

        for (id, residues) in json.alignments {
            let mut parsed = BTreeMap::new();
            for (residue, raw_solutions) in residues {
                let solutions = raw_solutions
                    .iter()
                    .map(|raw| {
                        let key = match raw.key.trim() {
                            "*" => SolutionKey::Unaligned,
                            k => k.parse().map(SolutionKey::Target).map_err(|_| {
                                ScoringError::InvalidSolution {
                                    id: id.clone(),
                                    residue,
                                    key: raw.key.clone(),
                                }
                            })?,
                        };
                        let category = ScoreCategory::from_raw(&raw.category, ctx)?;
                        let weight = category.weight(ctx);
                        Ok(Solution {
                            key,
                            category,
                            weight,
                        })
                    })
                    .collect::<Result<Vec<Solution>, ScoringError>>()?;
                parsed.insert(residue, solutions);
            }
            alignments.insert(id, parsed);
        }

        Ok(ExtendedGold {
            target: json.target,
            alignments,
            full,
        })
    }

    ///
    /// All gold identifiers, the target included.
    ///
    pub fn ids(&self) -> BTreeSet<String> {
        let mut ids: BTreeSet<String> = self.alignments.keys().cloned().collect();
        ids.insert(self.target.clone());
        ids
    }

    pub fn solutions(&self, id: &str, residue: u32) -> Option<&[Solution]> {
        self.alignments
            .get(id)
            .and_then(|residues| residues.get(&residue))
            .map(Vec::as_slice)
    }
}
