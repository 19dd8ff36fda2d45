use std::fmt::{self, Display};
use std::ops::Index;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::errors::AlnqCoreError;

pub const GAP: char = '-';

///
/// A grounded sequence: one entry per alignment column, either the 1-based position of the
/// residue in its full sequence, or `None` for a gap.
///
/// For a correctly grounded sequence the non-gap positions are strictly increasing.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroundedSeq(Vec<Option<u32>>);

impl GroundedSeq {
    pub fn new(positions: Vec<Option<u32>>) -> Self {
        GroundedSeq(positions)
    }

    ///
    /// A sequence made of `len` gaps only
    ///
    pub fn gaps(len: usize) -> Self {
        GroundedSeq(vec![None; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, position: Option<u32>) {
        self.0.push(position);
    }

    pub fn extend_gaps(&mut self, n: usize) {
        self.0.extend(std::iter::repeat_n(None, n));
    }

    pub fn positions(&self) -> &[Option<u32>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<u32>> {
        self.0.iter()
    }

    ///
    /// Iterate over the residue positions only, skipping gaps.
    ///
    pub fn residues(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().filter_map(|p| *p)
    }

    pub fn residue_count(&self) -> usize {
        self.0.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_all_gaps(&self) -> bool {
        self.0.iter().all(|p| p.is_none())
    }

    ///
    /// Column index holding residue `position`, if that residue is present
    ///
    pub fn column_of(&self, position: u32) -> Option<usize> {
        self.0.iter().position(|p| *p == Some(position))
    }

    pub fn contains(&self, position: u32) -> bool {
        self.column_of(position).is_some()
    }

    ///
    /// Check that non-gap positions are strictly increasing.
    ///
    pub fn is_monotonic(&self) -> bool {
        let mut prev = 0;
        for p in self.residues() {
            if p <= prev {
                return false;
            }
            prev = p;
        }
        true
    }
}

impl Index<usize> for GroundedSeq {
    type Output = Option<u32>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Option<u32>>> for GroundedSeq {
    fn from(value: Vec<Option<u32>>) -> Self {
        GroundedSeq(value)
    }
}

impl FromIterator<Option<u32>> for GroundedSeq {
    fn from_iter<T: IntoIterator<Item = Option<u32>>>(iter: T) -> Self {
        GroundedSeq(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GroundedSeq {
    type Item = &'a Option<u32>;
    type IntoIter = std::slice::Iter<'a, Option<u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_token(token: &str) -> Result<Option<u32>, AlnqCoreError> {
    if token == "-" {
        return Ok(None);
    }
    let position = token
        .parse::<u32>()
        .map_err(|_| AlnqCoreError::InvalidPosition(token.to_string()))?;
    if position == 0 {
        return Err(AlnqCoreError::ZeroPosition);
    }
    Ok(Some(position))
}

impl FromStr for GroundedSeq {
    type Err = AlnqCoreError;

    ///
    /// Parse a grounded sequence from text.
    ///
    /// Tokens are separated by whitespace or commas, e.g. `"- 12 13 - 14"`. Without any
    /// separator every character is one token, so `"-123--"` reads as
    /// `[-, 1, 2, 3, -, -]`.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let separated = s.contains(|c: char| c.is_whitespace() || c == ',');

        if separated {
            s.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(parse_token)
                .collect()
        } else {
            s.chars()
                .map(|c| parse_token(c.encode_utf8(&mut [0; 4])))
                .collect()
        }
    }
}

impl Display for GroundedSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .0
            .iter()
            .map(|p| match p {
                Some(p) => p.to_string(),
                None => GAP.to_string(),
            })
            .collect();
        write!(f, "{}", tokens.join(" "))
    }
}

impl Serialize for GroundedSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for p in &self.0 {
            match p {
                Some(p) => seq.serialize_element(p)?,
                None => seq.serialize_element("-")?,
            }
        }
        seq.end()
    }
}
