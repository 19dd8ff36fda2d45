use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::grounded::GroundedSeq;

///
/// A grounded alignment: the grounded core sequence of every identifier, the positions of
/// its full sequence left out of all cores (the variable region), and the union of core
/// start columns over all sequences.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroundedAlignment {
    pub cores: BTreeMap<String, GroundedSeq>,
    pub var: BTreeMap<String, Vec<u32>>,
    pub core_indexes: BTreeSet<usize>,
}

impl GroundedAlignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, cores: GroundedSeq, var: Vec<u32>) {
        self.var.insert(id.clone(), var);
        self.cores.insert(id, cores);
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.cores.keys()
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cores.contains_key(id)
    }

    pub fn seq(&self, id: &str) -> Option<&GroundedSeq> {
        self.cores.get(id)
    }

    ///
    /// Variable region of `id`; an identifier without one has an empty region
    ///
    pub fn var_region(&self, id: &str) -> &[u32] {
        self.var.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_insert_and_lookup() {
        let mut aln = GroundedAlignment::new();
        aln.insert("1abc".to_string(), "-12".parse().unwrap(), vec![3, 4]);

        assert!(aln.contains("1abc"));
        assert_eq!(aln.len(), 1);
        assert_eq!(aln.var_region("1abc"), &[3, 4]);
        assert_eq!(aln.var_region("missing"), &[] as &[u32]);
        assert_eq!(aln.seq("1abc").unwrap().residue_count(), 2);
    }
}
