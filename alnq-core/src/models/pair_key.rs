use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

///
/// Order-independent key for a pair of sequence identifiers.
///
/// `PairKey::new("b", "a") == PairKey::new("a", "b")`; the identifiers are stored sorted.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    pub fn new<A: Into<String>, B: Into<String>>(a: A, b: B) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            PairKey {
                first: a,
                second: b,
            }
        } else {
            PairKey {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, id: &str) -> bool {
        self.first == id || self.second == id
    }

    ///
    /// The identifier paired with `id`, or `None` when `id` is not part of this pair
    ///
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.first == id {
            Some(&self.second)
        } else if self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

// serialized as a plain string so it can key JSON objects
impl Serialize for PairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::HashMap;

    #[rstest]
    fn test_order_independent() {
        let ab = PairKey::new("1abc", "2xyz");
        let ba = PairKey::new("2xyz", "1abc");
        assert_eq!(ab, ba);

        let mut map = HashMap::new();
        map.insert(ab, 1);
        assert_eq!(map.get(&ba), Some(&1));
    }

    #[rstest]
    fn test_other() {
        let key = PairKey::new("b", "a");
        assert_eq!(key.first(), "a");
        assert_eq!(key.other("a"), Some("b"));
        assert_eq!(key.other("c"), None);
        assert!(key.contains("b"));
        assert_eq!(key.to_string(), "a b");
    }
}
