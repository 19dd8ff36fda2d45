use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

///
/// Confusion matrix of alignment decisions against a gold standard.
///
/// In pairwise scoring a matched (or mismatched) residue pair counts 2, one per side, and a
/// residue aligned against a gap counts 1.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    #[serde(rename = "TP")]
    pub tp: u32,
    #[serde(rename = "FP")]
    pub fp: u32,
    #[serde(rename = "TN")]
    pub tn: u32,
    #[serde(rename = "FN")]
    pub fn_: u32,
}

impl ConfusionMatrix {
    pub fn new(tp: u32, fp: u32, tn: u32, fn_: u32) -> Self {
        ConfusionMatrix { tp, fp, tn, fn_ }
    }

    ///
    /// Sum of all four counters
    ///
    pub fn total(&self) -> u32 {
        self.tp + self.fp + self.tn + self.fn_
    }
}

impl Add for ConfusionMatrix {
    type Output = ConfusionMatrix;

    fn add(self, rhs: Self) -> Self::Output {
        ConfusionMatrix {
            tp: self.tp + rhs.tp,
            fp: self.fp + rhs.fp,
            tn: self.tn + rhs.tn,
            fn_: self.fn_ + rhs.fn_,
        }
    }
}

impl AddAssign for ConfusionMatrix {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ConfusionMatrix {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ConfusionMatrix::default(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a ConfusionMatrix> for ConfusionMatrix {
    fn sum<I: Iterator<Item = &'a ConfusionMatrix>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP: {} FP: {} TN: {} FN: {}",
            self.tp, self.fp, self.tn, self.fn_
        )
    }
}
