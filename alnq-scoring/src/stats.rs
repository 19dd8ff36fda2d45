use serde::Serialize;

use alnq_core::models::ConfusionMatrix;

///
/// Summary statistics of a confusion matrix. A ratio is `None` when its denominator is 0.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub ppv: Option<f64>,
    pub npv: Option<f64>,
    pub mcc: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

pub fn calc_stats(matrix: &ConfusionMatrix) -> Stats {
    let tp = matrix.tp as f64;
    let fp = matrix.fp as f64;
    let tn = matrix.tn as f64;
    let fn_ = matrix.fn_ as f64;

    let mcc_denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();

    Stats {
        sensitivity: ratio(tp, tp + fn_),
        specificity: ratio(tn, tn + fp),
        ppv: ratio(tp, tp + fp),
        npv: ratio(tn, tn + fn_),
        mcc: ratio(tp * tn - fp * fn_, mcc_denominator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_calc_stats() {
        let stats = calc_stats(&ConfusionMatrix::new(2, 2, 2, 1));
        assert_eq!(stats.sensitivity, Some(2.0 / 3.0));
        assert_eq!(stats.specificity, Some(0.5));
        assert_eq!(stats.ppv, Some(0.5));
        assert_eq!(stats.npv, Some(2.0 / 3.0));

        // (4 - 2) / sqrt(4 * 3 * 4 * 3)
        assert_eq!(stats.mcc, Some(2.0 / 12.0));
    }

    #[rstest]
    fn test_calc_stats_undefined() {
        let stats = calc_stats(&ConfusionMatrix::new(4, 0, 0, 0));
        assert_eq!(stats.sensitivity, Some(1.0));
        assert_eq!(stats.ppv, Some(1.0));
        assert_eq!(stats.specificity, None);
        assert_eq!(stats.npv, None);
        assert_eq!(stats.mcc, None);

        assert_eq!(calc_stats(&ConfusionMatrix::default()), Stats::default());
    }
}
