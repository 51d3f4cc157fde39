//! Confusion counts at a fixed operating point.

use mq_math::{f_beta_counts, matthews, safe_ratio, Fraction};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 2×2 confusion matrix of a binary classifier.
///
/// Rows are the actual class, columns the predicted class:
///
/// ```text
///              pred 0   pred 1
///   actual 0     tn       fp
///   actual 1     fn       tp
/// ```
///
/// Every rate with an empty denominator is 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConfusionMatrix {
    pub tn: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub tp: u64,
}

impl ConfusionMatrix {
    /// Count label agreement between ground truth and hard predictions.
    ///
    /// Inputs are assumed validated (equal lengths, values in {0, 1}).
    pub fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Self {
        debug_assert_eq!(y_true.len(), y_pred.len());
        y_true
            .iter()
            .zip(y_pred)
            .fold(Self::default(), |mut cm, (&t, &p)| {
                match (t, p) {
                    (1, 1) => cm.tp += 1,
                    (1, _) => cm.fn_ += 1,
                    (_, 1) => cm.fp += 1,
                    _ => cm.tn += 1,
                }
                cm
            })
    }

    /// Confusion counts when predicting positive for `score >= threshold`.
    pub fn at_threshold(y_true: &[u8], y_score: &[f64], threshold: f64) -> Self {
        debug_assert_eq!(y_true.len(), y_score.len());
        y_true
            .iter()
            .zip(y_score)
            .fold(Self::default(), |mut cm, (&t, &s)| {
                match (t == 1, s >= threshold) {
                    (true, true) => cm.tp += 1,
                    (true, false) => cm.fn_ += 1,
                    (false, true) => cm.fp += 1,
                    (false, false) => cm.tn += 1,
                }
                cm
            })
    }

    /// Build from cumulative sweep counts and class totals.
    pub fn from_cumulative(tp: u64, fp: u64, positives: u64, negatives: u64) -> Self {
        debug_assert!(tp <= positives && fp <= negatives);
        Self {
            tn: negatives - fp,
            fp,
            fn_: positives - tp,
            tp,
        }
    }

    pub fn total(&self) -> u64 {
        self.tn + self.fp + self.fn_ + self.tp
    }

    /// Actual positives (tp + fn).
    pub fn positives(&self) -> u64 {
        self.tp + self.fn_
    }

    /// Actual negatives (tn + fp).
    pub fn negatives(&self) -> u64 {
        self.tn + self.fp
    }

    pub fn predicted_positives(&self) -> u64 {
        self.tp + self.fp
    }

    pub fn predicted_negatives(&self) -> u64 {
        self.tn + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        safe_ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        safe_ratio(self.tp, self.predicted_positives())
    }

    /// Recall, a.k.a. true positive rate.
    pub fn recall(&self) -> f64 {
        safe_ratio(self.tp, self.positives())
    }

    pub fn f1(&self) -> f64 {
        f_beta_counts(self.tp, self.fp, self.fn_, 1.0)
    }

    /// F1 as an exact fraction, for tie-exact comparisons.
    pub fn f1_exact(&self) -> Fraction {
        Fraction::f1(self.tp, self.fp, self.fn_)
    }

    pub fn f_beta(&self, beta: f64) -> f64 {
        f_beta_counts(self.tp, self.fp, self.fn_, beta)
    }

    pub fn true_positive_rate(&self) -> f64 {
        self.recall()
    }

    pub fn true_negative_rate(&self) -> f64 {
        safe_ratio(self.tn, self.negatives())
    }

    pub fn false_positive_rate(&self) -> f64 {
        safe_ratio(self.fp, self.negatives())
    }

    pub fn false_negative_rate(&self) -> f64 {
        safe_ratio(self.fn_, self.positives())
    }

    pub fn balanced_accuracy(&self) -> f64 {
        (self.true_positive_rate() + self.true_negative_rate()) / 2.0
    }

    pub fn matthews(&self) -> f64 {
        matthews(self.tp, self.tn, self.fp, self.fn_)
    }

    /// Counts as `[actual][predicted]`.
    pub fn as_rows(&self) -> [[u64; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }

    /// Each row divided by its actual-class total. Empty rows stay 0.0.
    pub fn row_normalized(&self) -> [[f64; 2]; 2] {
        let rows = self.as_rows();
        rows.map(|row| {
            let total = row[0] + row[1];
            [safe_ratio(row[0], total), safe_ratio(row[1], total)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn from_labels_counts_each_cell() {
        let cm = ConfusionMatrix::from_labels(&[0, 0, 1, 1, 1], &[0, 1, 0, 1, 1]);
        assert_eq!(
            cm,
            ConfusionMatrix {
                tn: 1,
                fp: 1,
                fn_: 1,
                tp: 2
            }
        );
        assert_eq!(cm.total(), 5);
        assert_eq!(cm.positives(), 3);
        assert_eq!(cm.negatives(), 2);
    }

    #[test]
    fn at_threshold_is_inclusive() {
        let cm = ConfusionMatrix::at_threshold(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8], 0.5);
        assert_eq!(
            cm,
            ConfusionMatrix {
                tn: 2,
                fp: 0,
                fn_: 1,
                tp: 1
            }
        );
        assert!(approx(cm.accuracy(), 0.75));
        assert!(approx(cm.precision(), 1.0));
        assert!(approx(cm.recall(), 0.5));
        assert!(approx(cm.f1(), 2.0 / 3.0));

        let cm = ConfusionMatrix::at_threshold(&[1], &[0.35], 0.35);
        assert_eq!(cm.tp, 1);
    }

    #[test]
    fn rates_are_not_swapped() {
        let cm = ConfusionMatrix {
            tn: 6,
            fp: 2,
            fn_: 1,
            tp: 3,
        };
        assert!(approx(cm.false_positive_rate(), 2.0 / 8.0));
        assert!(approx(cm.false_negative_rate(), 1.0 / 4.0));
        assert!(approx(cm.true_negative_rate(), 6.0 / 8.0));
        assert!(approx(cm.balanced_accuracy(), (0.75 + 0.75) / 2.0));
    }

    #[test]
    fn empty_denominators_are_zero() {
        let cm = ConfusionMatrix {
            tn: 4,
            fp: 0,
            fn_: 0,
            tp: 0,
        };
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert_eq!(cm.f1(), 0.0);
        assert_eq!(cm.false_negative_rate(), 0.0);
        assert_eq!(cm.row_normalized(), [[1.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn cumulative_matches_threshold() {
        let direct = ConfusionMatrix::at_threshold(&[0, 1, 1, 0], &[0.9, 0.8, 0.2, 0.1], 0.8);
        let cumulative = ConfusionMatrix::from_cumulative(1, 1, 2, 2);
        assert_eq!(direct, cumulative);
    }

    #[test]
    fn serializes_fn_field_name() {
        let cm = ConfusionMatrix {
            tn: 1,
            fp: 2,
            fn_: 3,
            tp: 4,
        };
        let json = serde_json::to_value(cm).unwrap();
        assert_eq!(json["fn"], 3);
        let back: ConfusionMatrix = serde_json::from_value(json).unwrap();
        assert_eq!(back, cm);
    }
}
