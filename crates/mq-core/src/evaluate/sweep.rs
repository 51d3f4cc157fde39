//! Threshold sweep: one sort, one pass.
//!
//! Scores are ranked once (descending) and walked with running
//! true/false-positive counts. Each distinct score closes one operating
//! point, so every threshold's confusion matrix is available in O(1) after
//! an O(N log N) sort, instead of rescanning the data per threshold.

use mq_common::{Auc, ConfusionMatrix, DegenerateReason, PrPoint, RocPoint};
use mq_math::{safe_ratio, step_area, trapezoid};
use serde::{Deserialize, Serialize};

/// Cumulative counts when predicting positive for `score >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub threshold: f64,
    pub tp: u64,
    pub fp: u64,
}

/// All operating points of a scorer, strictest threshold first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSweep {
    pub positives: u64,
    pub negatives: u64,
    /// One point per distinct score, thresholds strictly decreasing.
    pub points: Vec<OperatingPoint>,
}

/// Sweep every distinct score as a threshold.
///
/// Inputs are assumed validated: equal lengths, labels in {0, 1}, finite
/// scores. Equal scores always land in the same operating point.
pub fn sweep(y_true: &[u8], y_score: &[f64]) -> ThresholdSweep {
    debug_assert_eq!(y_true.len(), y_score.len());

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_unstable_by(|&a, &b| y_score[b].total_cmp(&y_score[a]));

    let positives = y_true.iter().filter(|&&y| y == 1).count() as u64;
    let negatives = y_true.len() as u64 - positives;

    let mut points = Vec::new();
    let (mut tp, mut fp) = (0u64, 0u64);
    let mut ranked = order.iter().peekable();
    while let Some(&idx) = ranked.next() {
        let threshold = y_score[idx];
        if y_true[idx] == 1 {
            tp += 1;
        } else {
            fp += 1;
        }
        // -0.0 and 0.0 compare equal and share a point.
        if ranked.peek().is_some_and(|&&next| y_score[next] == threshold) {
            continue;
        }
        points.push(OperatingPoint { threshold, tp, fp });
    }

    ThresholdSweep {
        positives,
        negatives,
        points,
    }
}

impl ThresholdSweep {
    pub fn sample_count(&self) -> u64 {
        self.positives + self.negatives
    }

    pub fn degenerate(&self) -> Option<DegenerateReason> {
        DegenerateReason::from_counts(self.positives, self.negatives)
    }

    /// Confusion matrix of operating point `index`.
    pub fn confusion(&self, index: usize) -> ConfusionMatrix {
        let p = self.points[index];
        ConfusionMatrix::from_cumulative(p.tp, p.fp, self.positives, self.negatives)
    }

    /// Confusion matrix for an arbitrary threshold, by binary search.
    pub fn confusion_at(&self, threshold: f64) -> ConfusionMatrix {
        let reached = self.points.partition_point(|p| p.threshold >= threshold);
        let (tp, fp) = match reached {
            0 => (0, 0),
            k => (self.points[k - 1].tp, self.points[k - 1].fp),
        };
        ConfusionMatrix::from_cumulative(tp, fp, self.positives, self.negatives)
    }

    /// ROC curve anchored at (0, 0), strictest threshold first.
    ///
    /// With a single-class ground truth the empty-class rate is reported as
    /// 0.0; the AUC is flagged undefined separately.
    pub fn roc_curve(&self) -> Vec<RocPoint> {
        std::iter::once(RocPoint {
            threshold: None,
            fpr: 0.0,
            tpr: 0.0,
        })
        .chain(self.points.iter().map(|p| RocPoint {
            threshold: Some(p.threshold),
            fpr: safe_ratio(p.fp, self.negatives),
            tpr: safe_ratio(p.tp, self.positives),
        }))
        .collect()
    }

    /// Precision-recall curve anchored at recall 0, precision 1.
    pub fn pr_curve(&self) -> Vec<PrPoint> {
        std::iter::once(PrPoint {
            threshold: None,
            recall: 0.0,
            precision: 1.0,
        })
        .chain(self.points.iter().map(|p| PrPoint {
            threshold: Some(p.threshold),
            recall: safe_ratio(p.tp, self.positives),
            precision: safe_ratio(p.tp, p.tp + p.fp),
        }))
        .collect()
    }

    /// Trapezoidal area under the ROC curve.
    pub fn auc_roc(&self) -> Auc {
        self.defined_or_flagged(|| {
            let pts: Vec<(f64, f64)> = self.roc_curve().iter().map(|p| (p.fpr, p.tpr)).collect();
            trapezoid(&pts)
        })
    }

    /// Trapezoidal area under the precision-recall curve.
    pub fn auc_pr(&self) -> Auc {
        self.defined_or_flagged(|| trapezoid(&self.pr_points()))
    }

    /// Step-wise average precision, Σ (Rₙ − Rₙ₋₁)·Pₙ.
    pub fn average_precision(&self) -> Auc {
        self.defined_or_flagged(|| step_area(&self.pr_points()))
    }

    fn pr_points(&self) -> Vec<(f64, f64)> {
        self.pr_curve()
            .iter()
            .map(|p| (p.recall, p.precision))
            .collect()
    }

    fn defined_or_flagged(&self, area: impl FnOnce() -> f64) -> Auc {
        match self.degenerate() {
            Some(reason) => Auc::Undefined { reason },
            None => Auc::Defined { value: area() },
        }
    }
}
