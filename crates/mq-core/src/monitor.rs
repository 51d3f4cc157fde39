//! Model-monitor compatible metrics export.
//!
//! Shapes a [`ClassificationReport`] as a `binary_classification_metrics`
//! document, the format model-quality baselines are stored in. Every scalar
//! is a `{value, standard_deviation}` pair; metrics are computed once on the
//! whole dataset, so the deviation is always the string `"NaN"`, and so is
//! any undefined value.
//!
//! Two additions over the stock format: `assumed_threshold` (the
//! F1-maximizing threshold) and `auc_pr`.

use mq_common::ClassificationReport;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Scalar with a (never computed) standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValue {
    pub value: f64,
}

impl MetricValue {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("MetricValue", 2)?;
        if self.value.is_finite() {
            s.serialize_field("value", &self.value)?;
        } else {
            s.serialize_field("value", "NaN")?;
        }
        s.serialize_field("standard_deviation", "NaN")?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionRecallCurve {
    pub precisions: Vec<f64>,
    pub recalls: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub false_positive_rates: Vec<f64>,
    pub true_positive_rates: Vec<f64>,
}

/// actual label -> predicted label -> count.
pub type NestedConfusion = BTreeMap<String, BTreeMap<String, u64>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryClassificationMetrics {
    pub accuracy: MetricValue,
    pub auc: MetricValue,
    pub auc_pr: MetricValue,
    pub f0_5: MetricValue,
    pub f1: MetricValue,
    pub f2: MetricValue,
    pub false_negative_rate: MetricValue,
    pub false_positive_rate: MetricValue,
    pub precision: MetricValue,
    pub recall: MetricValue,
    pub true_negative_rate: MetricValue,
    pub true_positive_rate: MetricValue,
    pub confusion_matrix: NestedConfusion,
    pub precision_recall_curve: PrecisionRecallCurve,
    pub receiver_operating_characteristic_curve: RocCurve,
    pub assumed_threshold: MetricValue,
}

/// Top-level monitor document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorReport {
    pub binary_classification_metrics: BinaryClassificationMetrics,
}

impl MonitorReport {
    pub fn from_report(report: &ClassificationReport) -> Self {
        let m = &report.metrics;
        let cm = &report.confusion_matrix;

        let mut confusion = NestedConfusion::new();
        for (actual, row) in cm.as_rows().iter().enumerate() {
            let entry = confusion.entry(actual.to_string()).or_default();
            for (predicted, count) in row.iter().enumerate() {
                entry.insert(predicted.to_string(), *count);
            }
        }

        MonitorReport {
            binary_classification_metrics: BinaryClassificationMetrics {
                accuracy: MetricValue::new(m.accuracy),
                auc: MetricValue::new(report.auc_roc.or_nan()),
                auc_pr: MetricValue::new(report.auc_pr.or_nan()),
                f0_5: MetricValue::new(m.f0_5),
                f1: MetricValue::new(m.f1),
                f2: MetricValue::new(m.f2),
                false_negative_rate: MetricValue::new(m.false_negative_rate),
                false_positive_rate: MetricValue::new(m.false_positive_rate),
                precision: MetricValue::new(m.precision),
                recall: MetricValue::new(m.recall),
                true_negative_rate: MetricValue::new(m.true_negative_rate),
                true_positive_rate: MetricValue::new(m.true_positive_rate),
                confusion_matrix: confusion,
                precision_recall_curve: PrecisionRecallCurve {
                    precisions: report.pr_curve.iter().map(|p| p.precision).collect(),
                    recalls: report.pr_curve.iter().map(|p| p.recall).collect(),
                },
                receiver_operating_characteristic_curve: RocCurve {
                    false_positive_rates: report.roc_curve.iter().map(|p| p.fpr).collect(),
                    true_positive_rates: report.roc_curve.iter().map(|p| p.tpr).collect(),
                },
                assumed_threshold: MetricValue::new(report.f1_optimal_threshold),
            },
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
