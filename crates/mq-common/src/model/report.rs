//! The classification report.
//!
//! A report is built once per evaluation and never mutated afterwards. It
//! carries no timestamps or random ids: the same input always serializes to
//! the same bytes, so reports can be diffed and compared across runs.

use super::confusion::ConfusionMatrix;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display names for class 0 and class 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ClassNames(pub [String; 2]);

impl ClassNames {
    pub fn new(negative: impl Into<String>, positive: impl Into<String>) -> Self {
        ClassNames([negative.into(), positive.into()])
    }

    pub fn negative(&self) -> &str {
        &self.0[0]
    }

    pub fn positive(&self) -> &str {
        &self.0[1]
    }

    /// Name for label 0 or 1. Any other label reads as the positive class.
    pub fn name(&self, label: u8) -> &str {
        if label == 0 {
            self.negative()
        } else {
            self.positive()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        ClassNames::new("Class 0", "Class 1")
    }
}

impl fmt::Display for ClassNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0[0], self.0[1])
    }
}

impl FromStr for ClassNames {
    type Err = String;

    /// Parse `"negative,positive"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [neg, pos] if !neg.is_empty() && !pos.is_empty() => Ok(ClassNames::new(*neg, *pos)),
            _ => Err(format!(
                "expected two comma-separated class names, got '{}'",
                s
            )),
        }
    }
}

/// Why the ground truth cannot support a ranking metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// Every ground-truth label is 0.
    NoPositives,
    /// Every ground-truth label is 1.
    NoNegatives,
}

impl DegenerateReason {
    /// Classify the class totals, `None` when both classes are present.
    pub fn from_counts(positives: u64, negatives: u64) -> Option<Self> {
        if positives == 0 {
            Some(DegenerateReason::NoPositives)
        } else if negatives == 0 {
            Some(DegenerateReason::NoNegatives)
        } else {
            None
        }
    }
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoPositives => write!(f, "no_positives"),
            DegenerateReason::NoNegatives => write!(f, "no_negatives"),
        }
    }
}

/// An area-under-curve value, or the reason it does not exist.
///
/// Serialized with a `status` tag:
/// `{"status":"defined","value":0.93}` or
/// `{"status":"undefined","reason":"no_positives"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Auc {
    Defined { value: f64 },
    Undefined { reason: DegenerateReason },
}

impl Auc {
    pub fn value(&self) -> Option<f64> {
        match self {
            Auc::Defined { value } => Some(*value),
            Auc::Undefined { .. } => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Auc::Defined { .. })
    }

    /// Value as f64 with undefined mapped to NaN, for plotting and export.
    pub fn or_nan(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Auc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auc::Defined { value } => write!(f, "{:.3}", value),
            Auc::Undefined { reason } => write!(f, "undefined ({})", reason),
        }
    }
}

/// Where the predicted labels in the report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    /// Hard labels supplied by the caller.
    GivenLabels,
    /// Scores cut at a caller-supplied threshold.
    DecisionThreshold,
    /// Scores cut at the F1-maximizing threshold.
    MaxF1Search,
}

impl fmt::Display for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSource::GivenLabels => write!(f, "given labels"),
            LabelSource::DecisionThreshold => write!(f, "decision threshold"),
            LabelSource::MaxF1Search => write!(f, "F1-maximizing threshold"),
        }
    }
}

/// One point of the ROC curve.
///
/// `threshold` is `None` for the strictest point, which predicts nothing
/// positive and anchors the curve at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RocPoint {
    pub threshold: Option<f64>,
    pub fpr: f64,
    pub tpr: f64,
}

/// One point of the precision-recall curve.
///
/// `threshold` is `None` for the anchor at recall 0, precision 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PrPoint {
    pub threshold: Option<f64>,
    pub recall: f64,
    pub precision: f64,
}

/// Scalar metrics at the report's operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScalarMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub f0_5: f64,
    pub f2: f64,
    pub true_positive_rate: f64,
    pub true_negative_rate: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub balanced_accuracy: f64,
    pub mcc: f64,
}

impl ScalarMetrics {
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        Self {
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            f1: cm.f1(),
            f0_5: cm.f_beta(0.5),
            f2: cm.f_beta(2.0),
            true_positive_rate: cm.true_positive_rate(),
            true_negative_rate: cm.true_negative_rate(),
            false_positive_rate: cm.false_positive_rate(),
            false_negative_rate: cm.false_negative_rate(),
            balanced_accuracy: cm.balanced_accuracy(),
            mcc: cm.matthews(),
        }
    }
}

/// Quality report for one binary classifier on one labelled dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationReport {
    pub schema_version: String,
    pub title: String,
    pub class_names: ClassNames,

    pub sample_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,

    /// Threshold the confusion matrix was computed at. For given labels
    /// with no threshold this is the F1-optimal threshold.
    pub decision_threshold: f64,
    pub label_source: LabelSource,
    /// True when the caller passed a decision threshold, even one equal to
    /// the F1-optimal value.
    #[serde(default)]
    pub threshold_supplied: bool,
    /// F1-maximizing threshold over the scores, always computed.
    pub f1_optimal_threshold: f64,

    pub confusion_matrix: ConfusionMatrix,
    pub metrics: ScalarMetrics,

    pub auc_roc: Auc,
    pub auc_pr: Auc,
    pub average_precision: Auc,

    /// Strictest to most lenient threshold.
    pub roc_curve: Vec<RocPoint>,
    /// Strictest to most lenient threshold.
    pub pr_curve: Vec<PrPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degenerate: Option<DegenerateReason>,
}

impl ClassificationReport {
    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }

    /// One-line summary for status output.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{}: n={} threshold={:.4} acc={:.4} prec={:.4} rec={:.4} f1={:.4} auc_roc={} auc_pr={}",
            self.title,
            self.sample_count,
            self.decision_threshold,
            self.metrics.accuracy,
            self.metrics.precision,
            self.metrics.recall,
            self.metrics.f1,
            self.auc_roc,
            self.auc_pr,
        );
        if let Some(reason) = self.degenerate {
            line.push_str(&format!(" [degenerate: {}]", reason));
        }
        line
    }
}
