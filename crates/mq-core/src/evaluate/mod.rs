//! Binary classification evaluator.
//!
//! Turns ground truth and model output into a [`ClassificationReport`]:
//!
//! 1. Validate the prediction record (typed [`InputError`] on violation).
//! 2. Sweep every distinct score as a threshold ([`sweep`]).
//! 3. Search the F1-maximizing threshold ([`search_threshold`]).
//! 4. Pick the operating point: given labels, else the given threshold,
//!    else the searched one.
//! 5. Assemble metrics, curves and AUCs. Single-class ground truth flags
//!    the AUCs as undefined instead of failing.
//!
//! Evaluation is pure: no I/O, no randomness, no shared state. The same
//! input always produces a bit-identical report.

pub mod sweep;
pub mod threshold;

pub use sweep::{sweep, OperatingPoint, ThresholdSweep};
pub use threshold::{search_threshold, search_threshold_with, ThresholdChoice, TieBreak};

use mq_common::{
    ClassNames, ClassificationReport, ConfusionMatrix, InputError, LabelSource,
    PredictionRecord, ScalarMetrics, SCHEMA_VERSION,
};
use mq_math::is_unit_interval;
use tracing::debug;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Model report";

/// Knobs for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateOptions {
    pub decision_threshold: Option<f64>,
    pub class_names: ClassNames,
    pub title: String,
    pub tie_break: TieBreak,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            decision_threshold: None,
            class_names: ClassNames::default(),
            title: DEFAULT_TITLE.to_string(),
            tie_break: TieBreak::default(),
        }
    }
}

impl EvaluateOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.decision_threshold = Some(threshold);
        self
    }

    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Reusable evaluator holding the options for a series of evaluations.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvaluateOptions,
}

impl Evaluator {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Evaluate one prediction record.
    pub fn evaluate(&self, record: &PredictionRecord<'_>) -> Result<ClassificationReport, InputError> {
        record.validate()?;
        if let Some(t) = self.options.decision_threshold {
            if !is_unit_interval(t) {
                return Err(InputError::ThresholdOutOfDomain { value: t });
            }
        }

        let sweep = sweep::sweep(record.y_true, record.y_score);
        let best = search_threshold_with(&sweep, self.options.tie_break);

        let (confusion, decision_threshold, label_source) =
            match (record.y_pred, self.options.decision_threshold) {
                (Some(y_pred), threshold) => (
                    ConfusionMatrix::from_labels(record.y_true, y_pred),
                    threshold.unwrap_or(best.threshold),
                    LabelSource::GivenLabels,
                ),
                (None, Some(t)) => (sweep.confusion_at(t), t, LabelSource::DecisionThreshold),
                (None, None) => (best.confusion, best.threshold, LabelSource::MaxF1Search),
            };

        let degenerate = sweep.degenerate();
        debug!(
            target: "evaluate.finished",
            samples = sweep.sample_count(),
            positives = sweep.positives,
            operating_points = sweep.points.len(),
            label_source = %label_source,
            decision_threshold,
            f1_optimal_threshold = best.threshold,
            degenerate = degenerate.is_some(),
            "evaluation complete"
        );

        Ok(ClassificationReport {
            schema_version: SCHEMA_VERSION.to_string(),
            title: self.options.title.clone(),
            class_names: self.options.class_names.clone(),
            sample_count: sweep.sample_count(),
            positive_count: sweep.positives,
            negative_count: sweep.negatives,
            decision_threshold,
            label_source,
            threshold_supplied: self.options.decision_threshold.is_some(),
            f1_optimal_threshold: best.threshold,
            confusion_matrix: confusion,
            metrics: ScalarMetrics::from_confusion(&confusion),
            auc_roc: sweep.auc_roc(),
            auc_pr: sweep.auc_pr(),
            average_precision: sweep.average_precision(),
            roc_curve: sweep.roc_curve(),
            pr_curve: sweep.pr_curve(),
            degenerate,
        })
    }
}

/// One-shot evaluation.
///
/// - `y_pred` given: those labels are scored as-is.
/// - else `decision_threshold` given: `score >= threshold` is positive.
/// - else the F1-maximizing threshold is searched (ties go to the lower
///   threshold, see [`TieBreak`]).
pub fn evaluate(
    y_true: &[u8],
    y_score: &[f64],
    y_pred: Option<&[u8]>,
    decision_threshold: Option<f64>,
    class_names: ClassNames,
    title: &str,
) -> Result<ClassificationReport, InputError> {
    let mut options = EvaluateOptions::default()
        .with_class_names(class_names)
        .with_title(title);
    options.decision_threshold = decision_threshold;

    let record = PredictionRecord {
        y_true,
        y_score,
        y_pred,
    };
    Evaluator::new(options).evaluate(&record)
}
