//! Hand-built reports for rendering tests.

use mq_common::{
    Auc, ClassNames, ClassificationReport, ConfusionMatrix, DegenerateReason, LabelSource,
    PrPoint, RocPoint, ScalarMetrics, SCHEMA_VERSION,
};

fn roc(threshold: Option<f64>, fpr: f64, tpr: f64) -> RocPoint {
    RocPoint { threshold, fpr, tpr }
}

fn pr(threshold: Option<f64>, recall: f64, precision: f64) -> PrPoint {
    PrPoint {
        threshold,
        recall,
        precision,
    }
}

/// y_true = [0, 0, 1, 1], y_score = [0.1, 0.4, 0.35, 0.8] at threshold 0.35.
pub(crate) fn report() -> ClassificationReport {
    let cm = ConfusionMatrix::from_labels(&[0, 0, 1, 1], &[0, 1, 1, 1]);
    ClassificationReport {
        schema_version: SCHEMA_VERSION.to_string(),
        title: "Churn <model>".to_string(),
        class_names: ClassNames::new("stay", "churn"),
        sample_count: 4,
        positive_count: 2,
        negative_count: 2,
        decision_threshold: 0.35,
        label_source: LabelSource::MaxF1Search,
        threshold_supplied: false,
        f1_optimal_threshold: 0.35,
        confusion_matrix: cm,
        metrics: ScalarMetrics::from_confusion(&cm),
        auc_roc: Auc::Defined { value: 0.75 },
        auc_pr: Auc::Defined { value: 0.791_666_666_666_666_6 },
        average_precision: Auc::Defined { value: 0.833_333_333_333_333_4 },
        roc_curve: vec![
            roc(None, 0.0, 0.0),
            roc(Some(0.8), 0.0, 0.5),
            roc(Some(0.4), 0.5, 0.5),
            roc(Some(0.35), 0.5, 1.0),
            roc(Some(0.1), 1.0, 1.0),
        ],
        pr_curve: vec![
            pr(None, 0.0, 1.0),
            pr(Some(0.8), 0.5, 1.0),
            pr(Some(0.4), 0.5, 0.5),
            pr(Some(0.35), 1.0, 2.0 / 3.0),
            pr(Some(0.1), 1.0, 0.5),
        ],
        degenerate: None,
    }
}

/// Three negatives, no positives.
pub(crate) fn degenerate_report() -> ClassificationReport {
    let cm = ConfusionMatrix::from_labels(&[0, 0, 0], &[1, 1, 1]);
    let undefined = Auc::Undefined {
        reason: DegenerateReason::NoPositives,
    };
    ClassificationReport {
        schema_version: SCHEMA_VERSION.to_string(),
        title: "Empty positives".to_string(),
        class_names: ClassNames::default(),
        sample_count: 3,
        positive_count: 0,
        negative_count: 3,
        decision_threshold: 0.0,
        label_source: LabelSource::MaxF1Search,
        threshold_supplied: false,
        f1_optimal_threshold: 0.0,
        confusion_matrix: cm,
        metrics: ScalarMetrics::from_confusion(&cm),
        auc_roc: undefined,
        auc_pr: undefined,
        average_precision: undefined,
        roc_curve: vec![roc(None, 0.0, 0.0), roc(Some(0.2), 1.0, 0.0)],
        pr_curve: vec![pr(None, 0.0, 1.0), pr(Some(0.2), 0.0, 0.0)],
        degenerate: Some(DegenerateReason::NoPositives),
    }
}
