//! Plain-text performance report.
//!
//! ```text
//! Number of classes: 2
//! 0: stay
//! 1: churn
//!
//! F1-maximizing decision threshold: 0.35000
//!
//! ---------------------Performance--------------------
//!
//!               precision    recall  f1-score   support
//!
//!         stay       1.00      0.50      0.67         2
//!        churn       0.67      1.00      0.80         2
//!
//!     accuracy                           0.75         4
//!    macro avg       0.83      0.75      0.73         4
//! weighted avg       0.83      0.75      0.73         4
//!
//!  Total accuracy = 75.00%
//!  F1 score (using F1-maximizing threshold) = 80.00%
//! ```

use mq_common::{ClassificationReport, DegenerateReason, LabelSource};
use mq_math::{f_beta_counts, safe_ratio};
use std::fmt::Write;

/// Precision / recall / F1 / support for one class treated as positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassRow {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
}

impl ClassRow {
    fn new(hit: u64, false_alarm: u64, miss: u64) -> Self {
        Self {
            precision: safe_ratio(hit, hit + false_alarm),
            recall: safe_ratio(hit, hit + miss),
            f1: f_beta_counts(hit, false_alarm, miss, 1.0),
            support: hit + miss,
        }
    }
}

/// Per-class rows, class 0 first.
pub fn class_rows(report: &ClassificationReport) -> [ClassRow; 2] {
    let cm = &report.confusion_matrix;
    [
        ClassRow::new(cm.tn, cm.fn_, cm.fp),
        ClassRow::new(cm.tp, cm.fp, cm.fn_),
    ]
}

fn macro_average(rows: &[ClassRow; 2]) -> ClassRow {
    ClassRow {
        precision: (rows[0].precision + rows[1].precision) / 2.0,
        recall: (rows[0].recall + rows[1].recall) / 2.0,
        f1: (rows[0].f1 + rows[1].f1) / 2.0,
        support: rows[0].support + rows[1].support,
    }
}

fn weighted_average(rows: &[ClassRow; 2], total: u64) -> ClassRow {
    let weighted = |f: fn(&ClassRow) -> f64| {
        if total == 0 {
            return 0.0;
        }
        rows.iter().map(|r| f(r) * r.support as f64).sum::<f64>() / total as f64
    };
    ClassRow {
        precision: weighted(|r| r.precision),
        recall: weighted(|r| r.recall),
        f1: weighted(|r| r.f1),
        support: total,
    }
}

/// Threshold line as shown in the report header.
pub fn threshold_line(report: &ClassificationReport) -> String {
    let explicit = match report.label_source {
        LabelSource::DecisionThreshold => true,
        LabelSource::GivenLabels => report.threshold_supplied,
        LabelSource::MaxF1Search => false,
    };
    if explicit {
        format!("Decision threshold: {}", report.decision_threshold)
    } else {
        format!(
            "F1-maximizing decision threshold: {:.5}",
            report.f1_optimal_threshold
        )
    }
}

/// Per-class table with accuracy, macro and weighted average rows.
pub fn classification_table(report: &ClassificationReport) -> String {
    let prec = 2usize;
    let rows = class_rows(report);
    let names: Vec<&str> = report.class_names.iter().collect();
    let width = names
        .iter()
        .map(|n| n.chars().count())
        .chain(std::iter::once("weighted avg".len()))
        .max()
        .unwrap_or(12);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
        "", "precision", "recall", "f1-score", "support"
    );
    out.push('\n');
    for (name, row) in names.iter().zip(rows.iter()) {
        let _ = writeln!(
            out,
            "{:>width$}  {:>9.prec$} {:>9.prec$} {:>9.prec$} {:>9}",
            name, row.precision, row.recall, row.f1, row.support
        );
    }
    out.push('\n');

    let total = report.sample_count;
    let _ = writeln!(
        out,
        "{:>width$}  {:>9} {:>9} {:>9.prec$} {:>9}",
        "accuracy", "", "", report.metrics.accuracy, total
    );

    for (label, avg) in [
        ("macro avg", macro_average(&rows)),
        ("weighted avg", weighted_average(&rows, total)),
    ] {
        let _ = writeln!(
            out,
            "{:>width$}  {:>9.prec$} {:>9.prec$} {:>9.prec$} {:>9}",
            label, avg.precision, avg.recall, avg.f1, total
        );
    }
    out
}

/// Full text report.
pub fn render_text(report: &ClassificationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Number of classes: 2");
    for (i, name) in report.class_names.iter().enumerate() {
        let _ = writeln!(out, "{}: {}", i, name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", threshold_line(report));
    out.push_str("\n---------------------Performance--------------------\n\n");
    out.push_str(&classification_table(report));
    let _ = write!(
        out,
        "\n Total accuracy = {:.2}%",
        report.metrics.accuracy * 100.0
    );
    let _ = write!(
        out,
        "\n F1 score (using {}) = {:.2}%",
        report.label_source,
        report.metrics.f1 * 100.0
    );
    if let Some(reason) = report.degenerate {
        let _ = write!(
            out,
            "\n AUC undefined: ground truth has a single class ({})",
            reason
        );
        if reason == DegenerateReason::NoPositives
            && report.label_source == LabelSource::MaxF1Search
        {
            out.push_str(
                "\n Threshold not meaningful: F1 is 0 at every threshold, so the lowest \
                 was kept and every sample is predicted positive",
            );
        }
    }
    out.push('\n');
    out
}

/// Markdown summary used by `--format md`.
pub fn render_markdown(report: &ClassificationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", report.title);
    let _ = writeln!(out, "| metric | value |");
    let _ = writeln!(out, "|---|---|");
    let m = &report.metrics;
    for (name, value) in [
        ("accuracy", format!("{:.4}", m.accuracy)),
        ("precision", format!("{:.4}", m.precision)),
        ("recall", format!("{:.4}", m.recall)),
        ("f1", format!("{:.4}", m.f1)),
        ("auc_roc", report.auc_roc.to_string()),
        ("auc_pr", report.auc_pr.to_string()),
        ("decision_threshold", format!("{}", report.decision_threshold)),
    ] {
        let _ = writeln!(out, "| {} | {} |", name, value);
    }
    let _ = writeln!(out, "\n```text\n{}```", render_text(report));
    out
}
