//! Batch evaluation and ranking of several candidate models.
//!
//! Candidates are evaluated on scoped threads with no shared mutable state;
//! results always come back in input order, so thread scheduling never
//! changes the output.

use std::thread;

use clap::ValueEnum;
use mq_common::{ClassificationReport, InputError, PredictionSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::evaluate::{EvaluateOptions, Evaluator};

/// One named set of predictions to evaluate.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub predictions: PredictionSet,
}

impl Candidate {
    pub fn new(name: impl Into<String>, predictions: PredictionSet) -> Self {
        Self {
            name: name.into(),
            predictions,
        }
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("evaluation thread panicked")]
    Panicked,
}

impl From<BatchError> for mq_common::Error {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Input(input) => mq_common::Error::Input(input),
            BatchError::Panicked => mq_common::Error::Internal(err.to_string()),
        }
    }
}

/// Evaluate every candidate with the same options.
///
/// Each report's title is the candidate name. At most `max_parallel`
/// evaluations run at once (0 means one per available core).
pub fn evaluate_batch(
    candidates: &[Candidate],
    options: &EvaluateOptions,
    max_parallel: usize,
) -> Vec<Result<ClassificationReport, BatchError>> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let max_parallel = if max_parallel == 0 {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        max_parallel
    };
    info!(target: "compare.batch", count = candidates.len(), max_parallel, "evaluating candidates");

    let run = |candidate: &Candidate| -> Result<ClassificationReport, BatchError> {
        let evaluator = Evaluator::new(options.clone().with_title(candidate.name.clone()));
        Ok(evaluator.evaluate(&candidate.predictions.as_record())?)
    };

    candidates
        .chunks(max_parallel)
        .flat_map(|chunk| {
            thread::scope(|s| {
                let handles: Vec<_> = chunk.iter().map(|c| s.spawn(|| run(c))).collect();
                handles
                    .into_iter()
                    .map(|h| {
                        h.join().unwrap_or_else(|_| {
                            error!("evaluation thread panicked");
                            Err(BatchError::Panicked)
                        })
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect()
}

/// Metric used to rank reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[default]
    F1,
    Accuracy,
    Precision,
    Recall,
    #[value(name = "auc_roc")]
    AucRoc,
    #[value(name = "auc_pr")]
    AucPr,
}

impl RankMetric {
    /// Metric value, or `None` when the report leaves it undefined.
    pub fn value(&self, report: &ClassificationReport) -> Option<f64> {
        match self {
            RankMetric::F1 => Some(report.metrics.f1),
            RankMetric::Accuracy => Some(report.metrics.accuracy),
            RankMetric::Precision => Some(report.metrics.precision),
            RankMetric::Recall => Some(report.metrics.recall),
            RankMetric::AucRoc => report.auc_roc.value(),
            RankMetric::AucPr => report.auc_pr.value(),
        }
    }
}

impl std::fmt::Display for RankMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RankMetric::F1 => "f1",
            RankMetric::Accuracy => "accuracy",
            RankMetric::Precision => "precision",
            RankMetric::Recall => "recall",
            RankMetric::AucRoc => "auc_roc",
            RankMetric::AucPr => "auc_pr",
        };
        write!(f, "{}", s)
    }
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub title: String,
    pub metric: RankMetric,
    /// `None` when the metric is undefined for this report.
    pub value: Option<f64>,
    /// Position of the report in the input.
    pub index: usize,
    pub degenerate: bool,
}

/// Rank reports by `metric`, best first.
///
/// Undefined values rank last. Equal values keep input order.
pub fn rank(reports: &[ClassificationReport], metric: RankMetric) -> Vec<RankedEntry> {
    let mut order: Vec<(usize, Option<f64>)> = reports
        .iter()
        .enumerate()
        .map(|(i, r)| (i, metric.value(r)))
        .collect();

    order.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let ranked: Vec<RankedEntry> = order
        .into_iter()
        .enumerate()
        .map(|(pos, (index, value))| RankedEntry {
            rank: pos + 1,
            title: reports[index].title.clone(),
            metric,
            value,
            index,
            degenerate: reports[index].is_degenerate(),
        })
        .collect();

    info!(target: "compare.ranked", count = ranked.len(), %metric, "reports ranked");
    ranked
}

/// Plain-text ranking table.
pub fn render_ranking(entries: &[RankedEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let metric = entries.first().map(|e| e.metric.to_string()).unwrap_or_default();

    let mut out = format!("{:>4}  {:<width$}  {:>10}\n", "rank", "model", metric, width = width);
    for e in entries {
        let value = match e.value {
            Some(v) => format!("{:.4}", v),
            None => "undefined".to_string(),
        };
        out.push_str(&format!(
            "{:>4}  {:<width$}  {:>10}\n",
            e.rank,
            e.title,
            value,
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(y_true: &[u8], y_score: &[f64]) -> PredictionSet {
        PredictionSet {
            y_true: y_true.to_vec(),
            y_score: y_score.to_vec(),
            y_pred: None,
        }
    }

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("weak", set(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8])),
            Candidate::new("perfect", set(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9])),
            Candidate::new("single-class", set(&[0, 0, 0], &[0.1, 0.2, 0.3])),
            Candidate::new("broken", set(&[0, 1], &[0.1])),
        ]
    }

    #[test]
    fn batch_keeps_input_order() {
        let results = evaluate_batch(&candidates(), &EvaluateOptions::default(), 2);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().title, "weak");
        assert_eq!(results[1].as_ref().unwrap().title, "perfect");
        assert!(results[2].as_ref().unwrap().is_degenerate());
        assert!(matches!(results[3], Err(BatchError::Input(InputError::LengthMismatch { .. }))));
    }

    #[test]
    fn panicked_worker_is_internal_error() {
        let err = mq_common::Error::from(BatchError::Panicked);
        assert!(matches!(err, mq_common::Error::Internal(_)));
        assert_eq!(err.headline(), "Internal Error");
        assert_eq!(err.category(), mq_common::ErrorCategory::Internal);

        let err = mq_common::Error::from(BatchError::Input(InputError::Empty));
        assert!(matches!(err, mq_common::Error::Input(InputError::Empty)));
    }

    #[test]
    fn batch_matches_sequential_evaluation() {
        let cands = candidates();
        let options = EvaluateOptions::default();
        let parallel = evaluate_batch(&cands, &options, 0);
        let serial = evaluate_batch(&cands, &options, 1);
        for (p, s) in parallel.iter().zip(serial.iter()) {
            match (p, s) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => panic!("parallel and serial results differ"),
            }
        }
    }

    #[test]
    fn empty_batch() {
        assert!(evaluate_batch(&[], &EvaluateOptions::default(), 4).is_empty());
    }

    #[test]
    fn rank_by_auc_puts_undefined_last() {
        let reports: Vec<_> = evaluate_batch(&candidates()[..3], &EvaluateOptions::default(), 0)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        let ranked = rank(&reports, RankMetric::AucRoc);
        let titles: Vec<_> = ranked.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["perfect", "weak", "single-class"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].value, Some(1.0));
        assert_eq!(ranked[2].value, None);
        assert!(ranked[2].degenerate);
    }

    #[test]
    fn rank_ties_keep_input_order() {
        let reports: Vec<_> = evaluate_batch(
            &[
                Candidate::new("a", set(&[0, 1], &[0.2, 0.9])),
                Candidate::new("b", set(&[0, 1], &[0.1, 0.7])),
            ],
            &EvaluateOptions::default(),
            0,
        )
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
        let ranked = rank(&reports, RankMetric::F1);
        assert_eq!(ranked[0].title, "a");
        assert_eq!(ranked[1].title, "b");
        assert_eq!(ranked[0].value, ranked[1].value);
    }

    #[test]
    fn ranking_table_lists_every_entry() {
        let reports: Vec<_> = evaluate_batch(&candidates()[..3], &EvaluateOptions::default(), 0)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        let table = render_ranking(&rank(&reports, RankMetric::AucPr));
        assert!(table.starts_with("rank"));
        assert!(table.contains("auc_pr"));
        assert!(table.contains("undefined"));
        assert_eq!(table.lines().count(), 4);
    }
}
