//! Property-based tests for evaluator invariants.

use mq_common::{ClassNames, ClassificationReport};
use mq_core::evaluate::sweep;
use mq_core::evaluate;
use proptest::prelude::*;

/// Labels and scores of equal length. Scores sit on a coarse grid so ties
/// are common.
fn predictions() -> impl Strategy<Value = (Vec<u8>, Vec<f64>)> {
    (1usize..120).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..=1, n),
            prop::collection::vec((0u32..=20).prop_map(|k| k as f64 / 20.0), n),
        )
    })
}

fn grid_threshold() -> impl Strategy<Value = f64> {
    (0u32..=40).prop_map(|k| k as f64 / 40.0)
}

fn run(y_true: &[u8], y_score: &[f64], threshold: Option<f64>) -> ClassificationReport {
    evaluate(y_true, y_score, None, threshold, ClassNames::default(), "prop").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn confusion_counts_sum_to_n((y_true, y_score) in predictions(), t in grid_threshold()) {
        let n = y_true.len() as u64;
        for threshold in [None, Some(t)] {
            let report = run(&y_true, &y_score, threshold);
            prop_assert_eq!(report.confusion_matrix.total(), n);
            prop_assert_eq!(report.sample_count, n);
            prop_assert_eq!(report.positive_count + report.negative_count, n);
        }
    }

    #[test]
    fn accuracy_matches_direct_count((y_true, y_score) in predictions(), t in grid_threshold()) {
        let report = run(&y_true, &y_score, Some(t));
        let correct = y_true
            .iter()
            .zip(&y_score)
            .filter(|&(&y, &s)| u8::from(s >= t) == y)
            .count();
        let expected = correct as f64 / y_true.len() as f64;
        prop_assert!((report.metrics.accuracy - expected).abs() < 1e-12);
    }

    #[test]
    fn sweep_counts_monotone((y_true, y_score) in predictions()) {
        let s = sweep(&y_true, &y_score);
        for pair in s.points.windows(2) {
            prop_assert!(pair[0].threshold > pair[1].threshold);
            prop_assert!(pair[0].tp <= pair[1].tp);
            prop_assert!(pair[0].fp <= pair[1].fp);
        }
        let last = s.points.last().unwrap();
        prop_assert_eq!(last.tp, s.positives);
        prop_assert_eq!(last.fp, s.negatives);
    }

    #[test]
    fn roc_rates_monotone((y_true, y_score) in predictions()) {
        let report = run(&y_true, &y_score, None);
        for pair in report.roc_curve.windows(2) {
            prop_assert!(pair[0].fpr <= pair[1].fpr);
            prop_assert!(pair[0].tpr <= pair[1].tpr);
        }
    }

    #[test]
    fn aucs_bounded_or_flagged((y_true, y_score) in predictions()) {
        let report = run(&y_true, &y_score, None);
        let single_class = y_true.iter().all(|&y| y == y_true[0]);
        prop_assert_eq!(report.is_degenerate(), single_class);
        for auc in [report.auc_roc, report.auc_pr, report.average_precision] {
            match auc.value() {
                Some(v) => prop_assert!((0.0..=1.0 + 1e-12).contains(&v), "auc {}", v),
                None => prop_assert!(single_class),
            }
        }
    }

    #[test]
    fn search_is_never_worse_than_a_fixed_cutoff(
        (y_true, y_score) in predictions(),
        t in grid_threshold(),
    ) {
        let searched = run(&y_true, &y_score, None);
        let fixed = run(&y_true, &y_score, Some(t));
        prop_assert!(searched.metrics.f1 + 1e-12 >= fixed.metrics.f1);
        prop_assert_eq!(searched.f1_optimal_threshold, fixed.f1_optimal_threshold);
    }

    #[test]
    fn evaluation_is_idempotent((y_true, y_score) in predictions()) {
        let a = run(&y_true, &y_score, None);
        let b = run(&y_true, &y_score, None);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn given_labels_match_threshold_labels((y_true, y_score) in predictions(), t in grid_threshold()) {
        let y_pred: Vec<u8> = y_score.iter().map(|&s| u8::from(s >= t)).collect();
        let from_labels = evaluate(
            &y_true,
            &y_score,
            Some(y_pred.as_slice()),
            Some(t),
            ClassNames::default(),
            "prop",
        )
        .unwrap();
        let from_threshold = run(&y_true, &y_score, Some(t));
        prop_assert_eq!(from_labels.confusion_matrix, from_threshold.confusion_matrix);
        prop_assert_eq!(from_labels.metrics, from_threshold.metrics);
    }
}
