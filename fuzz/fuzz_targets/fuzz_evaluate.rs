//! Fuzz target for the evaluator.
//!
//! Any input either fails validation with a typed error or yields a report
//! whose counts add up.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mq_common::ClassNames;

#[derive(Debug, Arbitrary)]
struct Case {
    y_true: Vec<u8>,
    y_score: Vec<f64>,
    y_pred: Option<Vec<u8>>,
    threshold: Option<f64>,
}

fuzz_target!(|case: Case| {
    let result = mq_core::evaluate(
        &case.y_true,
        &case.y_score,
        case.y_pred.as_deref(),
        case.threshold,
        ClassNames::default(),
        "fuzz",
    );
    if let Ok(report) = result {
        let n = case.y_true.len() as u64;
        assert_eq!(report.confusion_matrix.total(), n);
        assert_eq!(report.positive_count + report.negative_count, n);
        assert!((0.0..=1.0).contains(&report.metrics.f1));
        assert!((0.0..=1.0).contains(&report.decision_threshold));
    }
});
