//! F1-maximizing threshold search.

use super::sweep::ThresholdSweep;
use mq_common::ConfusionMatrix;
use mq_math::Fraction;
use serde::{Deserialize, Serialize};

/// Which threshold wins when several reach the same maximal F1.
///
/// The default is [`TieBreak::PreferLower`]: among equally good
/// thresholds the most inclusive one is chosen, so more positives are
/// flagged. When the task is finding likely positive responders, coverage
/// outweighs precision at equal F1.
///
/// With no positive ground truth every threshold has F1 = 0, so
/// `PreferLower` lands on 0.0 and predicts every sample positive. That
/// point is an artifact of the tie, not a chosen operating point; the text
/// report says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    PreferLower,
    PreferHigher,
}

/// Result of a threshold search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdChoice {
    pub threshold: f64,
    pub confusion: ConfusionMatrix,
    pub f1: f64,
    /// Number of candidate thresholds that reached the maximal F1.
    pub tied: usize,
}

/// Search with the default [`TieBreak::PreferLower`] policy.
pub fn search_threshold(sweep: &ThresholdSweep) -> ThresholdChoice {
    search_threshold_with(sweep, TieBreak::default())
}

/// Exhaustive argmax-F1 over every distinct score plus the boundaries 0 and 1.
///
/// F1 is compared as an exact fraction of counts, so two thresholds tie
/// exactly when their F1 is the same rational number.
pub fn search_threshold_with(sweep: &ThresholdSweep, tie_break: TieBreak) -> ThresholdChoice {
    let mut best: Option<(Fraction, f64, ConfusionMatrix)> = None;
    let mut tied = 0usize;

    for (threshold, cm) in candidates(sweep) {
        let f1 = cm.f1_exact();
        match best {
            Some((best_f1, _, _)) if f1 < best_f1 => {}
            Some((best_f1, _, _)) if f1 == best_f1 => {
                tied += 1;
                // Candidates arrive strictest first.
                if tie_break == TieBreak::PreferLower {
                    best = Some((f1, threshold, cm));
                }
            }
            _ => {
                best = Some((f1, threshold, cm));
                tied = 1;
            }
        }
    }

    // The candidate list always holds the boundaries, so `best` is set.
    let (_, threshold, confusion) = best.unwrap_or((
        Fraction::new(0, 1),
        0.0,
        sweep.confusion_at(0.0),
    ));
    ThresholdChoice {
        threshold,
        confusion,
        f1: confusion.f1(),
        tied,
    }
}

/// Candidate thresholds with their confusion counts, strictest first.
fn candidates(sweep: &ThresholdSweep) -> Vec<(f64, ConfusionMatrix)> {
    let mut out = Vec::with_capacity(sweep.points.len() + 2);
    if sweep.points.first().map_or(true, |p| p.threshold < 1.0) {
        out.push((1.0, sweep.confusion_at(1.0)));
    }
    out.extend(
        sweep
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.threshold, sweep.confusion(i))),
    );
    if sweep.points.last().map_or(true, |p| p.threshold > 0.0) {
        out.push((0.0, sweep.confusion_at(0.0)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::sweep::sweep;

    #[test]
    fn finds_best_f1() {
        let s = sweep(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8]);
        let choice = search_threshold(&s);
        assert_eq!(choice.threshold, 0.35);
        assert_eq!(
            choice.confusion,
            ConfusionMatrix {
                tn: 1,
                fp: 1,
                fn_: 0,
                tp: 2
            }
        );
        assert!((choice.f1 - 0.8).abs() < 1e-12);
        assert_eq!(choice.tied, 1);
    }

    #[test]
    fn perfect_separation_found() {
        let s = sweep(&[0, 0, 1, 1], &[0.1, 0.3, 0.35, 0.8]);
        let choice = search_threshold(&s);
        assert_eq!(choice.threshold, 0.35);
        assert_eq!(choice.f1, 1.0);
    }

    #[test]
    fn ties_prefer_lower_threshold() {
        // F1 = 2/3 both at 0.9 (tp1 fp0 fn1) and at 0.2 (tp2 fp2 fn0).
        let s = sweep(&[1, 0, 0, 1, 0], &[0.9, 0.6, 0.5, 0.2, 0.1]);
        let choice = search_threshold(&s);
        assert_eq!(choice.threshold, 0.2);
        assert_eq!(choice.tied, 2);

        let higher = search_threshold_with(&s, TieBreak::PreferHigher);
        assert_eq!(higher.threshold, 0.9);
        assert_eq!(higher.f1, choice.f1);
    }

    #[test]
    fn lower_boundary_wins_tie_with_minimum_score() {
        // Every label positive: all thresholds at or below the minimum score
        // give F1 = 1, and the boundary 0.0 is the lowest of them.
        let s = sweep(&[1, 1], &[0.4, 0.7]);
        let choice = search_threshold(&s);
        assert_eq!(choice.threshold, 0.0);
        assert_eq!(choice.f1, 1.0);
        assert_eq!(choice.tied, 2);
    }

    #[test]
    fn boundaries_not_duplicated() {
        let s = sweep(&[0, 1], &[0.0, 1.0]);
        let c = candidates(&s);
        let thresholds: Vec<f64> = c.iter().map(|(t, _)| *t).collect();
        assert_eq!(thresholds, vec![1.0, 0.0]);
    }

    #[test]
    fn upper_boundary_predicts_nothing() {
        let s = sweep(&[0, 1], &[0.2, 0.6]);
        let c = candidates(&s);
        assert_eq!(c[0].0, 1.0);
        assert_eq!(c[0].1.predicted_positives(), 0);
        assert_eq!(c.last().map(|(t, _)| *t), Some(0.0));
    }
}
