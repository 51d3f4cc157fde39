//! Guarded ratios and score formulas for count-based metrics.
//!
//! Classification metrics are ratios of small integer counts. Any of them can
//! hit a zero denominator on legitimate input (no predicted positives, no
//! actual negatives, ...). These helpers make the zero-denominator result an
//! explicit choice of the caller instead of an accidental NaN.

/// `num / den`, or `fallback` when `den` is zero.
pub fn ratio_or(num: u64, den: u64, fallback: f64) -> f64 {
    if den == 0 {
        return fallback;
    }
    num as f64 / den as f64
}

/// `num / den`, or 0.0 when `den` is zero.
///
/// Matches the usual `zero_division = 0` convention for precision/recall.
pub fn safe_ratio(num: u64, den: u64) -> f64 {
    ratio_or(num, den, 0.0)
}

/// `num / den`, or `None` when `den` is zero.
pub fn checked_ratio(num: u64, den: u64) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

/// F-beta score from precision and recall.
///
/// Returns 0.0 when both inputs are zero (or the weighted denominator is).
pub fn f_beta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta_sq = beta * beta;
    let denom = beta_sq * precision + recall;
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (1.0 + beta_sq) * precision * recall / denom
}

/// F-beta score straight from confusion counts.
///
/// Equivalent to `f_beta(precision, recall, beta)` but avoids the two
/// intermediate divisions, so equal counts always give bit-equal scores.
pub fn f_beta_counts(tp: u64, fp: u64, fn_: u64, beta: f64) -> f64 {
    let beta_sq = beta * beta;
    let num = (1.0 + beta_sq) * tp as f64;
    let den = num + beta_sq * fn_ as f64 + fp as f64;
    if den == 0.0 {
        return 0.0;
    }
    num / den
}

/// Matthews correlation coefficient from confusion counts.
///
/// Returns 0.0 when any marginal is empty.
pub fn matthews(tp: u64, tn: u64, fp: u64, fn_: u64) -> f64 {
    let tp = tp as f64;
    let tn = tn as f64;
    let fp = fp as f64;
    let fn_ = fn_ as f64;

    let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    (tp * tn - fp * fn_) / denominator
}

/// True when `x` is a finite value inside the closed unit interval.
pub fn is_unit_interval(x: f64) -> bool {
    x.is_finite() && (0.0..=1.0).contains(&x)
}
