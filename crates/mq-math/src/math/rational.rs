//! Exact comparison of count ratios.
//!
//! Threshold search compares F1 scores across operating points; comparing
//! them as `f64` can split genuine ties by one ulp. A `Fraction` keeps the
//! integer numerator and denominator and orders by cross-multiplication.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Non-negative rational `num / den`. A zero denominator reads as zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fraction {
    pub num: u64,
    pub den: u64,
}

impl Fraction {
    pub fn new(num: u64, den: u64) -> Self {
        if den == 0 {
            return Fraction { num: 0, den: 1 };
        }
        Fraction { num, den }
    }

    /// F1 = 2·tp / (2·tp + fp + fn) as an exact fraction.
    pub fn f1(tp: u64, fp: u64, fn_: u64) -> Self {
        Fraction::new(2 * tp, 2 * tp + fp + fn_)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as u128 * other.den as u128;
        let rhs = other.num as u128 * self.den as u128;
        lhs.cmp(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_different_terms() {
        assert_eq!(Fraction::new(2, 3), Fraction::new(4, 6));
        assert_eq!(Fraction::f1(1, 0, 1), Fraction::f1(2, 2, 0));
    }

    #[test]
    fn ordering() {
        assert!(Fraction::new(4, 5) > Fraction::new(2, 3));
        assert!(Fraction::new(0, 7) < Fraction::new(1, 1_000_000));
    }

    #[test]
    fn zero_denominator_is_zero() {
        let z = Fraction::new(5, 0);
        assert_eq!(z, Fraction::new(0, 1));
        assert_eq!(z.to_f64(), 0.0);
        assert_eq!(Fraction::f1(0, 0, 0).to_f64(), 0.0);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        let a = Fraction::new(u64::MAX - 1, u64::MAX);
        let b = Fraction::new(u64::MAX - 2, u64::MAX);
        assert!(a > b);
    }
}
