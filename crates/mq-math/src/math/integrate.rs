//! Area under piecewise curves.

/// Trapezoidal area under a polyline given as `(x, y)` points.
///
/// Points are integrated in the order given. The absolute value of each
/// `dx` is used, so curves swept right-to-left integrate to the same
/// positive area as left-to-right. Fewer than two points give 0.0.
pub fn trapezoid(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            (x1 - x0).abs() * (y0 + y1) / 2.0
        })
        .sum()
}

/// Right-continuous step area: Σ (xₙ − xₙ₋₁) · yₙ.
///
/// This is the average-precision integral when points are `(recall,
/// precision)` in order of increasing recall.
pub fn step_area(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let (x0, _) = w[0];
            let (x1, y1) = w[1];
            (x1 - x0).abs() * y1
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_unit_square_diagonal() {
        let area = trapezoid(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!((area - 0.5).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_perfect_roc() {
        let area = trapezoid(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_degenerate_inputs() {
        assert_eq!(trapezoid(&[]), 0.0);
        assert_eq!(trapezoid(&[(0.3, 0.7)]), 0.0);
    }

    #[test]
    fn trapezoid_direction_independent() {
        let fwd = [(0.0, 0.2), (0.4, 0.6), (1.0, 0.9)];
        let mut rev = fwd;
        rev.reverse();
        assert!((trapezoid(&fwd) - trapezoid(&rev)).abs() < 1e-12);
    }

    #[test]
    fn step_area_uses_right_value() {
        // recall 0 -> 0.5 at precision 1.0, 0.5 -> 1.0 at precision 0.5
        let area = step_area(&[(0.0, 1.0), (0.5, 1.0), (1.0, 0.5)]);
        assert!((area - 0.75).abs() < 1e-12);
    }
}
