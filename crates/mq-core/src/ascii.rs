//! Terminal plots of the ROC and precision-recall curves.

use mq_common::ClassificationReport;

/// Plot `(x, y)` points in the unit square.
///
/// Consecutive points are joined by straight segments so steep jumps stay
/// visible at low resolution. `diagonal` draws the chance line.
fn plot_unit_square(
    header: &str,
    points: &[(f64, f64)],
    diagonal: bool,
    x_label: &str,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(8);
    let height = height.max(4);

    let mut output = String::new();
    output.push_str(header);
    output.push('\n');
    output.push_str(&"─".repeat(width + 4));
    output.push('\n');

    let mut grid = vec![vec![' '; width]; height];
    let to_col = |x: f64| ((x.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize).min(width - 1);
    let to_row =
        |y: f64| height - 1 - ((y.clamp(0.0, 1.0) * (height - 1) as f64).round() as usize).min(height - 1);

    if diagonal {
        for col in 0..width {
            let x = col as f64 / (width - 1) as f64;
            grid[to_row(x)][col] = '·';
        }
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let steps = width.max(height);
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            grid[to_row(y)][to_col(x)] = '●';
        }
    }
    if let [(x, y)] = points {
        grid[to_row(*y)][to_col(*x)] = '●';
    }

    for (i, row) in grid.iter().enumerate() {
        let y_val = 1.0 - (i as f64 / (height - 1) as f64);
        output.push_str(&format!("{:.1}│", y_val));
        output.extend(row.iter());
        output.push('\n');
    }

    output.push_str("   └");
    output.push_str(&"─".repeat(width));
    output.push('\n');
    output.push_str("    0");
    output.push_str(&" ".repeat((width / 2).saturating_sub(2)));
    output.push_str("0.5");
    output.push_str(&" ".repeat((width / 2).saturating_sub(2)));
    output.push_str("1.0\n");
    output.push_str(&format!("{:>width$}\n", x_label, width = width / 2 + 4 + x_label.len() / 2));

    output
}

/// ASCII ROC curve with the chance diagonal.
pub fn ascii_roc(report: &ClassificationReport, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = report.roc_curve.iter().map(|p| (p.fpr, p.tpr)).collect();
    plot_unit_square(
        &format!("ROC curve (AUC={})", report.auc_roc),
        &points,
        true,
        "False Positive Rate",
        width,
        height,
    )
}

/// ASCII precision-recall curve.
pub fn ascii_pr(report: &ClassificationReport, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = report
        .pr_curve
        .iter()
        .map(|p| (p.recall, p.precision))
        .collect();
    plot_unit_square(
        &format!("Precision-Recall curve (AP={})", report.average_precision),
        &points,
        false,
        "Recall",
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::evaluate;
    use mq_common::ClassNames;

    fn report() -> ClassificationReport {
        evaluate(
            &[0, 0, 1, 1, 0, 1],
            &[0.1, 0.4, 0.35, 0.8, 0.2, 0.9],
            None,
            None,
            ClassNames::default(),
            "ascii",
        )
        .unwrap()
    }

    #[test]
    fn roc_has_header_and_axes() {
        let plot = ascii_roc(&report(), 30, 8);
        assert!(plot.starts_with("ROC curve (AUC="));
        assert!(plot.contains("False Positive Rate"));
        assert!(plot.contains("1.0│"));
        assert!(plot.contains("0.0│"));
        assert!(plot.contains('●'));
        assert!(plot.contains('·'));
    }

    #[test]
    fn pr_has_no_diagonal() {
        let plot = ascii_pr(&report(), 30, 8);
        assert!(plot.starts_with("Precision-Recall curve (AP="));
        assert!(plot.contains("Recall"));
        assert!(!plot.contains('·'));
    }

    #[test]
    fn grid_has_requested_height() {
        let plot = ascii_roc(&report(), 20, 6);
        let rows = plot.lines().filter(|l| l.contains('│')).count();
        assert_eq!(rows, 6);
    }

    #[test]
    fn tiny_dimensions_are_clamped() {
        let plot = ascii_roc(&report(), 1, 1);
        let rows = plot.lines().filter(|l| l.contains('│')).count();
        assert_eq!(rows, 4);
    }

    #[test]
    fn undefined_auc_in_header() {
        let r = evaluate(&[0, 0], &[0.2, 0.4], None, None, ClassNames::default(), "x").unwrap();
        assert!(ascii_roc(&r, 20, 6).contains("undefined (no_positives)"));
    }
}
