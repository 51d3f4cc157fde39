//! The four report panels as standalone SVG documents.

use mq_common::{Auc, ClassificationReport};
use tracing::debug;

use crate::config::{hex_color, ReportConfig};
use crate::svg::{escape, path_data, unit_axes, Frame, SvgDoc};

/// Row-normalized share above which cell text switches to white.
const WHITE_TEXT_ABOVE: f64 = 0.5;

fn auc_title(prefix: &str, label: &str, auc: &Auc) -> String {
    match auc.value() {
        Some(v) => format!("{prefix}: {label}={v:.2}"),
        None => format!("{prefix}: {label} undefined"),
    }
}

/// ROC curve, filled underneath, with the chance diagonal dashed.
pub fn roc_curve_svg(report: &ClassificationReport, config: &ReportConfig) -> String {
    let palette = config.palette();
    let frame = Frame::for_plot(config.width, config.height);
    let mut doc = SvgDoc::new(config.width, config.height, &palette);

    unit_axes(&mut doc, &frame, &palette, "False Positive Rate", "True Positive Rate");

    let points: Vec<(f64, f64)> = report
        .roc_curve
        .iter()
        .map(|p| (frame.x(p.fpr), frame.y(p.tpr)))
        .collect();
    push_filled_curve(&mut doc, &frame, &points, hex_color(palette.accent));

    doc.line(
        (frame.x(0.0), frame.y(0.0)),
        (frame.x(1.0), frame.y(1.0)),
        palette.diagonal,
        r#" stroke-dasharray="6 4""#,
    );

    let title = auc_title("ROC curve", "AUC", &report.auc_roc);
    doc.text(config.width as f64 / 2.0, 22.0, "middle", 14, palette.foreground, &title);
    debug!(points = points.len(), "rendered ROC curve");
    doc.finish()
}

/// Precision-recall curve drawn as a step function, filled underneath.
///
/// Each recall interval takes the precision at its right end, so the filled
/// area equals the average precision shown in the title.
pub fn pr_curve_svg(report: &ClassificationReport, config: &ReportConfig) -> String {
    let palette = config.palette();
    let frame = Frame::for_plot(config.width, config.height);
    let mut doc = SvgDoc::new(config.width, config.height, &palette);

    unit_axes(&mut doc, &frame, &palette, "Recall", "Precision");

    let mut points = Vec::with_capacity(report.pr_curve.len() * 2);
    let mut prev: Option<(f64, f64)> = None;
    for p in &report.pr_curve {
        if let Some((px, _)) = prev {
            points.push((frame.x(px), frame.y(p.precision)));
        }
        points.push((frame.x(p.recall), frame.y(p.precision)));
        prev = Some((p.recall, p.precision));
    }
    push_filled_curve(&mut doc, &frame, &points, hex_color(palette.accent));

    let title = auc_title("Precision-Recall curve", "AP", &report.average_precision);
    doc.text(config.width as f64 / 2.0, 22.0, "middle", 14, palette.foreground, &title);
    debug!(points = points.len(), "rendered PR curve");
    doc.finish()
}

fn push_filled_curve(doc: &mut SvgDoc, frame: &Frame, points: &[(f64, f64)], color: String) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    let mut area = points.to_vec();
    area.push((last.0, frame.bottom()));
    area.push((first.0, frame.bottom()));
    doc.push(&format!(
        r#"<path d="{} Z" fill="{}" fill-opacity="0.2" stroke="none"/>"#,
        path_data(&area),
        color
    ));
    doc.push(&format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        path_data(points),
        color
    ));
}

/// 2×2 confusion matrix with counts and row-normalized percentages.
///
/// Rows are the actual class, columns the predicted class. Cell color
/// follows the row-normalized share.
pub fn confusion_matrix_svg(report: &ClassificationReport, config: &ReportConfig) -> String {
    let palette = config.palette();
    let frame = Frame::for_plot(config.width, config.height);
    let mut doc = SvgDoc::new(config.width, config.height, &palette);

    let cm = &report.confusion_matrix;
    let counts = cm.as_rows();
    let shares = cm.row_normalized();
    let names = &report.class_names;

    let side = frame.width.min(frame.height);
    let cell = side / 2.0;
    let left = frame.left + (frame.width - side) / 2.0;
    let top = frame.top;

    for (row, (count_row, share_row)) in counts.iter().zip(shares.iter()).enumerate() {
        for (col, (&count, &share)) in count_row.iter().zip(share_row.iter()).enumerate() {
            let x = left + col as f64 * cell;
            let y = top + row as f64 * cell;
            doc.push(&format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}"/>"#,
                x,
                y,
                cell,
                cell,
                hex_color(palette.cell(share)),
                hex_color(palette.background)
            ));
            let fill = if share > WHITE_TEXT_ABOVE {
                [0xff, 0xff, 0xff]
            } else {
                palette.foreground
            };
            let cx = x + cell / 2.0;
            let cy = y + cell / 2.0;
            doc.push(&format!(
                r#"<text x="{cx:.2}" y="{cy:.2}" text-anchor="middle" fill="{fill}"><tspan x="{cx:.2}" font-size="16" font-weight="bold">{count}</tspan><tspan x="{cx:.2}" dy="1.3em" font-size="12">{pct:.1}%</tspan></text>"#,
                cx = cx,
                cy = cy,
                fill = hex_color(fill),
                count = count,
                pct = share * 100.0,
            ));
        }
    }

    for (i, name) in names.iter().enumerate() {
        let center = i as f64 * cell + cell / 2.0;
        doc.text(left + center, top + side + 14.0, "middle", 11, palette.foreground, name);
        doc.text(left - 6.0, top + center + 4.0, "end", 11, palette.foreground, name);
    }

    doc.text(
        left + side / 2.0,
        top + side + 34.0,
        "middle",
        12,
        palette.foreground,
        "Predicted label",
    );
    let cy = top + side / 2.0;
    doc.push(&format!(
        r#"<text x="14" y="{:.2}" text-anchor="middle" font-size="12" fill="{}" transform="rotate(-90 14 {:.2})">True label</text>"#,
        cy,
        hex_color(palette.foreground),
        cy
    ));

    doc.text(config.width as f64 / 2.0, 22.0, "middle", 14, palette.foreground, "Confusion matrix");
    doc.finish()
}

/// The text performance report as a monospace panel.
///
/// The panel grows taller than the configured height when the text needs it.
pub fn text_panel_svg(text: &str, config: &ReportConfig) -> String {
    const LINE_HEIGHT: u32 = 16;
    const PADDING: u32 = 16;

    let palette = config.palette();
    let lines: Vec<&str> = text.lines().collect();
    let needed = PADDING * 2 + LINE_HEIGHT * lines.len() as u32;
    let height = config.height.max(needed);
    let mut doc = SvgDoc::new(config.width, height, &palette);

    let mut body = format!(
        r#"<text font-family="ui-monospace, SFMono-Regular, Menlo, monospace" font-size="12" fill="{}" xml:space="preserve">"#,
        hex_color(palette.foreground)
    );
    for (i, line) in lines.iter().enumerate() {
        let y = PADDING + LINE_HEIGHT * (i as u32 + 1) - 4;
        body.push_str(&format!(
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            PADDING,
            y,
            escape(line)
        ));
    }
    body.push_str("</text>");
    doc.push(&body);
    doc.finish()
}
