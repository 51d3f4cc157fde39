//! Single-file HTML report.

use mq_common::ClassificationReport;
use tracing::info;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::plots::{confusion_matrix_svg, pr_curve_svg, roc_curve_svg};
use crate::svg::escape;

/// HTML report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the page: title heading, headline stats, then the four panels
    /// in a 2×2 grid (text, confusion matrix, PR curve, ROC curve).
    ///
    /// The report itself is embedded as JSON in
    /// `<script type="application/json" id="report-data">`.
    pub fn generate(&self, report: &ClassificationReport, text: &str) -> Result<String> {
        self.config.validate()?;
        let html = self.generate_html(report, text)?;

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            title = %report.title,
            minified = self.config.minify,
            "report generated"
        );
        Ok(output)
    }

    fn generate_html(&self, report: &ClassificationReport, text: &str) -> Result<String> {
        let title = escape(&report.title);
        let theme_class = self.config.theme.css_class();
        // `</` must not appear inside a script element.
        let data_json = serde_json::to_string(report)?.replace("</", "<\\/");

        let stats = self.generate_stats(report);
        let degenerate = match report.degenerate {
            Some(reason) => format!(
                r#"<p class="warning">Ground truth holds a single class ({}); AUC values are undefined.</p>"#,
                reason
            ),
            None => String::new(),
        };

        Ok(format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="mq-report {version}">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f9fafb;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --border-color: #e5e7eb;
            --accent-color: #1f77b4;
        }}
        .dark {{
            --bg-primary: #111827;
            --bg-secondary: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --border-color: #374151;
            --accent-color: #60a5fa;
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
            margin: 2rem;
        }}
        .stats {{
            display: flex;
            gap: 1rem;
            margin-bottom: 1.5rem;
        }}
        .stat-card {{
            background-color: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1rem;
            text-align: center;
            min-width: 8rem;
        }}
        .stat-value {{
            font-size: 1.75rem;
            font-weight: 700;
            color: var(--accent-color);
        }}
        .stat-label {{
            font-size: 0.875rem;
            color: var(--text-secondary);
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat(2, minmax(0, 1fr));
            gap: 1rem;
        }}
        .panel {{
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 0.5rem;
            overflow: auto;
        }}
        .panel pre {{
            margin: 0;
            font-size: 0.8rem;
        }}
        .warning {{
            color: #b45309;
        }}
        @media print {{
            body {{ font-size: 10pt; margin: 0; }}
        }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    {degenerate}
    <div class="stats">{stats}</div>
    <div class="grid">
        <div class="panel" id="panel-text"><pre>{text}</pre></div>
        <div class="panel" id="panel-confusion">{confusion}</div>
        <div class="panel" id="panel-pr">{pr}</div>
        <div class="panel" id="panel-roc">{roc}</div>
    </div>
    <script type="application/json" id="report-data">{data_json}</script>
</body>
</html>
"##,
            theme_class = theme_class,
            title = title,
            version = env!("CARGO_PKG_VERSION"),
            degenerate = degenerate,
            stats = stats,
            text = escape(text),
            confusion = confusion_matrix_svg(report, &self.config),
            pr = pr_curve_svg(report, &self.config),
            roc = roc_curve_svg(report, &self.config),
            data_json = data_json,
        ))
    }

    fn generate_stats(&self, report: &ClassificationReport) -> String {
        let cards = [
            ("Accuracy", format!("{:.3}", report.metrics.accuracy)),
            ("F1", format!("{:.3}", report.metrics.f1)),
            ("AUC-ROC", auc_text(report.auc_roc.value())),
            ("AUC-PR", auc_text(report.auc_pr.value())),
            ("Threshold", format!("{:.3}", report.decision_threshold)),
        ];
        cards
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<div class="stat-card"><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
                    value, label
                )
            })
            .collect()
    }
}

fn auc_text(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "n/a".to_string(),
    }
}
