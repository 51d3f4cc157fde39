//! Headless rendering of classification reports.
//!
//! Produces the four panels of the visualization bundle as standalone SVG
//! documents, plus a single-file HTML page that lays them out 2×2 under the
//! report title:
//!
//! - text panel (the performance report as monospace text)
//! - confusion matrix (counts and row-normalized percentages)
//! - precision-recall curve (post-step, filled, AP in the title)
//! - ROC curve (filled, dashed chance diagonal, AUC in the title)
//!
//! Nothing here needs a display or a browser; output is plain strings.
//!
//! # Example
//!
//! ```no_run
//! # fn demo(report: &mq_common::ClassificationReport) -> mq_report::Result<()> {
//! use mq_report::{render_report, ReportConfig};
//!
//! let rendered = render_report(report, "Number of classes = 2", &ReportConfig::default())?;
//! rendered.write_to_dir(std::path::Path::new("out"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod plots;
mod svg;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{Palette, ReportConfig, ReportTheme};
pub use error::{RenderError, Result};
pub use generator::ReportGenerator;
pub use plots::{confusion_matrix_svg, pr_curve_svg, roc_curve_svg, text_panel_svg};

use mq_common::ClassificationReport;
use std::path::{Path, PathBuf};
use tracing::debug;

/// All rendered artifacts for one report.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub text_panel: String,
    pub confusion_matrix: String,
    pub pr_curve: String,
    pub roc_curve: String,
    pub html: Option<String>,
}

impl RenderedReport {
    /// `(name, svg)` pairs in panel order. Names carry no extension.
    pub fn plots(&self) -> [(&'static str, &str); 4] {
        [
            ("summary", self.text_panel.as_str()),
            ("confusion_matrix", self.confusion_matrix.as_str()),
            ("pr_curve", self.pr_curve.as_str()),
            ("roc_curve", self.roc_curve.as_str()),
        ]
    }

    /// Write every artifact into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for (name, svg) in self.plots() {
            let path = dir.join(format!("{name}.svg"));
            std::fs::write(&path, svg)?;
            written.push(path);
        }
        if let Some(html) = &self.html {
            let path = dir.join("report.html");
            std::fs::write(&path, html)?;
            written.push(path);
        }
        debug!(dir = %dir.display(), files = written.len(), "artifacts written");
        Ok(written)
    }
}

/// Render every panel and the HTML page.
pub fn render_report(
    report: &ClassificationReport,
    text: &str,
    config: &ReportConfig,
) -> Result<RenderedReport> {
    config.validate()?;
    let generator = ReportGenerator::new(config.clone());
    let rendered = RenderedReport {
        text_panel: text_panel_svg(text, config),
        confusion_matrix: confusion_matrix_svg(report, config),
        pr_curve: pr_curve_svg(report, config),
        roc_curve: roc_curve_svg(report, config),
        html: if config.include_html {
            Some(generator.generate(report, text)?)
        } else {
            None
        },
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_and_write_all_artifacts() {
        let report = fixtures::report();
        let rendered = render_report(&report, "Number of classes = 2", &ReportConfig::default()).unwrap();
        assert!(rendered.html.is_some());

        let dir = TempDir::new().unwrap();
        let written = rendered.write_to_dir(&dir.path().join("out")).unwrap();
        assert_eq!(written.len(), 5);
        for path in &written {
            assert!(path.exists(), "{}", path.display());
        }
    }

    #[test]
    fn html_can_be_skipped() {
        let config = ReportConfig {
            include_html: false,
            ..ReportConfig::default()
        };
        let rendered = render_report(&fixtures::report(), "x", &config).unwrap();
        assert!(rendered.html.is_none());
        let dir = TempDir::new().unwrap();
        assert_eq!(rendered.write_to_dir(dir.path()).unwrap().len(), 4);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ReportConfig {
            width: 10,
            ..ReportConfig::default()
        };
        assert!(matches!(
            render_report(&fixtures::report(), "x", &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }
}
