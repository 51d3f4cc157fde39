//! Report bundle writer/reader for model quality evaluation.
//!
//! A `.mqb` bundle packages one classification report together with its
//! rendered artifacts so it can be archived or handed to a reviewer.
//!
//! # Bundle Format
//!
//! Bundles are ZIP archives containing:
//! - `manifest.json`: metadata, schema version, file listing with checksums
//! - `report.json`: the classification report
//! - `monitor.json`: monitor-compatible metrics document (optional)
//! - `summary.txt`: text performance report
//! - `plots/*.svg`: confusion matrix, ROC and PR plots (optional)
//! - `report.html`: single-file HTML report (optional)
//!
//! # Example
//!
//! ```no_run
//! use mq_bundle::{BundleReader, BundleWriter};
//! use std::path::Path;
//!
//! let mut writer = BundleWriter::new("mq-20260115-143022-a7xq");
//! writer.add_report(&serde_json::json!({"title": "demo"})).unwrap();
//! writer.write(Path::new("demo.mqb")).unwrap();
//!
//! let mut reader = BundleReader::open(Path::new("demo.mqb")).unwrap();
//! let failures = reader.verify_all();
//! assert!(failures.is_empty());
//! ```

pub mod error;
pub mod manifest;
pub mod reader;
pub mod writer;

pub use error::{BundleError, Result};
pub use manifest::{
    BundleManifest, FileEntry, BUNDLE_EXTENSION, BUNDLE_SCHEMA_VERSION, MANIFEST_FILE_NAME,
};
pub use reader::BundleReader;
pub use writer::{BundleWriter, FileType};

/// Well-known paths inside a bundle.
pub mod paths {
    pub const REPORT: &str = "report.json";
    pub const MONITOR: &str = "monitor.json";
    pub const SUMMARY: &str = "summary.txt";
    pub const HTML: &str = "report.html";
    pub const PLOTS_DIR: &str = "plots/";
}
