//! Bundle manifest types and serialization.
//!
//! The manifest is the source of truth for a bundle's contents:
//! - bundle metadata (version, timestamp, report id, title)
//! - file listing with SHA-256 checksums
//! - hash of the configuration the artifacts were rendered with

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{BundleError, Result};

/// Current bundle schema version.
pub const BUNDLE_SCHEMA_VERSION: &str = "1.0.0";

/// Manifest file name within the bundle.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// File extension for report bundles.
pub const BUNDLE_EXTENSION: &str = "mqb";

/// Bundle manifest containing metadata and file checksums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BundleManifest {
    /// Bundle format version.
    pub bundle_version: String,

    /// Version of the report JSON layout inside the bundle.
    pub schema_version: String,

    /// When the bundle was created.
    pub created_at: DateTime<Utc>,

    /// Report id this bundle belongs to.
    pub report_id: String,

    /// Report title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// SHA-256 of the configuration file used for rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,

    /// Files included in the bundle with checksums.
    pub files: Vec<FileEntry>,

    /// mq-core version that created this bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

impl BundleManifest {
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            bundle_version: BUNDLE_SCHEMA_VERSION.to_string(),
            schema_version: mq_common::SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            report_id: report_id.into(),
            title: None,
            config_hash: None,
            files: Vec::new(),
            tool_version: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn with_tool_version(mut self, version: impl Into<String>) -> Self {
        self.tool_version = Some(version.into());
        self
    }

    /// Pin the creation timestamp (reproducible bundles).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn add_file(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }

    /// Total size of all files in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn find_file(&self, path: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Validate the manifest structure.
    pub fn validate(&self) -> Result<()> {
        if self.bundle_version != BUNDLE_SCHEMA_VERSION {
            return Err(BundleError::UnsupportedVersion {
                version: self.bundle_version.clone(),
                supported: BUNDLE_SCHEMA_VERSION.to_string(),
            });
        }

        if self.report_id.is_empty() {
            return Err(BundleError::CorruptedManifest(
                "report_id is empty".to_string(),
            ));
        }

        let mut seen = std::collections::BTreeSet::new();
        for file in &self.files {
            if file.path.is_empty() {
                return Err(BundleError::CorruptedManifest(
                    "file entry has empty path".to_string(),
                ));
            }
            if file.path == MANIFEST_FILE_NAME {
                return Err(BundleError::CorruptedManifest(
                    "manifest lists itself".to_string(),
                ));
            }
            if !seen.insert(file.path.as_str()) {
                return Err(BundleError::CorruptedManifest(format!(
                    "file '{}' listed twice",
                    file.path
                )));
            }
            if file.sha256.len() != 64 || !file.sha256.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(BundleError::CorruptedManifest(format!(
                    "file '{}' has invalid checksum",
                    file.path
                )));
            }
        }

        Ok(())
    }

    /// Sort files for deterministic ordering.
    pub fn sort_files(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// File entry in the manifest with checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileEntry {
    /// Path within the bundle (relative).
    pub path: String,

    /// SHA-256 checksum (64 hex characters).
    pub sha256: String,

    /// Size in bytes.
    pub bytes: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, sha256: impl Into<String>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            sha256: sha256.into(),
            bytes,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Compute SHA-256 checksum of data.
    pub fn compute_checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Verify the checksum against data.
    pub fn verify(&self, data: &[u8]) -> bool {
        Self::compute_checksum(data) == self.sha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> BundleManifest {
        BundleManifest::new("mq-20260115-143022-a7xq")
    }

    #[test]
    fn new_manifest_defaults() {
        let m = manifest();
        assert_eq!(m.report_id, "mq-20260115-143022-a7xq");
        assert_eq!(m.bundle_version, BUNDLE_SCHEMA_VERSION);
        assert_eq!(m.schema_version, mq_common::SCHEMA_VERSION);
        assert!(m.files.is_empty());
    }

    #[test]
    fn builder_fields() {
        let m = manifest()
            .with_title("Churn model")
            .with_config_hash("c".repeat(64))
            .with_tool_version("0.1.0");
        assert_eq!(m.title.as_deref(), Some("Churn model"));
        assert_eq!(m.config_hash.as_deref().map(str::len), Some(64));
        assert_eq!(m.tool_version.as_deref(), Some("0.1.0"));
    }

    #[test]
    fn totals_and_lookup() {
        let mut m = manifest();
        m.add_file(FileEntry::new("report.json", "a".repeat(64), 100));
        m.add_file(FileEntry::new("summary.txt", "b".repeat(64), 20));
        assert_eq!(m.file_count(), 2);
        assert_eq!(m.total_bytes(), 120);
        assert!(m.find_file("summary.txt").is_some());
        assert!(m.find_file("report.html").is_none());
    }

    #[test]
    fn sort_files_by_path() {
        let mut m = manifest();
        m.add_file(FileEntry::new("summary.txt", "a".repeat(64), 1));
        m.add_file(FileEntry::new("plots/roc.svg", "b".repeat(64), 1));
        m.add_file(FileEntry::new("report.json", "c".repeat(64), 1));
        m.sort_files();
        let paths: Vec<_> = m.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["plots/roc.svg", "report.json", "summary.txt"]);
    }

    #[test]
    fn validate_rejects_bad_entries() {
        assert!(BundleManifest::new("").validate().is_err());

        let mut m = manifest();
        m.add_file(FileEntry::new("report.json", "short", 1));
        assert!(matches!(m.validate(), Err(BundleError::CorruptedManifest(_))));

        let mut m = manifest();
        m.add_file(FileEntry::new("report.json", "a".repeat(64), 1));
        m.add_file(FileEntry::new("report.json", "a".repeat(64), 1));
        assert!(m.validate().is_err());

        let mut m = manifest();
        m.add_file(FileEntry::new("report.json", "z".repeat(64), 1));
        assert!(m.validate().is_err());

        let mut m = manifest();
        m.bundle_version = "9.9.9".into();
        assert!(matches!(
            m.validate(),
            Err(BundleError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn json_roundtrip_keeps_fields() {
        let mut m = manifest().with_title("t");
        m.add_file(FileEntry::new("report.json", "a".repeat(64), 10).with_mime_type("application/json"));
        let parsed = BundleManifest::from_json(&m.to_json().unwrap()).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn checksum_known_value() {
        assert_eq!(
            FileEntry::compute_checksum(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        let entry = FileEntry::new("x", FileEntry::compute_checksum(b"x"), 1);
        assert!(entry.verify(b"x"));
        assert!(!entry.verify(b"y"));
    }
}
