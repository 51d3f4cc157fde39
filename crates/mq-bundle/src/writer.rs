//! Bundle writer for creating .mqb files.
//!
//! Creates ZIP archives with a manifest and per-file checksums. Entries are
//! sorted and stamped with a fixed modification time, so identical inputs
//! with a pinned `created_at` produce identical bytes.

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::manifest::MANIFEST_FILE_NAME;
use crate::{paths, BundleError, BundleManifest, FileEntry, Result};

/// File type hints for MIME type assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Svg,
    Html,
    Text,
    Log,
    Binary,
}

impl FileType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Json => "application/json",
            FileType::Svg => "image/svg+xml",
            FileType::Html => "text/html",
            FileType::Text => "text/plain",
            FileType::Log => "application/x-ndjson",
            FileType::Binary => "application/octet-stream",
        }
    }

    pub fn from_path(path: &str) -> Self {
        match path.rsplit_once('.').map(|(_, ext)| ext) {
            Some("json") => FileType::Json,
            Some("jsonl") => FileType::Log,
            Some("svg") => FileType::Svg,
            Some("html") => FileType::Html,
            Some("txt") | Some("md") => FileType::Text,
            _ => FileType::Binary,
        }
    }
}

/// Builder for `.mqb` report bundles.
pub struct BundleWriter {
    manifest: BundleManifest,
    files: Vec<(String, Vec<u8>)>,
}

impl BundleWriter {
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            manifest: BundleManifest::new(report_id),
            files: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.manifest = self.manifest.with_title(title);
        self
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.manifest = self.manifest.with_config_hash(hash);
        self
    }

    pub fn with_tool_version(mut self, version: impl Into<String>) -> Self {
        self.manifest = self.manifest.with_tool_version(version);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.manifest = self.manifest.with_created_at(created_at);
        self
    }

    /// Add a file to the bundle with automatic checksum.
    ///
    /// Paths must be relative, use `/` separators, and be unique.
    pub fn add_file(
        &mut self,
        path: impl Into<String>,
        data: Vec<u8>,
        file_type: Option<FileType>,
    ) -> Result<()> {
        let path = path.into();
        if path.is_empty()
            || path == MANIFEST_FILE_NAME
            || path.starts_with('/')
            || path.contains('\\')
            || path.split('/').any(|part| part == "..")
        {
            return Err(BundleError::CorruptedManifest(format!(
                "invalid bundle path '{}'",
                path
            )));
        }
        if self.manifest.find_file(&path).is_some() {
            return Err(BundleError::DuplicatePath(path));
        }

        let file_type = file_type.unwrap_or_else(|| FileType::from_path(&path));
        let bytes = data.len() as u64;
        let entry = FileEntry::new(&path, FileEntry::compute_checksum(&data), bytes)
            .with_mime_type(file_type.mime_type());

        debug!(path = %path, bytes, "added file to bundle");
        self.manifest.add_file(entry);
        self.files.push((path, data));
        Ok(())
    }

    /// Add a JSON-serializable value as a file.
    pub fn add_json<T: serde::Serialize>(&mut self, path: impl Into<String>, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.add_file(path, json.into_bytes(), Some(FileType::Json))
    }

    /// Add the classification report.
    pub fn add_report<T: serde::Serialize>(&mut self, report: &T) -> Result<()> {
        self.add_json(paths::REPORT, report)
    }

    /// Add the monitor-compatible metrics document.
    pub fn add_monitor<T: serde::Serialize>(&mut self, monitor: &T) -> Result<()> {
        self.add_json(paths::MONITOR, monitor)
    }

    /// Add the text performance report.
    pub fn add_summary(&mut self, text: &str) -> Result<()> {
        self.add_file(paths::SUMMARY, text.as_bytes().to_vec(), Some(FileType::Text))
    }

    /// Add an SVG plot under `plots/`.
    pub fn add_plot(&mut self, name: &str, svg: &str) -> Result<()> {
        let path = format!("{}{}.svg", paths::PLOTS_DIR, name);
        self.add_file(path, svg.as_bytes().to_vec(), Some(FileType::Svg))
    }

    /// Add the HTML report.
    pub fn add_html(&mut self, html: &str) -> Result<()> {
        self.add_file(paths::HTML, html.as_bytes().to_vec(), Some(FileType::Html))
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    /// Total size in bytes before compression.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(_, data)| data.len() as u64).sum()
    }

    /// File count (not including manifest).
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write the bundle to a file.
    pub fn write(self, path: &Path) -> Result<BundleManifest> {
        let file = File::create(path)?;
        let (manifest, _) = self.write_into(file)?;
        info!(
            path = %path.display(),
            files = manifest.file_count(),
            bytes = manifest.total_bytes(),
            "bundle written"
        );
        Ok(manifest)
    }

    /// Write the bundle to a byte vector.
    pub fn write_to_vec(self) -> Result<(Vec<u8>, BundleManifest)> {
        let (manifest, cursor) = self.write_into(Cursor::new(Vec::new()))?;
        let bytes = cursor.into_inner();
        info!(
            files = manifest.file_count(),
            compressed_bytes = bytes.len(),
            uncompressed_bytes = manifest.total_bytes(),
            "bundle written to memory"
        );
        Ok((bytes, manifest))
    }

    fn write_into<W: Write + Seek>(mut self, sink: W) -> Result<(BundleManifest, W)> {
        if self.files.is_empty() {
            return Err(BundleError::EmptyBundle);
        }

        self.manifest.sort_files();
        self.files.sort_by(|a, b| a.0.cmp(&b.0));
        let manifest_json = self.manifest.to_json()?;

        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        let mut zip = ZipWriter::new(sink);

        // Manifest first so readers can stream it.
        zip.start_file(MANIFEST_FILE_NAME, options)?;
        zip.write_all(manifest_json.as_bytes())?;

        for (file_path, data) in &self.files {
            zip.start_file(file_path.as_str(), options)?;
            zip.write_all(data)?;
        }

        let sink = zip.finish()?;
        Ok((self.manifest, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn writer() -> BundleWriter {
        BundleWriter::new("mq-20260115-143022-a7xq")
    }

    #[test]
    fn file_type_from_path() {
        assert_eq!(FileType::from_path("report.json"), FileType::Json);
        assert_eq!(FileType::from_path("plots/roc.svg"), FileType::Svg);
        assert_eq!(FileType::from_path("report.html"), FileType::Html);
        assert_eq!(FileType::from_path("summary.txt"), FileType::Text);
        assert_eq!(FileType::from_path("logs/run.jsonl"), FileType::Log);
        assert_eq!(FileType::from_path("blob"), FileType::Binary);
    }

    #[test]
    fn add_file_records_checksum_and_mime() {
        let mut w = writer();
        w.add_file("report.json", b"{}".to_vec(), None).unwrap();
        let entry = w.manifest().find_file("report.json").unwrap();
        assert_eq!(entry.bytes, 2);
        assert_eq!(entry.sha256, FileEntry::compute_checksum(b"{}"));
        assert_eq!(entry.mime_type.as_deref(), Some("application/json"));
        assert_eq!(w.total_bytes(), 2);
    }

    #[test]
    fn typed_helpers_use_fixed_paths() {
        let mut w = writer();
        w.add_report(&serde_json::json!({"title": "t"})).unwrap();
        w.add_monitor(&serde_json::json!({})).unwrap();
        w.add_summary("Number of classes = 2").unwrap();
        w.add_plot("roc", "<svg/>").unwrap();
        w.add_html("<html></html>").unwrap();
        for path in ["report.json", "monitor.json", "summary.txt", "plots/roc.svg", "report.html"] {
            assert!(w.manifest().find_file(path).is_some(), "{path}");
        }
        assert_eq!(w.file_count(), 5);
    }

    #[test]
    fn rejects_duplicate_and_unsafe_paths() {
        let mut w = writer();
        w.add_summary("a").unwrap();
        assert!(matches!(w.add_summary("b"), Err(BundleError::DuplicatePath(_))));
        assert!(w.add_file("../escape.txt", vec![], None).is_err());
        assert!(w.add_file("/abs.txt", vec![], None).is_err());
        assert!(w.add_file("manifest.json", vec![], None).is_err());
        assert!(w.add_file("", vec![], None).is_err());
    }

    #[test]
    fn empty_bundle_rejected() {
        assert!(matches!(writer().write_to_vec(), Err(BundleError::EmptyBundle)));
    }

    #[test]
    fn output_is_reproducible_with_pinned_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap();
        let build = || {
            let mut w = writer().with_created_at(at);
            w.add_summary("text").unwrap();
            w.add_report(&serde_json::json!({"f1": 0.8})).unwrap();
            w.write_to_vec().unwrap().0
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn write_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.mqb");
        let mut w = writer().with_title("demo");
        w.add_summary("text").unwrap();
        let manifest = w.write(&path).unwrap();
        assert!(path.exists());
        assert_eq!(manifest.file_count(), 1);
        assert_eq!(manifest.title.as_deref(), Some("demo"));
    }
}
