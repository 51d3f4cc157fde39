//! Bundle reader for opening and verifying .mqb files.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::manifest::MANIFEST_FILE_NAME;
use crate::{paths, BundleError, BundleManifest, FileEntry, Result};

/// Reader for `.mqb` bundles with checksum verification.
pub struct BundleReader<R: Read + Seek> {
    manifest: BundleManifest,
    archive: ZipArchive<R>,
    verified: HashMap<String, bool>,
}

impl BundleReader<File> {
    /// Open a bundle from a file path.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl BundleReader<Cursor<Vec<u8>>> {
    /// Open a bundle from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> BundleReader<R> {
    /// Create a reader from any Read + Seek source.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let manifest = Self::read_manifest(&mut archive)?;
        manifest.validate()?;

        info!(
            report_id = %manifest.report_id,
            files = manifest.file_count(),
            "bundle opened"
        );

        Ok(Self {
            manifest,
            archive,
            verified: HashMap::new(),
        })
    }

    fn read_manifest(archive: &mut ZipArchive<R>) -> Result<BundleManifest> {
        let mut manifest_file = archive
            .by_name(MANIFEST_FILE_NAME)
            .map_err(|_| BundleError::MissingFile(MANIFEST_FILE_NAME.to_string()))?;

        let mut json = String::new();
        manifest_file.read_to_string(&mut json)?;
        BundleManifest::from_json(&json)
            .map_err(|e| BundleError::CorruptedManifest(e.to_string()))
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    pub fn report_id(&self) -> &str {
        &self.manifest.report_id
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.manifest.files
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.manifest.find_file(path).is_some()
    }

    /// Archive entries not listed in the manifest.
    pub fn unlisted_files(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| *name != MANIFEST_FILE_NAME && self.manifest.find_file(name).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Read a file from the bundle without verification.
    pub fn read_raw(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| BundleError::FileNotFound(path.to_string()))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        debug!(path, bytes = data.len(), "read file from bundle (unverified)");
        Ok(data)
    }

    /// Read a file and check it against the manifest checksum.
    pub fn read_verified(&mut self, path: &str) -> Result<Vec<u8>> {
        let entry = self
            .manifest
            .find_file(path)
            .ok_or_else(|| BundleError::FileNotFound(path.to_string()))?
            .clone();

        let data = match self.read_raw(path) {
            Ok(data) => data,
            Err(BundleError::FileNotFound(p)) => return Err(BundleError::MissingFile(p)),
            Err(e) => return Err(e),
        };

        let actual = FileEntry::compute_checksum(&data);
        if actual != entry.sha256 {
            return Err(BundleError::ChecksumMismatch {
                path: path.to_string(),
                expected: entry.sha256,
                actual,
            });
        }

        self.verified.insert(path.to_string(), true);
        debug!(path, "file verified");
        Ok(data)
    }

    pub fn is_verified(&self, path: &str) -> bool {
        self.verified.get(path).copied().unwrap_or(false)
    }

    /// Verify every listed file. Returns the paths that failed.
    pub fn verify_all(&mut self) -> Vec<String> {
        let paths: Vec<String> = self.manifest.files.iter().map(|f| f.path.clone()).collect();
        let mut failures = Vec::new();

        for path in paths {
            if let Err(e) = self.read_verified(&path) {
                warn!(path = %path, error = %e, "verification failed");
                failures.push(path);
            }
        }

        if failures.is_empty() {
            info!("all files verified");
        } else {
            warn!(failures = ?failures, "some files failed verification");
        }
        failures
    }

    /// Like [`verify_all`](Self::verify_all) but returns the first failure as an error.
    pub fn verify(&mut self) -> Result<()> {
        let paths: Vec<String> = self.manifest.files.iter().map(|f| f.path.clone()).collect();
        for path in paths {
            self.read_verified(&path)?;
        }
        Ok(())
    }

    /// Read and parse a verified JSON file.
    pub fn read_json<T: serde::de::DeserializeOwned>(&mut self, path: &str) -> Result<T> {
        let data = self.read_verified(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Read the classification report.
    pub fn read_report<T: serde::de::DeserializeOwned>(&mut self) -> Result<T> {
        if !self.has_file(paths::REPORT) {
            return Err(BundleError::MissingFile(paths::REPORT.to_string()));
        }
        self.read_json(paths::REPORT)
    }

    /// Read the text summary (if present).
    pub fn read_summary(&mut self) -> Result<Option<String>> {
        if !self.has_file(paths::SUMMARY) {
            return Ok(None);
        }
        let data = self.read_verified(paths::SUMMARY)?;
        Ok(Some(String::from_utf8_lossy(&data).into_owned()))
    }

    /// Plot entries under `plots/`.
    pub fn plot_files(&self) -> Vec<&FileEntry> {
        self.manifest
            .files
            .iter()
            .filter(|f| f.path.starts_with(paths::PLOTS_DIR) && f.path.ends_with(".svg"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BundleWriter;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn sample_bundle() -> Vec<u8> {
        let mut writer = BundleWriter::new("mq-20260115-143022-a7xq");
        writer
            .add_report(&serde_json::json!({"title": "demo", "f1": 0.8}))
            .unwrap();
        writer.add_summary("Number of classes = 2\n").unwrap();
        writer.add_plot("roc", "<svg></svg>").unwrap();
        writer.add_plot("pr", "<svg></svg>").unwrap();
        writer.write_to_vec().unwrap().0
    }

    /// Hand-built archive with a manifest that does not match the content.
    fn tampered_bundle() -> Vec<u8> {
        let mut manifest = BundleManifest::new("mq-20260115-143022-a7xq");
        manifest.add_file(FileEntry::new(
            "report.json",
            FileEntry::compute_checksum(b"{\"f1\":0.8}"),
            10,
        ));
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let options: FileOptions<'_, ()> = FileOptions::default();
            zip.start_file("manifest.json", options).unwrap();
            zip.write_all(manifest.to_json().unwrap().as_bytes()).unwrap();
            zip.start_file("report.json", options).unwrap();
            zip.write_all(b"{\"f1\":1.0}").unwrap();
            zip.start_file("extra.txt", options).unwrap();
            zip.write_all(b"extra").unwrap();
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn opens_and_reads_manifest() {
        let reader = BundleReader::from_bytes(sample_bundle()).unwrap();
        assert_eq!(reader.report_id(), "mq-20260115-143022-a7xq");
        assert_eq!(reader.files().len(), 4);
        assert_eq!(reader.plot_files().len(), 2);
        assert!(reader.unlisted_files().is_empty());
    }

    #[test]
    fn read_verified_marks_file() {
        let mut reader = BundleReader::from_bytes(sample_bundle()).unwrap();
        assert!(!reader.is_verified("summary.txt"));
        let summary = reader.read_summary().unwrap().unwrap();
        assert!(summary.starts_with("Number of classes"));
        assert!(reader.is_verified("summary.txt"));
    }

    #[test]
    fn read_report_json() {
        let mut reader = BundleReader::from_bytes(sample_bundle()).unwrap();
        let report: serde_json::Value = reader.read_report().unwrap();
        assert_eq!(report["f1"], 0.8);
    }

    #[test]
    fn verify_all_clean_bundle() {
        let mut reader = BundleReader::from_bytes(sample_bundle()).unwrap();
        assert!(reader.verify_all().is_empty());
        assert!(reader.verify().is_ok());
    }

    #[test]
    fn checksum_mismatch_detected() {
        let mut reader = BundleReader::from_bytes(tampered_bundle()).unwrap();
        assert_eq!(reader.verify_all(), vec!["report.json".to_string()]);
        let err = reader.read_verified("report.json").unwrap_err();
        assert!(matches!(err, BundleError::ChecksumMismatch { .. }));
        assert!(err.is_integrity());
        assert_eq!(reader.unlisted_files(), vec!["extra.txt".to_string()]);
    }

    #[test]
    fn missing_file_is_reported() {
        let mut reader = BundleReader::from_bytes(sample_bundle()).unwrap();
        assert!(matches!(
            reader.read_verified("report.html"),
            Err(BundleError::FileNotFound(_))
        ));
    }

    #[test]
    fn not_a_zip() {
        assert!(matches!(
            BundleReader::from_bytes(b"not a zip".to_vec()),
            Err(BundleError::Zip(_))
        ));
    }

    #[test]
    fn archive_without_manifest() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let options: FileOptions<'_, ()> = FileOptions::default();
            zip.start_file("report.json", options).unwrap();
            zip.write_all(b"{}").unwrap();
            zip.finish().unwrap();
        }
        assert!(matches!(
            BundleReader::from_bytes(buffer.into_inner()),
            Err(BundleError::MissingFile(_))
        ));
    }
}
