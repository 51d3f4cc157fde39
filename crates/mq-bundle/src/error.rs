//! Failures while writing, opening or verifying a `.mqb` report bundle.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A listed file hashes differently from its manifest entry.
    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("unsupported bundle version: {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    /// `manifest.json` is missing, unparseable or inconsistent.
    #[error("corrupted manifest: {0}")]
    CorruptedManifest(String),

    #[error("file not found in bundle: {0}")]
    FileNotFound(String),

    #[error("duplicate path in bundle: {0}")]
    DuplicatePath(String),

    /// Writer asked to produce an archive with no files in it.
    #[error("bundle has no content to write")]
    EmptyBundle,
}

impl BundleError {
    /// True when the archive opened but its contents disagree with the manifest.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            BundleError::ChecksumMismatch { .. }
                | BundleError::CorruptedManifest(_)
                | BundleError::MissingFile(_)
        )
    }
}

impl From<BundleError> for mq_common::Error {
    fn from(err: BundleError) -> Self {
        match err {
            BundleError::Io(e) => mq_common::Error::Io(e),
            e if e.is_integrity() => mq_common::Error::BundleIntegrity(e.to_string()),
            e => mq_common::Error::Bundle(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_errors_map_to_integrity_code() {
        let err = BundleError::ChecksumMismatch {
            path: "report.json".into(),
            expected: "a".repeat(64),
            actual: "b".repeat(64),
        };
        assert!(err.is_integrity());
        let common: mq_common::Error = err.into();
        assert!(matches!(common, mq_common::Error::BundleIntegrity(_)));
    }

    #[test]
    fn other_errors_map_to_bundle() {
        let common: mq_common::Error = BundleError::EmptyBundle.into();
        assert!(matches!(common, mq_common::Error::Bundle(_)));
        let common: mq_common::Error =
            BundleError::FileNotFound("plots/roc.svg".into()).into();
        assert!(matches!(common, mq_common::Error::Bundle(_)));
    }
}
