//! Schema versioning for serialized artifacts.

/// Version of the report / monitor / manifest JSON layouts.
///
/// Bumped on any field rename or removal. Additive fields keep the version.
pub const SCHEMA_VERSION: &str = "1.0.0";
