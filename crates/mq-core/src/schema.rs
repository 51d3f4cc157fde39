//! JSON Schema generation for machine-readable outputs.
//!
//! ```bash
//! # List available schema types
//! mq-core schema --list
//!
//! # Generate schema for a specific type
//! mq-core schema ClassificationReport
//!
//! # Generate all schemas
//! mq-core schema
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::compare::{RankMetric, RankedEntry};
pub use crate::config::{Config, ConfigSnapshot};
pub use mq_bundle::{BundleManifest, FileEntry};
pub use mq_common::{
    Auc, ClassNames, ClassificationReport, ConfusionMatrix, DegenerateReason, LabelSource,
    PrPoint, PredictionSet, ReportId, RocPoint, ScalarMetrics,
};

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        // Report types
        (
            "ClassificationReport",
            "Complete quality report for one binary classifier",
        ),
        ("ConfusionMatrix", "2x2 confusion counts (tn, fp, fn, tp)"),
        ("ScalarMetrics", "Accuracy, precision, recall, F-scores and rates"),
        ("Auc", "Area under a curve, or the reason it is undefined"),
        ("DegenerateReason", "Why ground truth holds a single class"),
        ("LabelSource", "Where the predicted labels came from"),
        ("ClassNames", "Display names for class 0 and class 1"),
        ("RocPoint", "One ROC curve point"),
        ("PrPoint", "One precision-recall curve point"),
        // Input
        ("PredictionSet", "Ground truth, scores and optional labels"),
        // Identity
        ("ReportId", "Report identifier (mq-YYYYMMDD-HHMMSS-xxxx)"),
        // Comparison
        ("RankMetric", "Metric used to rank reports"),
        ("RankedEntry", "One row of a report ranking"),
        // Config
        ("Config", "Configuration file"),
        ("ConfigSnapshot", "Config provenance (path and hash)"),
        // Bundle
        ("BundleManifest", "Bundle manifest with file checksums"),
        ("FileEntry", "Single file entry in a bundle manifest"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "ClassificationReport" => schema_for!(ClassificationReport),
        "ConfusionMatrix" => schema_for!(ConfusionMatrix),
        "ScalarMetrics" => schema_for!(ScalarMetrics),
        "Auc" => schema_for!(Auc),
        "DegenerateReason" => schema_for!(DegenerateReason),
        "LabelSource" => schema_for!(LabelSource),
        "ClassNames" => schema_for!(ClassNames),
        "RocPoint" => schema_for!(RocPoint),
        "PrPoint" => schema_for!(PrPoint),
        "PredictionSet" => schema_for!(PredictionSet),
        "ReportId" => schema_for!(ReportId),
        "RankMetric" => schema_for!(RankMetric),
        "RankedEntry" => schema_for!(RankedEntry),
        "Config" => schema_for!(Config),
        "ConfigSnapshot" => schema_for!(ConfigSnapshot),
        "BundleManifest" => schema_for!(BundleManifest),
        "FileEntry" => schema_for!(FileEntry),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    let mut schemas = BTreeMap::new();
    for (name, _desc) in available_schemas() {
        if let Some(schema) = generate_schema(name) {
            schemas.insert(name.to_string(), schema);
        }
    }
    schemas
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> String {
    let out = match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    };
    out.unwrap_or_default()
}
