//! Model quality common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The prediction record and its input invariants
//! - The classification report data model
//! - Report identifiers and schema versioning
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod model;
pub mod output;
pub mod schema;

pub use error::{Error, ErrorCategory, Field, InputError, InputErrorKind, Result, StructuredError};
pub use id::ReportId;
pub use model::{
    Auc, ClassNames, ClassificationReport, ConfusionMatrix, DegenerateReason, LabelSource,
    labels_from_f64, PrPoint, PredictionRecord, PredictionSet, RocPoint, ScalarMetrics,
};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
