//! Data model for binary classification evaluation.
//!
//! - [`record`]: the prediction record and its input invariants
//! - [`confusion`]: 2×2 confusion counts and the rates derived from them
//! - [`report`]: the classification report and its parts

pub mod confusion;
pub mod record;
pub mod report;

pub use confusion::ConfusionMatrix;
pub use record::{labels_from_f64, PredictionRecord, PredictionSet};
pub use report::{
    Auc, ClassNames, ClassificationReport, DegenerateReason, LabelSource, PrPoint, RocPoint,
    ScalarMetrics,
};
