//! Loading prediction files.
//!
//! Two formats:
//! - JSON: `{"y_true": [0, 1, ...], "y_score": [0.2, 0.9, ...], "y_pred": [...]}`
//!   (`y_pred` optional)
//! - CSV with a header row; column names are configurable.
//!
//! Label cells are read as numbers and must be exactly 0 or 1. Values are
//! only converted here; the evaluator checks the remaining invariants.

use clap::ValueEnum;
use mq_common::{labels_from_f64, Field, InputError, PredictionSet};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Prediction file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension (.csv is CSV, anything else JSON)
    #[default]
    Auto,
    Json,
    Csv,
}

impl InputFormat {
    /// Resolve `Auto` against a path.
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
                _ => InputFormat::Json,
            },
            other => other,
        }
    }
}

/// CSV column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    pub y_true: String,
    pub y_score: String,
    pub y_pred: Option<String>,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            y_true: "y_true".to_string(),
            y_score: "y_score".to_string(),
            y_pred: None,
        }
    }
}

/// Errors while reading a prediction file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' not found in CSV header (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    BadCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

impl LoadError {
    /// Convert to the workspace error, naming the file for non-input errors.
    pub fn into_error(self, path: &Path) -> mq_common::Error {
        match self {
            LoadError::Input(e) => mq_common::Error::Input(e),
            other => mq_common::Error::Load {
                path: path.display().to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Deserialize)]
struct RawPredictions {
    y_true: Vec<f64>,
    y_score: Vec<f64>,
    #[serde(default)]
    y_pred: Option<Vec<f64>>,
}

impl RawPredictions {
    fn into_set(self) -> Result<PredictionSet, InputError> {
        Ok(PredictionSet {
            y_true: labels_from_f64(Field::YTrue, &self.y_true)?,
            y_score: self.y_score,
            y_pred: self
                .y_pred
                .map(|p| labels_from_f64(Field::YPred, &p))
                .transpose()?,
        })
    }
}

/// Parse a JSON prediction document.
pub fn parse_json(text: &str) -> Result<PredictionSet, LoadError> {
    let raw: RawPredictions = serde_json::from_str(text)?;
    Ok(raw.into_set()?)
}

/// Parse CSV predictions with a header row.
pub fn parse_csv<R: Read>(reader: R, columns: &CsvColumns) -> Result<PredictionSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };
    let true_idx = find(&columns.y_true)?;
    let score_idx = find(&columns.y_score)?;
    let pred_idx = columns.y_pred.as_deref().map(find).transpose()?;

    let mut raw = RawPredictions {
        y_true: Vec::new(),
        y_score: Vec::new(),
        y_pred: pred_idx.map(|_| Vec::new()),
    };

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // Row numbers count the header as row 1.
        let row = idx + 2;
        let cell = |col: usize, name: &str| -> Result<f64, LoadError> {
            let value = record.get(col).unwrap_or("");
            value.parse::<f64>().map_err(|_| LoadError::BadCell {
                row,
                column: name.to_string(),
                value: value.to_string(),
            })
        };
        raw.y_true.push(cell(true_idx, &columns.y_true)?);
        raw.y_score.push(cell(score_idx, &columns.y_score)?);
        if let (Some(col), Some(preds), Some(name)) =
            (pred_idx, raw.y_pred.as_mut(), columns.y_pred.as_deref())
        {
            preds.push(cell(col, name)?);
        }
    }

    Ok(raw.into_set()?)
}

/// Load a prediction file from disk.
pub fn load_predictions(
    path: &Path,
    format: InputFormat,
    columns: &CsvColumns,
) -> Result<PredictionSet, mq_common::Error> {
    let format = format.resolve(path);
    debug!(target: "load.started", path = %path.display(), ?format, "loading predictions");

    let result = match format {
        InputFormat::Csv => std::fs::File::open(path)
            .map_err(LoadError::from)
            .and_then(|f| parse_csv(f, columns)),
        InputFormat::Json | InputFormat::Auto => std::fs::read_to_string(path)
            .map_err(LoadError::from)
            .and_then(|text| parse_json(&text)),
    };
    let set = result.map_err(|e| e.into_error(path))?;

    debug!(target: "load.finished", samples = set.y_true.len(), has_labels = set.y_pred.is_some(), "predictions loaded");
    Ok(set)
}
