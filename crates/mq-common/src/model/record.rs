//! Prediction records and their invariants.

use crate::error::{Field, InputError};
use mq_math::is_unit_interval;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Borrowed view over one evaluation's input.
///
/// `y_true`, `y_score` and the optional `y_pred` are positionally aligned.
/// Construction does not check anything; call [`PredictionRecord::validate`]
/// (the evaluator always does) before trusting the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRecord<'a> {
    pub y_true: &'a [u8],
    pub y_score: &'a [f64],
    pub y_pred: Option<&'a [u8]>,
}

impl<'a> PredictionRecord<'a> {
    pub fn new(y_true: &'a [u8], y_score: &'a [f64]) -> Self {
        Self {
            y_true,
            y_score,
            y_pred: None,
        }
    }

    /// Attach hard labels emitted by the model itself.
    pub fn with_predictions(mut self, y_pred: &'a [u8]) -> Self {
        self.y_pred = Some(y_pred);
        self
    }

    pub fn len(&self) -> usize {
        self.y_true.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_true.is_empty()
    }

    /// Check every invariant, reporting the first violation found.
    ///
    /// Shape is checked before domain, and `y_true` before `y_score`
    /// before `y_pred`, so the error is stable for a given input.
    pub fn validate(&self) -> Result<(), InputError> {
        let n = self.y_true.len();
        if n == 0 {
            return Err(InputError::Empty);
        }
        if self.y_score.len() != n {
            return Err(InputError::LengthMismatch {
                field: Field::YScore,
                expected: n,
                actual: self.y_score.len(),
            });
        }
        if let Some(y_pred) = self.y_pred {
            if y_pred.len() != n {
                return Err(InputError::LengthMismatch {
                    field: Field::YPred,
                    expected: n,
                    actual: y_pred.len(),
                });
            }
        }

        check_labels(Field::YTrue, self.y_true)?;
        if let Some((index, &value)) = self
            .y_score
            .iter()
            .enumerate()
            .find(|(_, s)| !is_unit_interval(**s))
        {
            return Err(InputError::ScoreOutOfDomain { index, value });
        }
        if let Some(y_pred) = self.y_pred {
            check_labels(Field::YPred, y_pred)?;
        }
        Ok(())
    }

    /// Number of positive ground-truth labels.
    pub fn positives(&self) -> u64 {
        self.y_true.iter().filter(|&&y| y == 1).count() as u64
    }
}

fn check_labels(field: Field, labels: &[u8]) -> Result<(), InputError> {
    match labels.iter().position(|&y| y > 1) {
        Some(index) => Err(InputError::LabelOutOfDomain {
            field,
            index,
            value: labels[index] as f64,
        }),
        None => Ok(()),
    }
}

/// Convert numeric label cells to 0/1 labels.
///
/// Anything other than exactly `0.0` or `1.0` is rejected with its index,
/// so `0.5`, `-1` and `2` are reported rather than rounded.
pub fn labels_from_f64(field: Field, values: &[f64]) -> Result<Vec<u8>, InputError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value == 0.0 {
                Ok(0)
            } else if value == 1.0 {
                Ok(1)
            } else {
                Err(InputError::LabelOutOfDomain {
                    field,
                    index,
                    value,
                })
            }
        })
        .collect()
}

/// Owned prediction data, as loaded from a file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PredictionSet {
    pub y_true: Vec<u8>,
    pub y_score: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_pred: Option<Vec<u8>>,
}

impl PredictionSet {
    pub fn as_record(&self) -> PredictionRecord<'_> {
        PredictionRecord {
            y_true: &self.y_true,
            y_score: &self.y_score,
            y_pred: self.y_pred.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_record_passes() {
        let y_true = [0, 1, 1];
        let y_score = [0.0, 0.5, 1.0];
        let y_pred = [0, 1, 0];
        let record = PredictionRecord::new(&y_true, &y_score).with_predictions(&y_pred);
        assert!(record.validate().is_ok());
        assert_eq!(record.positives(), 2);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn empty_rejected() {
        let record = PredictionRecord::new(&[], &[]);
        assert_eq!(record.validate(), Err(InputError::Empty));
    }

    #[test]
    fn length_mismatch_names_field() {
        let record = PredictionRecord::new(&[0, 1], &[0.2]);
        assert_eq!(
            record.validate(),
            Err(InputError::LengthMismatch {
                field: Field::YScore,
                expected: 2,
                actual: 1
            })
        );

        let record = PredictionRecord::new(&[0, 1], &[0.2, 0.3]).with_predictions(&[1]);
        assert!(matches!(
            record.validate(),
            Err(InputError::LengthMismatch {
                field: Field::YPred,
                ..
            })
        ));
    }

    #[test]
    fn label_domain() {
        let record = PredictionRecord::new(&[0, 2, 1], &[0.1, 0.2, 0.3]);
        assert_eq!(
            record.validate(),
            Err(InputError::LabelOutOfDomain {
                field: Field::YTrue,
                index: 1,
                value: 2.0
            })
        );
        let record = PredictionRecord::new(&[0, 1], &[0.1, 0.2]).with_predictions(&[0, 3]);
        assert!(matches!(
            record.validate(),
            Err(InputError::LabelOutOfDomain {
                field: Field::YPred,
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn score_domain_includes_nan() {
        for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let scores = [0.5, bad];
            let record = PredictionRecord::new(&[0, 1], &scores);
            assert!(matches!(
                record.validate(),
                Err(InputError::ScoreOutOfDomain { index: 1, .. })
            ));
        }
    }

    #[test]
    fn labels_from_f64_rejects_fractions() {
        assert_eq!(
            labels_from_f64(Field::YTrue, &[0.0, 1.0, 1.0]).unwrap(),
            vec![0, 1, 1]
        );
        let err = labels_from_f64(Field::YTrue, &[0.0, 0.5]).unwrap_err();
        assert_eq!(err.invariant(), "label_domain");
        assert!(labels_from_f64(Field::YPred, &[-1.0]).is_err());
    }

    #[test]
    fn prediction_set_json() {
        let set: PredictionSet =
            serde_json::from_str(r#"{"y_true":[0,1],"y_score":[0.25,0.75]}"#).unwrap();
        assert!(set.y_pred.is_none());
        assert!(set.as_record().validate().is_ok());
    }
}
