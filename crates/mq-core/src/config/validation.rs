//! Semantic checks that serde cannot express.

use super::Config;
use thiserror::Error;

/// Smallest terminal plot that still shows axes.
pub const MIN_ASCII_WIDTH: usize = 8;
pub const MIN_ASCII_HEIGHT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("report.class_names[{index}] is empty")]
    EmptyClassName { index: usize },

    #[error("report.class_names are both '{name}'; the two classes need distinct names")]
    DuplicateClassNames { name: String },

    #[error("render.{field} must be positive, got {value}")]
    NonPositiveDimension { field: &'static str, value: u32 },

    #[error("render.{field} must be at least {min}, got {value}")]
    PlotTooSmall {
        field: &'static str,
        min: usize,
        value: usize,
    },
}

pub fn validate_config(config: &Config) -> Result<(), ValidationError> {
    let names = &config.report.class_names;
    for (index, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyClassName { index });
        }
    }
    if names.negative() == names.positive() {
        return Err(ValidationError::DuplicateClassNames {
            name: names.negative().to_string(),
        });
    }

    let render = &config.render;
    for (field, value) in [("width", render.width), ("height", render.height)] {
        if value == 0 {
            return Err(ValidationError::NonPositiveDimension { field, value });
        }
    }
    for (field, min, value) in [
        ("ascii_width", MIN_ASCII_WIDTH, render.ascii_width),
        ("ascii_height", MIN_ASCII_HEIGHT, render.ascii_height),
    ] {
        if value < min {
            return Err(ValidationError::PlotTooSmall { field, min, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mq_common::ClassNames;

    #[test]
    fn empty_class_name() {
        let mut config = Config::default();
        config.report.class_names = ClassNames::new("ok", " ");
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::EmptyClassName { index: 1 })
        );
    }

    #[test]
    fn zero_dimension() {
        let mut config = Config::default();
        config.render.height = 0;
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::NonPositiveDimension {
                field: "height",
                value: 0
            })
        );
    }

    #[test]
    fn ascii_minimum() {
        let mut config = Config::default();
        config.render.ascii_width = 3;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("ascii_width"));
    }
}
