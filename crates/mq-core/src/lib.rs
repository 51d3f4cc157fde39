//! Model Quality Core Library
//!
//! This library provides the core functionality for binary classifier
//! evaluation:
//! - The evaluator (sweep, threshold search, report assembly)
//! - Model-Monitor export, text report and ASCII plots
//! - Batch evaluation and report ranking
//! - Prediction file loading, configuration and logging
//! - Exit codes and JSON schema export for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod ascii;
pub mod compare;
pub mod config;
pub mod evaluate;
pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod monitor;
pub mod schema;
pub mod text;

pub use evaluate::{evaluate, EvaluateOptions, Evaluator, TieBreak};
