//! Core contracts and helpers for oddline.
//!
//! This crate defines the line records produced by the puzzle generators, the
//! validation rules every generation call runs before drawing, and the seeded
//! random sources the generators draw from.

pub mod config;
pub mod error;
pub mod rng;
pub mod types;
pub mod validation;

pub use config::{
    DEFAULT_LINE_LENGTH, LineConfig, MAX_SAFE_INTEGER, MIN_LINE_LENGTH, NumericRange, RangeInput,
};
pub use error::{GenerationError, Result};
pub use rng::{Mulberry32, RandomSource, Xorshift32};
pub use types::{AnomalyType, Fact, Line, Operator, Ordinal, WordLine, classify_differences};
pub use validation::{
    validate_alphabet_window, validate_count, validate_line_length, validate_range,
    validate_sequence_config, validate_span,
};
