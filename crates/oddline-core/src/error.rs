use thiserror::Error;

/// Configuration errors raised before any random draw or output is produced.
///
/// Each variant is one kind of the validation taxonomy; the first failed check
/// wins and no partial batch is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// A range endpoint is NaN or infinite.
    #[error("range must be finite numbers (got [{min}, {max}])")]
    NonFiniteRange { min: f64, max: f64 },
    /// A range endpoint has a fractional part.
    #[error("range endpoints must be whole numbers (got [{min}, {max}])")]
    NonIntegerRange { min: f64, max: f64 },
    /// An endpoint lies outside `[-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER]`.
    #[error("range endpoints must be within +/-{limit} (got [{min}, {max}])")]
    RangeOutOfBounds { min: f64, max: f64, limit: i64 },
    /// The minimum is not strictly below the maximum.
    #[error("range must be [min, max] with min < max (got [{min}, {max}])")]
    InvalidOrder { min: i64, max: i64 },
    /// Zero lines were requested.
    #[error("lines must be a positive integer (got {0})")]
    NonPositiveCount(usize),
    #[error("lineLength must be an integer >= {minimum} (got {requested})")]
    LineLengthTooSmall { requested: usize, minimum: usize },
    /// The range cannot hold a line plus the slack its anomaly needs.
    #[error("range too small for requested lineLength: span {span}, need at least {required}")]
    RangeTooSmall { span: i64, required: i64 },
    #[error("lineLength {requested} too large for alphabet (at most {available})")]
    AlphabetWindowExceeded { requested: usize, available: usize },
    /// A rhyme dictionary cannot guarantee a unique odd word per line.
    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),
}

/// Convenience alias for results returned by oddline crates.
pub type Result<T> = std::result::Result<T, GenerationError>;
