use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line length used when a caller does not ask for one.
pub const DEFAULT_LINE_LENGTH: usize = 6;
/// Shortest line that can carry every anomaly signature.
pub const MIN_LINE_LENGTH: usize = 3;
/// Largest endpoint magnitude accepted in a range, `2^53 - 1`.
///
/// Every integer up to here is exact as an `f64`, and lines built near the
/// edge still have headroom in `i64` for the anomaly shifts.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Raw range endpoints as supplied by a caller, before validation.
///
/// Endpoints are kept as `f64` so configuration sources that only know
/// "numbers" (JSON, TOML) can be checked for finiteness and integrality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RangeInput {
    pub min: f64,
    pub max: f64,
}

impl RangeInput {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl From<(f64, f64)> for RangeInput {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<(i64, i64)> for RangeInput {
    fn from((min, max): (i64, i64)) -> Self {
        Self {
            min: min as f64,
            max: max as f64,
        }
    }
}

impl From<[i64; 2]> for RangeInput {
    fn from([min, max]: [i64; 2]) -> Self {
        Self::from((min, max))
    }
}

/// Validated inclusive integer bounds with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    /// Number of integers in the range, both ends included.
    pub fn span(&self) -> i64 {
        self.max.saturating_sub(self.min).saturating_add(1)
    }
}

/// Shape parameters for one generation call. Never mutated after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    /// Number of lines to produce.
    pub lines: usize,
    /// Number of items per line.
    pub line_length: usize,
    /// Seed of the random stream owned by the call.
    pub seed: u32,
}

impl LineConfig {
    pub const fn new(lines: usize, seed: u32) -> Self {
        Self {
            lines,
            line_length: DEFAULT_LINE_LENGTH,
            seed,
        }
    }

    pub const fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub const fn with_lines(mut self, lines: usize) -> Self {
        self.lines = lines;
        self
    }
}
