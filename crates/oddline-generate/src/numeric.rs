use tracing::debug;

use oddline_core::{
    Line, LineConfig, RandomSource, RangeInput, Result, Xorshift32, validate_sequence_config,
};

use crate::sequence::build_line;

pub const DEFAULT_LINES: usize = 10;
pub const DEFAULT_SEED: u32 = 42;
/// Integers a range must provide beyond the line length.
pub const RANGE_SLACK: i64 = 2;

/// Ascending integer lines with one omission, duplication or transposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericSequenceGenerator;

impl NumericSequenceGenerator {
    pub const ID: &'static str = "sequence.numeric";

    pub fn default_config() -> LineConfig {
        LineConfig::new(DEFAULT_LINES, DEFAULT_SEED)
    }

    /// Smallest span accepted for a given line length.
    pub fn required_span(line_length: usize) -> i64 {
        line_length as i64 + RANGE_SLACK
    }

    /// Generate `config.lines` lines whose base runs start inside `range`.
    ///
    /// Line `i` carries the anomaly type `AnomalyType::for_index(i)`.
    pub fn generate(range: impl Into<RangeInput>, config: &LineConfig) -> Result<Vec<Line<i64>>> {
        let range = validate_sequence_config(range.into(), config, Self::required_span)?;
        let line_length = config.line_length;
        let last_start = range.max - line_length as i64 + 1;
        let window = last_start.saturating_sub(range.min).saturating_add(1) as u64;

        let mut rng = Xorshift32::new(config.seed);
        let lines: Vec<Line<i64>> = (0..config.lines)
            .map(|index| {
                let start = range.min + rng.pick(window) as i64;
                build_line(start, line_length, index, &mut rng, |value| value)
            })
            .collect();

        debug!(
            generator = Self::ID,
            min = range.min,
            max = range.max,
            lines = lines.len(),
            line_length,
            seed = config.seed,
            "lines generated"
        );
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use oddline_core::{AnomalyType, GenerationError};

    use super::*;

    #[test]
    fn matches_reference_batch_for_seed_123() {
        let config = LineConfig::new(3, 123);
        let lines = NumericSequenceGenerator::generate((1, 50), &config).expect("valid config");

        let expected = [
            (vec![1, 2, 3, 4, 5, 7], 4, AnomalyType::Missing),
            (vec![23, 24, 25, 25, 27, 28], 2, AnomalyType::Double),
            (vec![21, 20, 22, 23, 24, 25], 0, AnomalyType::Order),
        ];
        for (line, (items, error_index, anomaly)) in lines.iter().zip(expected) {
            assert_eq!(line.items, items);
            assert_eq!(line.error_index, error_index);
            assert_eq!(line.anomaly, Some(anomaly));
        }
    }

    #[test]
    fn rejects_range_one_short_of_slack() {
        let config = NumericSequenceGenerator::default_config();
        let result = NumericSequenceGenerator::generate((1, 7), &config);
        assert_eq!(
            result,
            Err(GenerationError::RangeTooSmall {
                span: 7,
                required: 8
            })
        );
    }
}
