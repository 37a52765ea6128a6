use tracing::debug;

use oddline_core::{
    Line, LineConfig, Mulberry32, RandomSource, RangeInput, Result, validate_sequence_config,
};

pub const DEFAULT_LINES: usize = 10;
pub const DEFAULT_SEED: u32 = 1;
/// Distance between neighbouring items of the base run.
pub const STEP: i64 = 2;
/// Amount added to the one perturbed item.
pub const PERTURBATION: i64 = 1;

/// Lines counting by two from a random start, with one item nudged by one.
///
/// The nudged item is the only one of its parity, so `error_index` names the
/// item itself rather than a difference slot, and no anomaly type is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairedOffsetGenerator;

impl PairedOffsetGenerator {
    pub const ID: &'static str = "sequence.paired_offset";

    pub fn default_config() -> LineConfig {
        LineConfig::new(DEFAULT_LINES, DEFAULT_SEED)
    }

    /// Smallest span that keeps the run and its nudged item inside the range.
    pub fn required_span(line_length: usize) -> i64 {
        STEP * (line_length as i64 - 1) + PERTURBATION + 1
    }

    pub fn generate(range: impl Into<RangeInput>, config: &LineConfig) -> Result<Vec<Line<i64>>> {
        let range = validate_sequence_config(range.into(), config, Self::required_span)?;
        let line_length = config.line_length;
        let last_start = range.max - STEP * (line_length as i64 - 1) - PERTURBATION;
        let window = last_start.saturating_sub(range.min).saturating_add(1) as u64;

        let mut rng = Mulberry32::new(config.seed);
        let lines: Vec<Line<i64>> = (0..config.lines)
            .map(|_| {
                let start = range.min + rng.pick(window) as i64;
                let mut items: Vec<i64> =
                    (0..line_length).map(|k| start + STEP * k as i64).collect();
                let error_index = rng.pick_index(line_length);
                items[error_index] += PERTURBATION;
                Line {
                    items,
                    error_index,
                    anomaly: None,
                }
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
