use tracing::debug;

use oddline_core::{
    Line, LineConfig, RandomSource, Result, Xorshift32, validate_alphabet_window, validate_count,
    validate_line_length,
};

use crate::sequence::build_line;

pub const DEFAULT_LINES: usize = 10;
pub const DEFAULT_SEED: u32 = 1234;

const FIRST_LETTER: u8 = b'a';
const ALPHABET_SIZE: usize = 26;
/// Codes kept free past the last start so an omission never leaves `a..=z`.
const OMISSION_SLACK: usize = 1;

/// Lowercase alphabet runs with one omission, duplication or transposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterSequenceGenerator;

impl LetterSequenceGenerator {
    pub const ID: &'static str = "sequence.letters";

    pub fn default_config() -> LineConfig {
        LineConfig::new(DEFAULT_LINES, DEFAULT_SEED)
    }

    /// Longest line the alphabet window accepts.
    pub const fn max_line_length() -> usize {
        ALPHABET_SIZE - OMISSION_SLACK
    }

    pub fn generate(config: &LineConfig) -> Result<Vec<Line<char>>> {
        validate_count(config.lines)?;
        validate_line_length(config.line_length)?;
        let max_start =
            validate_alphabet_window(config.line_length, ALPHABET_SIZE, OMISSION_SLACK)?;

        let mut rng = Xorshift32::new(config.seed);
        let lines: Vec<Line<char>> = (0..config.lines)
            .map(|index| {
                let offset = rng.pick_index(max_start + 1);
                let start = i64::from(FIRST_LETTER) + offset as i64;
                build_line(start, config.line_length, index, &mut rng, letter_for_code)
            })
            .collect();

        debug!(
            generator = Self::ID,
            lines = lines.len(),
            line_length = config.line_length,
            seed = config.seed,
            "lines generated"
        );
        Ok(lines)
    }
}

fn letter_for_code(code: i64) -> char {
    u8::try_from(code).map(char::from).unwrap_or('?')
}
