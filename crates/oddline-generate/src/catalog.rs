use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use oddline_core::{Line, LineConfig, Result, WordLine};

use crate::letters::LetterSequenceGenerator;
use crate::numeric::NumericSequenceGenerator;
use crate::paired::PairedOffsetGenerator;
use crate::words::{RhymeDictionary, WordSetConfig, WordSetGenerator};

/// Lines per game when nothing overrides it.
pub const GAME_TOTAL: usize = 10;
const NUMBER_DETECTIVE_RANGE: (i64, i64) = (1, 20);
const FREEZE_MATH_RANGE: (i64, i64) = (1, 40);

/// The odd-one-out games and the configuration each is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    NumberDetective,
    LetterDetective,
    WordDetective,
    FreezeMath,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        Self::NumberDetective,
        Self::LetterDetective,
        Self::WordDetective,
        Self::FreezeMath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NumberDetective => "number-detective",
            Self::LetterDetective => "letter-detective",
            Self::WordDetective => "word-detective",
            Self::FreezeMath => "freeze-math",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NumberDetective => "Number Detective",
            Self::LetterDetective => "Letter Detective",
            Self::WordDetective => "Word Detective",
            Self::FreezeMath => "Freeze Math",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Self::NumberDetective => {
                "Find the number that breaks the pattern in each row. Tap it to move on. Solve all rows to finish."
            }
            Self::LetterDetective => {
                "One letter in each row is out of order or does not belong. Tap the odd letter to advance."
            }
            Self::WordDetective => {
                "In each row one word does not rhyme with the others. Tap the odd word out to continue."
            }
            Self::FreezeMath => {
                "Spot the number in each row that breaks the even counting pattern. Tap it. Use Freeze to pause, breathe, then continue."
            }
        }
    }

    pub fn default_seed(&self) -> u32 {
        match self {
            Self::NumberDetective => 7,
            Self::LetterDetective => 11,
            Self::WordDetective => 13,
            Self::FreezeMath => 5,
        }
    }

    /// Numeric range for the range-based games.
    pub fn range(&self) -> Option<(i64, i64)> {
        match self {
            Self::NumberDetective => Some(NUMBER_DETECTIVE_RANGE),
            Self::FreezeMath => Some(FREEZE_MATH_RANGE),
            Self::LetterDetective | Self::WordDetective => None,
        }
    }

    pub fn generator_id(&self) -> &'static str {
        match self {
            Self::NumberDetective => NumericSequenceGenerator::ID,
            Self::LetterDetective => LetterSequenceGenerator::ID,
            Self::WordDetective => WordSetGenerator::ID,
            Self::FreezeMath => PairedOffsetGenerator::ID,
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game '{0}' (expected one of: number-detective, letter-detective, word-detective, freeze-math)")]
pub struct ParseGameIdError(pub String);

impl FromStr for GameId {
    type Err = ParseGameIdError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|game| game.as_str() == value)
            .ok_or_else(|| ParseGameIdError(value.to_string()))
    }
}

/// Caller-supplied replacements for a game's compiled-in settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverrides {
    pub seed: Option<u32>,
    pub lines: Option<usize>,
}

/// A generated batch, tagged by the kind of line it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum GameBatch {
    Numbers(Vec<Line<i64>>),
    Letters(Vec<Line<char>>),
    Words(Vec<WordLine>),
    Offsets(Vec<Line<i64>>),
}

/// A flattened line for tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub answer: usize,
    /// Anomaly type, `odd_word` or `offset`.
    pub kind: String,
    pub items: Vec<String>,
}

impl GameBatch {
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(lines) | Self::Offsets(lines) => lines.len(),
            Self::Letters(lines) => lines.len(),
            Self::Words(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index a player has to pick on each line, in order.
    pub fn answers(&self) -> Vec<usize> {
        match self {
            Self::Numbers(lines) | Self::Offsets(lines) => {
                lines.iter().map(|line| line.error_index).collect()
            }
            Self::Letters(lines) => lines.iter().map(|line| line.error_index).collect(),
            Self::Words(lines) => lines.iter().map(|line| line.odd_index).collect(),
        }
    }

    pub fn rows(&self) -> Vec<BatchRow> {
        match self {
            Self::Numbers(lines) => lines.iter().map(sequence_row).collect(),
            Self::Letters(lines) => lines.iter().map(sequence_row).collect(),
            Self::Offsets(lines) => lines
                .iter()
                .map(|line| BatchRow {
                    kind: "offset".to_string(),
                    ..sequence_row(line)
                })
                .collect(),
            Self::Words(lines) => lines
                .iter()
                .map(|line| BatchRow {
                    answer: line.odd_index,
                    kind: "odd_word".to_string(),
                    items: line.items.clone(),
                })
                .collect(),
        }
    }
}

fn sequence_row<E: ToString>(line: &Line<E>) -> BatchRow {
    BatchRow {
        answer: line.error_index,
        kind: line
            .anomaly
            .map(|anomaly| anomaly.as_str().to_string())
            .unwrap_or_default(),
        items: line.items.iter().map(ToString::to_string).collect(),
    }
}

/// One game's batch together with the seed it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRun {
    pub game: GameId,
    pub seed: u32,
    pub batch: GameBatch,
}

/// Generate a game's batch from its compiled-in settings plus `overrides`.
pub fn generate_game(game: GameId, overrides: GameOverrides) -> Result<GameRun> {
    let seed = overrides.seed.unwrap_or_else(|| game.default_seed());
    let lines = overrides.lines.unwrap_or(GAME_TOTAL);
    let config = LineConfig::new(lines, seed);

    let batch = match game {
        GameId::NumberDetective => {
            GameBatch::Numbers(NumericSequenceGenerator::generate(NUMBER_DETECTIVE_RANGE, &config)?)
        }
        GameId::LetterDetective => GameBatch::Letters(LetterSequenceGenerator::generate(&config)?),
        GameId::WordDetective => GameBatch::Words(WordSetGenerator::generate(
            &RhymeDictionary::builtin(),
            &WordSetConfig { lines, seed },
        )?),
        GameId::FreezeMath => {
            GameBatch::Offsets(PairedOffsetGenerator::generate(FREEZE_MATH_RANGE, &config)?)
        }
    };

    info!(
        game = %game,
        generator = game.generator_id(),
        seed,
        lines = batch.len(),
        "game batch generated"
    );
    Ok(GameRun { game, seed, batch })
}

#[cfg(test)]
mod tests {
    use oddline_core::GenerationError;

    use super::*;

    #[test]
    fn game_ids_round_trip_through_strings() {
        for game in GameId::ALL {
            assert_eq!(game.as_str().parse::<GameId>(), Ok(game));
        }
        assert_eq!(
            "chess".parse::<GameId>(),
            Err(ParseGameIdError("chess".to_string()))
        );
    }

    #[test]
    fn defaults_produce_full_batches() {
        for game in GameId::ALL {
            let run = generate_game(game, GameOverrides::default()).expect("compiled config");
            assert_eq!(run.seed, game.default_seed());
            assert_eq!(run.batch.len(), GAME_TOTAL);
            assert_eq!(run.batch.answers().len(), GAME_TOTAL);
        }
    }

    #[test]
    fn overrides_replace_seed_and_lines() {
        let overrides = GameOverrides {
            seed: Some(99),
            lines: Some(4),
        };
        let run = generate_game(GameId::LetterDetective, overrides).expect("valid overrides");
        assert_eq!(run.seed, 99);
        assert_eq!(run.batch.len(), 4);
    }

    #[test]
    fn zero_lines_is_rejected() {
        let overrides = GameOverrides {
            seed: None,
            lines: Some(0),
        };
        assert_eq!(
            generate_game(GameId::WordDetective, overrides),
            Err(GenerationError::NonPositiveCount(0))
        );
    }

    #[test]
    fn rows_carry_answers_and_kinds() {
        let run = generate_game(GameId::NumberDetective, GameOverrides::default())
            .expect("compiled config");
        let rows = run.batch.rows();
        assert_eq!(rows[0].kind, "missing");
        assert_eq!(rows[1].kind, "double");
        assert_eq!(rows[2].kind, "order");
        assert_eq!(
            rows.iter().map(|row| row.answer).collect::<Vec<_>>(),
            run.batch.answers()
        );

        let run =
            generate_game(GameId::FreezeMath, GameOverrides::default()).expect("compiled config");
        assert!(run.batch.rows().iter().all(|row| row.kind == "offset"));
    }
}
