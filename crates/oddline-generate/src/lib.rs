//! Deterministic puzzle-line generation for oddline.
//!
//! Every generator validates its configuration first, then draws from a
//! random stream seeded for that call alone, and returns a batch in which
//! each line carries exactly one anomaly.

pub mod catalog;
pub mod facts;
pub mod letters;
pub mod numeric;
pub mod output;
pub mod paired;
pub mod report;
mod sequence;
pub mod words;

pub use catalog::{
    BatchRow, GameBatch, GameId, GameOverrides, GameRun, ParseGameIdError, generate_game,
};
pub use facts::{FactConfig, FactGenerator};
pub use letters::LetterSequenceGenerator;
pub use numeric::NumericSequenceGenerator;
pub use paired::PairedOffsetGenerator;
pub use report::{BatchReport, fingerprint};
pub use words::{RhymeDictionary, RhymeFamily, WordSetConfig, WordSetGenerator};
