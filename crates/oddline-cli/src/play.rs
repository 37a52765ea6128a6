use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use oddline_generate::{BatchRow, GameId, GameRun};

use crate::timer::PausableTimer;

/// Shortest freeze before play may resume: three slow breaths.
pub const BREATH_MS: i64 = 3_000;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("round already finished")]
    Finished,
    #[error("round needs at least one line (got {total} of {available})")]
    EmptyRound { total: usize, available: usize },
    #[error("round is frozen")]
    Frozen,
    #[error("round is not frozen")]
    NotFrozen,
    #[error("{0} has no freeze")]
    FreezeUnavailable(GameId),
    #[error("keep breathing for another {remaining_ms} ms")]
    StillBreathing { remaining_ms: i64 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Record handed to whatever persists completed sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub game_id: GameId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Correct picks; every line needs one to advance.
    pub score: usize,
    pub total: usize,
    /// Wrong picks along the way.
    pub mistakes: usize,
    /// Play time with frozen stretches left out.
    pub active_ms: i64,
    pub perfect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Correct { line: usize },
    Retry { line: usize },
    Finished(SessionSummary),
}

/// One pass over a batch: the player must pick each line's answer to advance.
#[derive(Debug, Clone)]
pub struct Round {
    game: GameId,
    answers: Vec<usize>,
    current: usize,
    score: usize,
    mistakes: usize,
    started_at: DateTime<Utc>,
    timer: PausableTimer,
    frozen_at: Option<DateTime<Utc>>,
    finished: bool,
}

impl Round {
    pub fn new(
        game: GameId,
        mut answers: Vec<usize>,
        total: usize,
        started_at: DateTime<Utc>,
    ) -> Result<Self, PlayError> {
        if total == 0 || total > answers.len() {
            return Err(PlayError::EmptyRound {
                total,
                available: answers.len(),
            });
        }
        answers.truncate(total);
        Ok(Self {
            game,
            answers,
            current: 0,
            score: 0,
            mistakes: 0,
            started_at,
            timer: PausableTimer::start(started_at),
            frozen_at: None,
            finished: false,
        })
    }

    pub fn from_run(run: &GameRun, started_at: DateTime<Utc>) -> Result<Self, PlayError> {
        let answers = run.batch.answers();
        let total = answers.len();
        Self::new(run.game, answers, total, started_at)
    }

    /// Line awaiting a selection, or `None` once the round is over.
    pub fn current_line(&self) -> Option<usize> {
        (!self.finished).then_some(self.current)
    }

    pub fn total(&self) -> usize {
        self.answers.len()
    }

    /// Running time so far, frozen stretches excluded.
    pub fn active_ms(&self, now: DateTime<Utc>) -> i64 {
        self.timer.elapsed(now).num_milliseconds()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Apply a selection on the current line.
    ///
    /// A wrong pick keeps the line and counts a mistake. The pick that solves
    /// the last line closes the round and yields its summary.
    pub fn select(&mut self, index: usize, now: DateTime<Utc>) -> Result<Selection, PlayError> {
        if self.finished {
            return Err(PlayError::Finished);
        }
        if self.is_frozen() {
            return Err(PlayError::Frozen);
        }

        let line = self.current;
        if self.answers[line] != index {
            self.mistakes += 1;
            return Ok(Selection::Retry { line });
        }

        self.score += 1;
        self.current += 1;
        if self.current < self.answers.len() {
            return Ok(Selection::Correct { line });
        }

        self.finished = true;
        Ok(Selection::Finished(self.summary(now)))
    }

    /// Stop the clock. Only freeze-math offers this.
    pub fn freeze(&mut self, now: DateTime<Utc>) -> Result<(), PlayError> {
        if self.finished {
            return Err(PlayError::Finished);
        }
        if self.game != GameId::FreezeMath {
            return Err(PlayError::FreezeUnavailable(self.game));
        }
        if self.is_frozen() {
            return Err(PlayError::Frozen);
        }
        self.timer.pause(now);
        self.frozen_at = Some(now);
        Ok(())
    }

    /// Restart the clock once the breathing pause has run its course.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), PlayError> {
        if self.finished {
            return Err(PlayError::Finished);
        }
        let frozen_at = self.frozen_at.ok_or(PlayError::NotFrozen)?;
        let breathed = (now - frozen_at).num_milliseconds();
        if breathed < BREATH_MS {
            return Err(PlayError::StillBreathing {
                remaining_ms: BREATH_MS - breathed,
            });
        }
        self.timer.resume(now);
        self.frozen_at = None;
        Ok(())
    }

    fn summary(&mut self, completed_at: DateTime<Utc>) -> SessionSummary {
        let total = self.answers.len();
        SessionSummary {
            id: format!("sess-{}", completed_at.timestamp_millis()),
            game_id: self.game,
            started_at: self.started_at,
            completed_at,
            score: self.score,
            total,
            mistakes: self.mistakes,
            active_ms: self.timer.stop(completed_at).num_milliseconds(),
            perfect: self.score == total,
        }
    }
}

enum Command {
    Pick(usize),
    Freeze,
    Resume,
}

/// Drive a round from line-oriented input.
///
/// Each input line is a 1-based pick, `freeze` or `resume`. Returns `None`
/// when input ends before the round is finished.
pub fn play_session<R, W, C>(
    run: &GameRun,
    input: R,
    mut output: W,
    clock: C,
) -> Result<Option<SessionSummary>, PlayError>
where
    R: BufRead,
    W: Write,
    C: Fn() -> DateTime<Utc>,
{
    let rows = run.batch.rows();
    let mut round = Round::from_run(run, clock())?;
    info!(game = %run.game, seed = run.seed, total = round.total(), "session started");

    writeln!(output, "{}", run.game.title())?;
    writeln!(output, "{}", run.game.instructions())?;
    print_line(&mut output, &rows, 0, round.total())?;

    let mut lines = input.lines();
    while let Some(line) = round.current_line() {
        let Some(raw) = lines.next() else {
            writeln!(output, "Stopped on line {} of {}.", line + 1, round.total())?;
            info!(game = %run.game, line, "session abandoned");
            return Ok(None);
        };
        let raw = raw?;
        let width = rows[line].items.len();
        let Some(command) = parse_command(&raw, width) else {
            writeln!(output, "Enter a number between 1 and {width}.")?;
            continue;
        };

        let pick = match command {
            Command::Pick(pick) => pick,
            Command::Freeze => {
                match round.freeze(clock()) {
                    Ok(()) => writeln!(output, "Freeze! Take 3 deep breaths, then type resume.")?,
                    Err(PlayError::FreezeUnavailable(_)) => {
                        writeln!(output, "Freeze is only available in Freeze Math.")?
                    }
                    Err(PlayError::Frozen) => writeln!(output, "Already frozen.")?,
                    Err(err) => return Err(err),
                }
                continue;
            }
            Command::Resume => {
                let now = clock();
                match round.resume(now) {
                    Ok(()) => {
                        let seconds = round.active_ms(now) / 1_000;
                        writeln!(output, "Back to it. {seconds}s on the clock.")?;
                        print_line(&mut output, &rows, line, round.total())?;
                    }
                    Err(PlayError::StillBreathing { remaining_ms }) => {
                        let seconds = (remaining_ms + 999) / 1_000;
                        writeln!(output, "Keep breathing, {seconds}s to go.")?;
                    }
                    Err(PlayError::NotFrozen) => writeln!(output, "Nothing to resume.")?,
                    Err(err) => return Err(err),
                }
                continue;
            }
        };

        match round.select(pick, clock()) {
            Err(PlayError::Frozen) => {
                writeln!(output, "Frozen. Type resume to continue.")?;
            }
            Err(err) => return Err(err),
            Ok(Selection::Retry { line }) => {
                debug!(line, pick, "wrong pick");
                writeln!(output, "Try again.")?;
            }
            Ok(Selection::Correct { line }) => {
                writeln!(output, "Correct!")?;
                print_line(&mut output, &rows, line + 1, round.total())?;
            }
            Ok(Selection::Finished(summary)) => {
                writeln!(output, "Finished! Score {}/{}.", summary.score, summary.total)?;
                if summary.perfect && summary.mistakes == 0 {
                    writeln!(output, "Perfect score!")?;
                }
                info!(
                    game = %summary.game_id,
                    session = %summary.id,
                    score = summary.score,
                    mistakes = summary.mistakes,
                    active_ms = summary.active_ms,
                    "session completed"
                );
                return Ok(Some(summary));
            }
        }
    }
    Ok(None)
}

fn parse_command(raw: &str, width: usize) -> Option<Command> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("freeze") {
        return Some(Command::Freeze);
    }
    if raw.eq_ignore_ascii_case("resume") {
        return Some(Command::Resume);
    }
    let value: usize = raw.parse().ok()?;
    (1..=width)
        .contains(&value)
        .then(|| Command::Pick(value - 1))
}

fn print_line<W: Write>(
    output: &mut W,
    rows: &[BatchRow],
    line: usize,
    total: usize,
) -> io::Result<()> {
    let items = rows[line]
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}:{item}", index + 1))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(output, "Line {}/{}  {items}", line + 1, total)
}
