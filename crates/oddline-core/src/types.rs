use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a sequence line breaks its ascending-by-one pattern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    /// One step of the progression is skipped.
    Missing,
    /// One value is repeated before the progression resumes.
    Double,
    /// Two adjacent values are transposed.
    Order,
}

impl AnomalyType {
    /// Rotation used to assign types to lines of a batch.
    pub const CYCLE: [AnomalyType; 3] = [Self::Missing, Self::Double, Self::Order];

    /// Type assigned to the line at `index` of a batch.
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Double => "double",
            Self::Order => "order",
        }
    }

    /// Neighbour differences that deviate from `+1`, starting at the error index.
    pub fn signature(&self) -> &'static [i64] {
        match self {
            Self::Missing => &[2],
            Self::Double => &[0, 2],
            Self::Order => &[-1, 2],
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Items whose position in an ordered progression can be measured.
pub trait Ordinal: Copy {
    fn ordinal(self) -> i64;
}

impl Ordinal for i64 {
    fn ordinal(self) -> i64 {
        self
    }
}

impl Ordinal for char {
    fn ordinal(self) -> i64 {
        i64::from(u32::from(self))
    }
}

/// One generated line with exactly one anomaly.
///
/// For the classified sequence generators `error_index` points into the
/// difference sequence (`0..items.len() - 1`); for the paired-offset
/// generator, which carries no `anomaly`, it is the perturbed item itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Line<E> {
    pub items: Vec<E>,
    pub error_index: usize,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<AnomalyType>,
}

impl<E: Ordinal> Line<E> {
    /// Consecutive differences `items[i + 1] - items[i]`.
    pub fn differences(&self) -> Vec<i64> {
        self.items
            .windows(2)
            .map(|pair| pair[1].ordinal() - pair[0].ordinal())
            .collect()
    }
}

/// A rhyme-set line: five words of one family plus one odd word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordLine {
    pub items: Vec<String>,
    pub odd_index: usize,
    /// Rhyme family key the regular words were drawn from.
    pub rhyme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

/// A single arithmetic fact such as `3 + 4 = 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fact {
    pub a: u32,
    pub b: u32,
    pub op: Operator,
    pub answer: u32,
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.a, self.op.symbol(), self.b, self.answer)
    }
}

/// Classify a difference sequence that should contain exactly one anomaly.
///
/// Returns the anomaly type and its position when every difference is `+1`
/// except for one exact signature, and `None` otherwise.
pub fn classify_differences(diffs: &[i64]) -> Option<(AnomalyType, usize)> {
    let deviations: Vec<(usize, i64)> = diffs
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, diff)| *diff != 1)
        .collect();

    match deviations.as_slice() {
        [(at, 2)] => Some((AnomalyType::Missing, *at)),
        [(at, 0), (next, 2)] if *next == at + 1 => Some((AnomalyType::Double, *at)),
        [(at, -1), (next, 2)] if *next == at + 1 => Some((AnomalyType::Order, *at)),
        _ => None,
    }
}
