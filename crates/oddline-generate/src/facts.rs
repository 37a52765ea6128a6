use serde::{Deserialize, Serialize};
use tracing::debug;

use oddline_core::{Fact, Mulberry32, Operator, RandomSource, Result, validate_count};

pub const DEFAULT_COUNT: usize = 10;
pub const DEFAULT_SEED: u32 = 1;
pub const DEFAULT_MAX: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactConfig {
    pub count: usize,
    pub seed: u32,
    /// Largest sum and largest minuend allowed.
    pub max: u32,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: DEFAULT_SEED,
            max: DEFAULT_MAX,
        }
    }
}

/// Addition and subtraction facts that never leave `0..=max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactGenerator;

impl FactGenerator {
    pub const ID: &'static str = "arithmetic.facts";

    /// Operators alternate `+`, `-`, `+`, ... so a batch is balanced to within one.
    pub fn generate(config: &FactConfig) -> Result<Vec<Fact>> {
        validate_count(config.count)?;

        let mut rng = Mulberry32::new(config.seed);
        let facts: Vec<Fact> = (0..config.count)
            .map(|index| {
                let a = pick_up_to(&mut rng, config.max);
                if index % 2 == 0 {
                    let b = pick_up_to(&mut rng, config.max - a);
                    Fact {
                        a,
                        b,
                        op: Operator::Add,
                        answer: a + b,
                    }
                } else {
                    let b = pick_up_to(&mut rng, a);
                    Fact {
                        a,
                        b,
                        op: Operator::Subtract,
                        answer: a - b,
                    }
                }
            })
            .collect();

        debug!(
            generator = Self::ID,
            count = facts.len(),
            max = config.max,
            seed = config.seed,
            "facts generated"
        );
        Ok(facts)
    }
}

/// Uniform draw from `0..=limit`.
fn pick_up_to(rng: &mut impl RandomSource, limit: u32) -> u32 {
    let picked = rng.pick(u64::from(limit) + 1);
    u32::try_from(picked).unwrap_or(limit)
}
