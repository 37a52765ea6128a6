//! Seeded pseudo-random streams.
//!
//! Both generators are integer-only bit mixers over a single `u32` word, so a
//! seed yields the same draws on every platform. An instance belongs to one
//! generation call and is dropped when the call returns.

/// `2^32` as a float; dividing a `u32` by it lands in `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Replacement for a zero seed, which would pin xorshift at zero forever.
const ZERO_SEED: u32 = 1;

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Advance the stream once and return the next draw.
    fn next_f64(&mut self) -> f64;

    /// Draw an integer uniformly from `0..n`. Consumes exactly one draw.
    ///
    /// Returns 0 for `n == 0`.
    fn pick(&mut self, n: u64) -> u64 {
        let draw = self.next_f64();
        if n == 0 {
            return 0;
        }
        // Truncation is floor here since the product is non-negative.
        let value = (draw * n as f64) as u64;
        value.min(n - 1)
    }

    /// Draw an index uniformly from `0..len`.
    fn pick_index(&mut self, len: usize) -> usize {
        let picked = self.pick(len as u64);
        usize::try_from(picked).unwrap_or(0)
    }

    /// Draw an index uniformly from the inclusive window `low..=high`.
    fn pick_between(&mut self, low: usize, high: usize) -> usize {
        low + self.pick_index(high.saturating_sub(low) + 1)
    }
}

/// Marsaglia xorshift with the 13/17/5 triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }
}

impl RandomSource for Xorshift32 {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_RANGE
    }
}

/// Mulberry32: a Weyl increment followed by two multiply/xor-shift rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_RANGE
    }
}
