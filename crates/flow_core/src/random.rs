//! Pluggable uniform random source.
//!
//! Every stochastic decision in the crate goes through [RandomSource] so a
//! seeded or scripted source makes runs reproducible.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

pub trait RandomSource: Send {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty pool");
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Uniform integer in `[low, low + span)`, i.e. `floor(r * span) + low`.
    fn offset_int(&mut self, span: u32, low: i64) -> i64 {
        (self.next_unit() * f64::from(span)).floor() as i64 + low
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen()
    }
}

/// Seeded RNG when `seed` is set, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
