//! Deterministic pseudo-random source used by every stochastic step.
//!
//! A string seed is hashed to 128 bits (cyrb128) and the hash feeds a ChaCha8
//! stream, so identical seeds always replay identical simulations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when no seed is configured.
pub const DEFAULT_SEED: &str = "initialseed";

const ID_SYMBOLS: &[u8] = b"useandom26T198340PX75pxJACKVERYMINDBUSHWOLFGQZbfghjklqvwyzrict";
const ID_LEN: usize = 16;

/// 128-bit string hash over UTF-16 code units.
pub fn cyrb128(value: &str) -> [u32; 4] {
    let mut h1: u32 = 1_779_033_703;
    let mut h2: u32 = 3_144_134_277;
    let mut h3: u32 = 1_013_904_242;
    let mut h4: u32 = 2_773_480_762;
    for k in value.encode_utf16().map(u32::from) {
        h1 = h2 ^ (h1 ^ k).wrapping_mul(597_399_067);
        h2 = h3 ^ (h2 ^ k).wrapping_mul(2_869_860_233);
        h3 = h4 ^ (h3 ^ k).wrapping_mul(951_274_213);
        h4 = h1 ^ (h4 ^ k).wrapping_mul(2_716_044_179);
    }
    h1 = (h3 ^ (h1 >> 18)).wrapping_mul(597_399_067);
    h2 = (h4 ^ (h2 >> 22)).wrapping_mul(2_869_860_233);
    h3 = (h1 ^ (h3 >> 17)).wrapping_mul(951_274_213);
    h4 = (h2 ^ (h4 >> 19)).wrapping_mul(2_716_044_179);
    [h1 ^ h2 ^ h3 ^ h4, h2 ^ h1, h3 ^ h1, h4 ^ h1]
}

fn seed_material(seed: &str) -> u64 {
    let [a, b, _, _] = cyrb128(seed);
    (u64::from(a) << 32) | u64::from(b)
}

/// Seedable random stream owned by one simulation instance.
#[derive(Clone, Debug)]
pub struct SimRng {
    seed: String,
    inner: ChaCha8Rng,
}

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl SimRng {
    /// Create a stream from a string seed.
    pub fn seeded(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            inner: ChaCha8Rng::seed_from_u64(seed_material(seed)),
        }
    }

    /// Reset the stream as if freshly created from `seed`.
    pub fn reseed(&mut self, seed: &str) {
        *self = Self::seeded(seed);
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Uniform float in [0, 1).
    pub fn random01(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.random01() * (max - min) + min
    }

    /// Uniform integer in [min, max] inclusive. Reversed bounds are swapped.
    pub fn range_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.gen_range(lo..=hi)
    }

    /// Bernoulli trial with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.random01() < p
    }

    /// 16-symbol identifier. Collision tolerant, not cryptographically secure.
    pub fn unique_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| {
                let idx = self.inner.gen_range(0..ID_SYMBOLS.len());
                char::from(ID_SYMBOLS[idx])
            })
            .collect()
    }

    /// Uniformly pick one element, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.inner.gen_range(0..items.len());
        items.get(idx)
    }
}
