// Deterministic pseudo-random source for progression generation.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// The generator is a plain value owned by whoever drives a generation run:
// `cantus_theory::progression` borrows it as `&mut CantusRng` for each call
// and never stores it, so there is no process-wide random state. Two runs
// started from the same seed produce the same phrases on every platform.
//
// The state is serde-serializable so a caller can checkpoint a run between
// `generate_progression` calls and resume it later with identical output.
//
// **Critical constraint: determinism.** No floating-point arithmetic, no
// platform-dependent integer widths in the core step, and no reading of
// ambient entropy anywhere in this crate.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ generator with a 256-bit state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantusRng {
    s: [u64; 4],
}

impl CantusRng {
    /// Create a generator seeded from a `u64`.
    ///
    /// SplitMix64 expands the seed into the four state words, so nearby seeds
    /// (0, 1, 2, ...) still give unrelated streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Advance the state by one xoshiro256++ step and return its output word.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform draw from the half-open range `low..high`; `high` must exceed
    /// `low`.
    ///
    /// A width that is a power of two is served by masking one output word.
    /// Any other width discards the few lowest output words that would make
    /// `r % width` favour small results, so every residue is equally likely.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: empty range {low}..{high}");
        let width = high - low;
        if width.is_power_of_two() {
            return low + (self.next_u64() & (width - 1));
        }
        // 2^64 mod width: the size of the incomplete block at the bottom.
        let skip_below = width.wrapping_neg() % width;
        loop {
            let r = self.next_u64();
            if r >= skip_below {
                return low + r % width;
            }
        }
    }

    /// `range_u64` for index-sized values.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Uniform draw from `low..=high`. Used for phrase length thresholds.
    pub fn range_usize_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "range_usize_inclusive: empty range {low}..={high}");
        self.range_u64(low as u64, high as u64 + 1) as usize
    }

    /// Pick one element uniformly. Returns `None` for an empty slice and
    /// consumes no randomness in that case.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_usize(0, items.len());
        items.get(idx)
    }
}

/// One SplitMix64 output; `new` calls it four times to fill the state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
