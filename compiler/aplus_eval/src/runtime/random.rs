//! The random link behind `roll` and `deal`.
//!
//! A multiplicative congruential generator: each draw multiplies the link by
//! 16807 modulo 2^31 - 1.

/// Default seed, also the multiplier.
pub const DEFAULT_SEED: u64 = 16807;

const MULTIPLIER: u64 = 16807;
const MODULUS: u64 = (1 << 31) - 1;

#[derive(Clone, Debug)]
pub struct RandomLink {
    link: u64,
}

impl RandomLink {
    /// Seeds outside `1..MODULUS` are folded into range.
    pub fn new(seed: u64) -> Self {
        let link = seed % MODULUS;
        RandomLink {
            link: if link == 0 { DEFAULT_SEED } else { link },
        }
    }

    /// Current state, A+'s `_rl`.
    pub fn link(&self) -> u64 {
        self.link
    }

    fn advance(&mut self) -> u64 {
        self.link = self.link * MULTIPLIER % MODULUS;
        self.link
    }

    /// Uniform draw from `0..bound`. `bound` must be positive.
    pub fn below(&mut self, bound: u64) -> u64 {
        let draw = u128::from(self.advance());
        let scaled = draw * u128::from(bound) / u128::from(MODULUS);
        u64::try_from(scaled).unwrap_or(0)
    }

    /// `count` distinct draws from `0..bound`.
    pub fn deal(&mut self, count: usize, bound: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..bound).collect();
        for i in 0..count.min(bound) {
            let remaining = u64::try_from(bound - i).unwrap_or(u64::MAX);
            let pick = i + usize::try_from(self.below(remaining)).unwrap_or(0);
            pool.swap(i, pick);
        }
        pool.truncate(count);
        pool
    }
}

impl Default for RandomLink {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
