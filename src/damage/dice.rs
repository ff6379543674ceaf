//! Seedable dice
//!
//! Every roll goes through a `Dice` handle the caller owns, so a game
//! replays exactly from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Six-sided dice over a deterministic generator
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    /// Sum of `dice` rolls of 1..=6
    pub fn d6(&mut self, dice: u32) -> u32 {
        (0..dice).map(|_| self.rng.gen_range(1..=6)).sum()
    }

    pub fn roll_2d6(&mut self) -> u32 {
        self.d6(2)
    }

    /// Even-odds tie breaker
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

/// Percent chance of rolling `n` or better on 2d6
pub fn odds_above(n: i32) -> f64 {
    const ODDS: [f64; 13] = [
        100.0, 100.0, 100.0, 97.2, 91.6, 83.3, 72.2, 58.3, 41.6, 27.7, 16.6, 8.3, 2.78,
    ];
    if n <= 2 {
        100.0
    } else if n > 12 {
        0.0
    } else {
        ODDS[n as usize]
    }
}

/// Probability of rolling exactly `n` on 2d6
pub fn odds_of(n: i32) -> f64 {
    match n {
        2..=7 => (n - 1) as f64 / 36.0,
        8..=12 => (13 - n) as f64 / 36.0,
        _ => 0.0,
    }
}
