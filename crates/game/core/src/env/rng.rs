//! RNG oracle for combat rolls.
//!
//! Rolls are pure functions of a seed: the combat mixes its session seed, a
//! resolution counter, the acting side and a roll context into one `u64`
//! (see [`compute_seed`]) and asks the oracle for a value. Replaying a fight
//! with the same seed and the same inputs reproduces every dodge, crit and
//! mitigation roll.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform percentage in `[0, 100)`.
    ///
    /// Chance checks succeed when the roll is strictly below the chance.
    fn roll_percent(&self, seed: u64) -> f64 {
        self.unit(seed) * 100.0
    }

    /// Uniform value between `low` and `high`.
    fn uniform(&self, seed: u64, low: f64, high: f64) -> f64 {
        low + (high - low) * self.unit(seed)
    }

    /// Pick an index with probability proportional to its weight.
    ///
    /// Returns `None` when every weight is zero.
    fn weighted_index(&self, seed: u64, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }
        let mut pick = u64::from(self.next_u32(seed)) % total;
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if pick < weight {
                return Some(index);
            }
            pick -= weight;
        }
        None
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state, one multiply, one
/// xorshift and one rotate per value.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll contexts, so several rolls within one resolution stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Dodge = 0,
    Crit = 1,
    Block = 2,
    MagicResist = 3,
    Loot = 4,
}

/// Compute a deterministic seed from combat state components.
///
/// * `session_seed` - Seed chosen when the session started
/// * `nonce` - Resolution counter (increments on every bar fill)
/// * `actor` - 0 for the player, 1 for the opponent
/// * `context` - Which roll inside the resolution
pub fn compute_seed(session_seed: u64, nonce: u64, actor: u32, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context as u32).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
