//! RNG oracle for deterministic random number generation.
//!
//! Battle rolls never touch a global generator. Each roll derives its own seed
//! from the session seed, a per-step nonce, the acting side and a
//! [`RollContext`], then asks a stateless [`RngOracle`] for a value. Given the
//! same seed and nonce the resolver therefore produces the same outcome.

use std::sync::atomic::{AtomicUsize, Ordering};

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform draw in `[0, 1)`.
    fn roll_unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let scaled = (self.roll_unit(seed) * len as f64) as usize;
        scaled.min(len - 1)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output: xorshift high bits, then rotate by the top five bits.
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

/// Compute a deterministic per-roll seed.
///
/// * `game_seed` - session seed fixed at battle setup
/// * `nonce` - step sequence number, advanced for every resolved step
/// * `actor` - acting side slot (player 0, enemy 1)
/// * `context` - distinguishes several rolls inside the same step
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Purpose of a roll; folded into the seed so rolls in one step are independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum RollContext {
    QueuedDodge = 0,
    AmbientDodge = 1,
    AmbientBlock = 2,
    PolicySkillUse = 3,
    PolicyPick = 4,
    EnemyHpScale = 5,
    EnemyAttackScale = 6,
}

/// Roll source for one resolution step.
#[derive(Clone, Copy)]
pub struct Dice<'a> {
    oracle: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    actor: u32,
}

impl<'a> Dice<'a> {
    pub fn new(oracle: &'a dyn RngOracle, game_seed: u64, nonce: u64, actor: u32) -> Self {
        Self {
            oracle,
            game_seed,
            nonce,
            actor,
        }
    }

    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    fn seed(&self, context: RollContext) -> u64 {
        compute_seed(self.game_seed, self.nonce, self.actor, context as u32)
    }

    /// Uniform draw in `[0, 1)`.
    pub fn roll(&self, context: RollContext) -> f64 {
        self.oracle.roll_unit(self.seed(context))
    }

    /// Strict `draw < chance`. A chance of 1.0 succeeds even against an
    /// out-of-range scripted draw; 0.0 never does. Always consumes one draw.
    pub fn chance(&self, context: RollContext, chance: f64) -> bool {
        let draw = self.roll(context);
        chance >= 1.0 || draw < chance
    }

    pub fn pick(&self, context: RollContext, len: usize) -> usize {
        self.oracle.pick_index(self.seed(context), len)
    }
}

impl std::fmt::Debug for Dice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dice")
            .field("game_seed", &self.game_seed)
            .field("nonce", &self.nonce)
            .field("actor", &self.actor)
            .finish()
    }
}

/// Oracle whose every unit draw is the same value.
///
/// Useful for forcing outcomes: `FixedRoll(0.99)` makes every chance below
/// 0.99 fail, `FixedRoll(0.0)` makes every non-zero chance succeed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRoll(pub f64);

impl RngOracle for FixedRoll {
    fn next_u32(&self, _seed: u64) -> u32 {
        (self.0.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32
    }

    fn roll_unit(&self, _seed: u64) -> f64 {
        self.0
    }
}

/// Oracle that replays a fixed list of unit draws in call order.
///
/// Seeds are ignored. Once the script runs out every draw returns the
/// fallback value (0.999 unless changed with [`ScriptedRolls::then_always`]).
#[derive(Debug)]
pub struct ScriptedRolls {
    draws: Vec<f64>,
    cursor: AtomicUsize,
    fallback: f64,
}

impl ScriptedRolls {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: AtomicUsize::new(0),
            fallback: 0.999,
        }
    }

    #[must_use]
    pub fn then_always(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of draws consumed so far, including fallback draws.
    pub fn draws_taken(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RngOracle for ScriptedRolls {
    fn next_u32(&self, seed: u64) -> u32 {
        (self.roll_unit(seed).clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32
    }

    fn roll_unit(&self, _seed: u64) -> f64 {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.draws.get(index).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn unit_draws_stay_in_half_open_interval() {
        let rng = PcgRng;
        for seed in 0..1_000u64 {
            let draw = rng.roll_unit(compute_seed(7, seed, 0, 0));
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        let rng = PcgRng;
        for seed in 0..500u64 {
            assert!(rng.pick_index(seed, 3) < 3);
        }
        assert_eq!(FixedRoll(0.999).pick_index(0, 4), 3);
        assert_eq!(FixedRoll(0.0).pick_index(0, 4), 0);
        assert_eq!(PcgRng.pick_index(9, 0), 0);
    }

    #[test]
    fn compute_seed_separates_contexts() {
        let a = compute_seed(1, 10, 0, RollContext::AmbientDodge as u32);
        let b = compute_seed(1, 10, 0, RollContext::AmbientBlock as u32);
        let c = compute_seed(1, 10, 1, RollContext::AmbientDodge as u32);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn dice_chance_is_strict() {
        let always = FixedRoll(0.5);
        let dice = Dice::new(&always, 0, 0, 0);
        assert!(!dice.chance(RollContext::QueuedDodge, 0.5));
        assert!(dice.chance(RollContext::QueuedDodge, 0.51));

        let zero = FixedRoll(0.0);
        let dice = Dice::new(&zero, 0, 0, 0);
        assert!(!dice.chance(RollContext::QueuedDodge, 0.0));

        let top = FixedRoll(1.0);
        let dice = Dice::new(&top, 0, 0, 0);
        assert!(dice.chance(RollContext::QueuedDodge, 1.0));
    }

    #[test]
    fn scripted_rolls_replay_in_order_then_fall_back() {
        let script = ScriptedRolls::new(vec![0.1, 0.7]).then_always(0.5);
        let dice = Dice::new(&script, 99, 3, 1);
        assert_eq!(dice.roll(RollContext::AmbientDodge), 0.1);
        assert_eq!(dice.roll(RollContext::AmbientBlock), 0.7);
        assert_eq!(dice.roll(RollContext::AmbientBlock), 0.5);
        assert_eq!(script.draws_taken(), 3);
    }
}
