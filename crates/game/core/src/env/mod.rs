//! External sources the battle rules consult but never own.
//!
//! [`BattleEnv`] bundles them so the engine takes a single handle: the RNG
//! oracle, the enemy's action policy, the enemy generator and the balance
//! config.
mod rng;
mod spawn;

pub use rng::{Dice, FixedRoll, PcgRng, RngOracle, RollContext, ScriptedRolls, compute_seed};
pub use spawn::{EnemyGenerator, WildEnemyGenerator};

use crate::ai::ActionPolicy;
use crate::config::BattleConfig;

/// Borrowed view of every collaborator the engine needs for one call.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub rng: &'a dyn RngOracle,
    pub policy: &'a dyn ActionPolicy,
    pub generator: &'a dyn EnemyGenerator,
    pub config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        rng: &'a dyn RngOracle,
        policy: &'a dyn ActionPolicy,
        generator: &'a dyn EnemyGenerator,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            rng,
            policy,
            generator,
            config,
        }
    }

    /// Dice for a step taken by `actor` at `nonce`.
    pub fn dice(&self, seed: u64, nonce: u64, actor: u32) -> Dice<'a> {
        Dice::new(self.rng, seed, nonce, actor)
    }
}
