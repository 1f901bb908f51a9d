//! Combat resolution.
//!
//! Pure functions only: the resolver reads combatants and returns deltas, the
//! engine decides when to commit them.
//!
//! - `resolve`: one action against one target
//! - `defense_check`: dodge / block / ambient ladder for an incoming attack
//! - `ActionOutcome::apply`: commits the deltas

pub mod defense;
pub mod resolve;
pub mod result;

pub use defense::{DefenseOutcome, defense_check, scale_damage};
pub use resolve::{check_action, resolve};
pub use result::{
    ActionOutcome, BattleResult, CooldownUpdate, CooldownUpdates, GuardChange, GuardChanges,
    HpChange, Role,
};
