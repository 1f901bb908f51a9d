//! Deterministic battle rules for a monster-collection arena.
//!
//! `battle-core` defines the combatant model, the action resolver, the
//! turn orchestrator, the wild-monster policy and run progression. All
//! session mutation flows through [`engine::BattleEngine`] (usually via
//! [`engine::BattleSession`]); the resolver itself is pure and returns
//! deltas. Randomness comes from a seeded [`env::RngOracle`], so identical
//! seeds and submissions replay identically.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{Action, ActionKind, ResolveError, Side};
pub use ai::{ActionPolicy, ScriptedPolicy, WildMonsterPolicy};
pub use combat::{
    ActionOutcome, BattleResult, CooldownUpdate, GuardChange, HpChange, Role, check_action,
    resolve,
};
pub use config::{AmbientDefense, BattleConfig, ConfigError, EnemyTuning};
pub use engine::{
    BattleEngine, BattleSession, BattleSessionBuilder, Carryover, GuardExpiry, SetupError,
    TurnError, TurnReport, TurnStep, TurnTransition,
};
pub use env::{
    BattleEnv, Dice, EnemyGenerator, FixedRoll, PcgRng, RngOracle, RollContext, ScriptedRolls,
    WildEnemyGenerator, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleState, Combatant, CombatantId, CooldownSlots, ElementType, Guard, MatchOutcome,
    PendingTurn, Rarity, RunStats, Skill, SkillKind, SkillLoadout, SkillRange, TurnPhase,
};
