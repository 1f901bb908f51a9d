//! Battle data model: skills, the combatants that carry them, and the
//! session state the engine advances turn by turn.
mod battle;
mod combatant;
mod run;
mod skill;

pub use battle::{BattleState, MatchOutcome, PendingTurn, TurnPhase};
pub use combatant::{Combatant, CombatantId, CooldownSlots, Guard, Rarity, SkillLoadout};
pub use run::RunStats;
pub use skill::{ElementType, InvalidRange, Skill, SkillKind, SkillRange};
