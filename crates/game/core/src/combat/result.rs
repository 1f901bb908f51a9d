//! Resolver output: a battle result plus the deltas the caller commits.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::{Combatant, CombatantId, Guard};

/// Which of the two resolver inputs a delta applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    Attacker,
    Target,
}

/// What an action did, for logs and presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub attacker: CombatantId,
    /// Combatant the effect landed on. Equals `attacker` for heal, dodge and block.
    pub target: CombatantId,
    pub damage: u32,
    pub healed: u32,
    pub dodged: bool,
    pub blocked: bool,
    pub dodge_attempted: bool,
    pub block_attempted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpChange {
    pub role: Role,
    pub combatant: CombatantId,
    pub original_hp: u32,
    pub new_hp: u32,
}

/// Cooldown written to the attacker's skill slot on activation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownUpdate {
    pub combatant: CombatantId,
    pub slot: usize,
    pub new_cooldown: u32,
}

/// Guard state a combatant holds once the action is committed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardChange {
    pub role: Role,
    pub combatant: CombatantId,
    pub guard: Guard,
}

pub type CooldownUpdates = ArrayVec<CooldownUpdate, { BattleConfig::LOADOUT_SIZE }>;
pub type GuardChanges = ArrayVec<GuardChange, 2>;

/// Full resolver output. Nothing is applied until [`ActionOutcome::apply`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub result: BattleResult,
    pub hp_change: Option<HpChange>,
    pub cooldown_updates: CooldownUpdates,
    pub guard_changes: GuardChanges,
}

impl ActionOutcome {
    pub(crate) fn new(result: BattleResult) -> Self {
        Self {
            result,
            hp_change: None,
            cooldown_updates: ArrayVec::new(),
            guard_changes: ArrayVec::new(),
        }
    }

    /// Commits every delta to the combatants the action was resolved against.
    ///
    /// `attacker` and `target` must be the same combatants passed to the
    /// resolver; roles, not ids, select which one a delta touches.
    pub fn apply(&self, attacker: &mut Combatant, target: &mut Combatant) {
        if let Some(change) = &self.hp_change {
            match change.role {
                Role::Attacker => attacker.set_hp(change.new_hp),
                Role::Target => target.set_hp(change.new_hp),
            }
        }
        for update in &self.cooldown_updates {
            attacker.set_cooldown(update.slot, update.new_cooldown);
        }
        for change in &self.guard_changes {
            match change.role {
                Role::Attacker => attacker.guard = change.guard,
                Role::Target => target.guard = change.guard,
            }
        }
    }

    /// True when the action left the combatant in `role` at 0 HP.
    pub fn defeated(&self, role: Role) -> bool {
        self.hp_change
            .as_ref()
            .is_some_and(|change| change.role == role && change.new_hp == 0)
    }
}
