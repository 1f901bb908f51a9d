//! Structured turn output for presentation layers.

use arrayvec::ArrayVec;

use crate::action::{Action, Side};
use crate::combat::ActionOutcome;
use crate::state::{CombatantId, Guard, RunStats};

/// One resolved action within a turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStep {
    pub side: Side,
    pub action: Action,
    pub outcome: ActionOutcome,
}

/// A guard that lapsed unused after an opposing action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardExpiry {
    pub side: Side,
    pub combatant: CombatantId,
    pub guard: Guard,
}

/// State transition evaluated at the end of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum TurnTransition {
    Continue,
    /// The player's active combatant fell and the next member stepped in.
    CombatantSwitched { from: CombatantId, to: CombatantId },
    /// The enemy fell and a freshly generated one took its place.
    EnemyReplaced {
        defeated: CombatantId,
        replacement: CombatantId,
    },
    /// The encounter limit was reached.
    RunWon,
    /// The player's whole team is down.
    RunLost,
}

impl TurnTransition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::CombatantSwitched { .. } => "combatant_switched",
            Self::EnemyReplaced { .. } => "enemy_replaced",
            Self::RunWon => "run_won",
            Self::RunLost => "run_lost",
        }
    }

    pub const fn ends_run(&self) -> bool {
        matches!(self, Self::RunWon | Self::RunLost)
    }
}

/// Everything that happened in one turn, in resolution order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub player_action: Action,
    pub enemy_action: Action,
    pub steps: ArrayVec<TurnStep, 2>,
    /// Side whose action was skipped because it fell first.
    pub skipped: Option<Side>,
    pub expired_guards: ArrayVec<GuardExpiry, 2>,
    pub transition: TurnTransition,
    /// Progression counters after the transition.
    pub run: RunStats,
}

impl TurnReport {
    pub fn step(&self, side: Side) -> Option<&TurnStep> {
        self.steps.iter().find(|step| step.side == side)
    }
}
