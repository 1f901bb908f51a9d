//! Session-level battle state owned by the caller and mutated by the engine.

use crate::action::Action;
use crate::state::{Combatant, RunStats};

/// Where the turn state machine currently stands.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnPhase {
    /// Waiting for the player's action.
    #[default]
    Selection,
    /// Both actions committed, waiting to be resolved.
    Resolution,
    /// The run is over; no further turns are accepted.
    Completed,
}

/// How a finished run ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MatchOutcome {
    PlayerWon,
    EnemyWon,
    /// Both sides fell in the same turn.
    Draw,
}

/// Actions locked in during selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTurn {
    pub player: Action,
    pub enemy: Action,
}

/// Everything a battle session needs between turns.
///
/// There is no ambient global state: callers hold this struct (usually
/// through `BattleSession`) and hand it to the engine for every turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Seed every roll of this battle derives from.
    pub seed: u64,
    /// Roll sequence number, advanced once per resolved step, policy call
    /// and enemy generation.
    pub nonce: u64,
    /// Number of the turn awaiting selection, starting at 1.
    pub turn: u32,
    pub team: Vec<Combatant>,
    /// Index of the player's active combatant in `team`.
    pub active: usize,
    pub enemy: Combatant,
    pub phase: TurnPhase,
    pub pending: Option<PendingTurn>,
    pub run: RunStats,
    /// Enemies generated so far in this session; feeds enemy ids.
    pub enemies_spawned: u32,
    pub outcome: Option<MatchOutcome>,
}

impl BattleState {
    /// Player's active combatant.
    ///
    /// `active` always indexes into `team`; setup rejects empty teams.
    pub fn player(&self) -> &Combatant {
        &self.team[self.active]
    }

    pub fn player_mut(&mut self) -> &mut Combatant {
        &mut self.team[self.active]
    }

    /// Team members still standing, the active one included.
    pub fn standing_members(&self) -> usize {
        self.team.iter().filter(|member| !member.is_defeated()).count()
    }

    /// Index of the first standing member other than the active one.
    pub fn next_standing(&self) -> Option<usize> {
        self.team
            .iter()
            .enumerate()
            .find(|(index, member)| *index != self.active && !member.is_defeated())
            .map(|(index, _)| index)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Completed
    }
}
