//! Actions submitted by each side for a turn.
mod error;

pub use error::ResolveError;

use crate::state::CombatantId;

/// Which side of the battle a combatant fights for.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Actor slot folded into roll seeds.
    pub const fn actor_slot(self) -> u32 {
        match self {
            Self::Player => 0,
            Self::Enemy => 1,
        }
    }
}

/// What a combatant does this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ActionKind {
    /// Basic attack using the combatant's attack stat.
    Attack,
    /// Activate the skill in loadout slot `slot` (0-based).
    Skill { slot: usize },
    /// Queue a default-strength dodge without spending a skill.
    Dodge,
    /// Queue a default-strength block without spending a skill.
    Block,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Skill { .. } => "skill",
            Self::Dodge => "dodge",
            Self::Block => "block",
        }
    }

    pub const fn skill_slot(&self) -> Option<usize> {
        match self {
            Self::Skill { slot } => Some(*slot),
            _ => None,
        }
    }
}

/// One combatant's submission for a turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub monster_id: CombatantId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(monster_id: impl Into<CombatantId>, kind: ActionKind) -> Self {
        Self {
            monster_id: monster_id.into(),
            kind,
        }
    }

    pub fn attack(monster_id: impl Into<CombatantId>) -> Self {
        Self::new(monster_id, ActionKind::Attack)
    }

    pub fn skill(monster_id: impl Into<CombatantId>, slot: usize) -> Self {
        Self::new(monster_id, ActionKind::Skill { slot })
    }

    pub fn dodge(monster_id: impl Into<CombatantId>) -> Self {
        Self::new(monster_id, ActionKind::Dodge)
    }

    pub fn block(monster_id: impl Into<CombatantId>) -> Self {
        Self::new(monster_id, ActionKind::Block)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ActionKind::Skill { slot } => write!(f, "{} skill[{}]", self.monster_id, slot),
            kind => write!(f, "{} {}", self.monster_id, kind.as_str()),
        }
    }
}
