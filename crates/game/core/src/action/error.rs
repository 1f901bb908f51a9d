//! Resolver rejections.
//!
//! A rejected action is a caller-contract violation, not a battle event: the
//! resolver returns one of these instead of an outcome and nothing changes.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    /// The referenced skill has turns left on its cooldown.
    #[error("skill in slot {slot} is on cooldown ({remaining} turns left)")]
    SkillOnCooldown { slot: usize, remaining: u32 },

    /// The skill slot is outside the loadout.
    #[error("skill slot {slot} is out of range")]
    SkillSlotOutOfRange { slot: usize },

    /// A combatant at 0 HP cannot act.
    #[error("attacker is defeated")]
    AttackerDefeated,

    /// A combatant at 0 HP cannot be targeted.
    #[error("target is defeated")]
    TargetDefeated,
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SkillOnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::SkillSlotOutOfRange { .. } | Self::AttackerDefeated | Self::TargetDefeated => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SkillOnCooldown { .. } => "RESOLVE_SKILL_ON_COOLDOWN",
            Self::SkillSlotOutOfRange { .. } => "RESOLVE_SKILL_SLOT_OUT_OF_RANGE",
            Self::AttackerDefeated => "RESOLVE_ATTACKER_DEFEATED",
            Self::TargetDefeated => "RESOLVE_TARGET_DEFEATED",
        }
    }
}
