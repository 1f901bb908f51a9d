//! Error types for the turn pipeline and battle setup.

use crate::action::{ResolveError, Side};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, TurnPhase};

/// Rejected turn call. Session state is left exactly as it was, except that
/// a failed resolution returns the session to selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("engine is not awaiting this call (phase: {phase})")]
    NotAwaitingAction { phase: TurnPhase },

    #[error("no pending turn to resolve")]
    NoPendingTurn,

    #[error("run is finished")]
    RunFinished,

    #[error("action from {actor} but active combatant is {current}")]
    ActorNotCurrent {
        actor: CombatantId,
        current: CombatantId,
    },

    #[error("{side} action rejected: {source}")]
    InvalidAction {
        side: Side,
        #[source]
        source: ResolveError,
    },
}

impl TurnError {
    pub(crate) fn invalid(side: Side, source: ResolveError) -> Self {
        Self::InvalidAction { side, source }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction { source, .. } => source.severity(),
            Self::NotAwaitingAction { .. } | Self::NoPendingTurn | Self::ActorNotCurrent { .. } => {
                ErrorSeverity::Validation
            }
            Self::RunFinished => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAwaitingAction { .. } => "TURN_NOT_AWAITING_ACTION",
            Self::NoPendingTurn => "TURN_NO_PENDING",
            Self::RunFinished => "TURN_RUN_FINISHED",
            Self::ActorNotCurrent { .. } => "TURN_ACTOR_NOT_CURRENT",
            Self::InvalidAction { .. } => "TURN_INVALID_ACTION",
        }
    }
}

/// Rejected team at battle setup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("team has no members")]
    EmptyTeam,

    #[error("combatant {id} is invalid: {reason}")]
    InvalidCombatant {
        id: CombatantId,
        reason: &'static str,
    },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTeam => "SETUP_EMPTY_TEAM",
            Self::InvalidCombatant { .. } => "SETUP_INVALID_COMBATANT",
        }
    }
}
