//! Common error infrastructure for battle-core.
//!
//! Domain errors (`ResolveError`, `TurnError`, `SetupError`) live beside the
//! code that raises them and implement [`GameError`] so callers can classify
//! a failure without matching on every variant.
//!
//! Every error in this crate is local: a rejected action or turn leaves the
//! session untouched and the caller may retry with a different submission.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. a skill cooling down)
/// - **Validation**: the request is malformed and should not be retried as-is
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// Implementors derive `thiserror::Error` for `Display` and provide a stable
/// machine-readable code per variant.
pub trait GameError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier such as `RESOLVE_SKILL_ON_COOLDOWN`.
    fn error_code(&self) -> &'static str;

    fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }
}
