//! Error types surfaced by the runtime API.
//!
//! Decisions themselves never fail; these cover caller mistakes such as
//! naming a combatant the battlefield does not contain.
use tactics_core::{CombatantId, ErrorSeverity, TacticsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("combatant {0} is not part of the encounter")]
    UnknownCombatant(CombatantId),

    #[error("no behavior profile resolved for {0}")]
    ProfileMissing(CombatantId),
}

impl TacticsError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::UnknownCombatant(_) => ErrorSeverity::Validation,
            RuntimeError::ProfileMissing(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::UnknownCombatant(_) => "RUNTIME_UNKNOWN_COMBATANT",
            RuntimeError::ProfileMissing(_) => "RUNTIME_PROFILE_MISSING",
        }
    }
}
