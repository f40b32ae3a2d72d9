//! Common error infrastructure for tactics-core.
//!
//! Nothing in the decision core is fatal to the turn engine: every failure
//! degrades to "no decision" or "plan invalid". Failures are still typed so
//! callers can log them and pick a recovery strategy. Domain-specific errors
//! (e.g. [`crate::plan::PlanInvalidation`]) live beside the code that raises
//! them and implement [`TacticsError`].

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The situation changed; re-plan or skip and try again next tick.
    ///
    /// Examples: target moved out of reach, action already spent
    Recoverable,

    /// A referenced entity no longer exists; the decision must be dropped.
    ///
    /// Examples: actor removed from the encounter, target died
    Validation,

    /// Unexpected state inconsistency that indicates a caller bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait TacticsError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
