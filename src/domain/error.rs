//! Domain validation errors for waiver types.
//!
//! Returned when stored values cannot be mapped onto a domain type, such as
//! an unknown waiver type string or a negative budget column.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Waiver type is neither `FAAB` nor `PRIORITY`.
    #[error("unknown waiver type '{0}'")]
    UnknownWaiverType(String),

    /// Waiver mode is neither `ROLLING` nor `STATIC`.
    #[error("unknown waiver mode '{0}'")]
    UnknownWaiverMode(String),

    /// Claim status string is not recognized.
    #[error("unknown claim status '{0}'")]
    UnknownClaimStatus(String),

    /// Failure reason string is not recognized.
    #[error("unknown failure reason '{0}'")]
    UnknownFailureReason(String),

    /// Roster slot string is not recognized.
    #[error("unknown roster slot '{0}'")]
    UnknownRosterSlot(String),

    /// Acquisition type string is not recognized.
    #[error("unknown acquisition type '{0}'")]
    UnknownAcquisitionType(String),

    /// Notification kind string is not recognized.
    #[error("unknown notification kind '{0}'")]
    UnknownNotificationKind(String),

    /// A counter that must be non-negative was negative.
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was read.
        value: i64,
    },
}

/// Convert a signed storage integer into an unsigned domain value.
///
/// # Errors
/// Returns [`DomainError::Negative`] if `value` is below zero.
pub fn non_negative(field: &'static str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| DomainError::Negative {
        field,
        value: i64::from(value),
    })
}
