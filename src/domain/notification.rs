//! Notification records emitted for successful claims.
//!
//! The engine only writes these records; delivery happens elsewhere.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    WaiverClaimSuccessful,
}

impl NotificationKind {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaiverClaimSuccessful => "WAIVER_CLAIM_SUCCESSFUL",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAIVER_CLAIM_SUCCESSFUL" => Ok(Self::WaiverClaimSuccessful),
            other => Err(DomainError::UnknownNotificationKind(other.to_string())),
        }
    }
}

/// A queued notification for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification telling a team owner which player they acquired.
    #[must_use]
    pub fn claim_won(recipient: impl Into<String>, player_name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recipient: recipient.into(),
            kind: NotificationKind::WaiverClaimSuccessful,
            message: format!("Your waiver claim for {player_name} was successful"),
            created_at,
        }
    }
}
