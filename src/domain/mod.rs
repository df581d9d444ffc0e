//! Waiver domain types.
//!
//! Storage-agnostic types for leagues, teams, rosters, claims, and the
//! report produced by a processing run.

pub mod claim;
pub mod error;
pub mod id;
pub mod league;
pub mod notification;
pub mod report;
pub mod team;

pub use claim::{
    ClaimResolution, ClaimStatus, ClaimTerms, FailureReason, PendingClaims, UnreadableClaim,
    WaiverClaim,
};
pub use error::DomainError;
pub use id::{ClaimId, LeagueId, PlayerId, TeamId};
pub use league::{LeagueSettings, WaiverMode, WaiverType};
pub use notification::{Notification, NotificationKind};
pub use report::{FailedClaim, PriorityChange, ProcessingReport, ReportDetails, SuccessfulClaim};
pub use team::{AcquisitionType, RosterEntry, RosterSlot, Team};
