//! Invitation Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::profiles::records::ProfileUuid, uuids::TypedUuid};

/// Invitation UUID
pub type InvitationUuid = TypedUuid<InvitationRecord>;

/// Invitation lifecycle state.
///
/// Only `Pending -> Used` and `Pending -> Expired` ever happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Used,
    Expired,
}

impl InvitationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Used => "used",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown invitation status: {0}")]
pub struct UnknownInvitationStatus(pub String);

impl FromStr for InvitationStatus {
    type Err = UnknownInvitationStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "used" => Ok(Self::Used),
            "expired" => Ok(Self::Expired),
            other => Err(UnknownInvitationStatus(other.to_string())),
        }
    }
}

/// Why a code cannot be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvitationRejection {
    #[error("invitation code not found")]
    NotFound,

    #[error("invitation code has expired")]
    Expired,

    #[error("invitation code has already been used")]
    AlreadyUsed,
}

impl InvitationRejection {
    /// Machine-readable reason returned to clients.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::AlreadyUsed => "already_used",
        }
    }
}

/// Invitation Record
#[derive(Debug, Clone)]
pub struct InvitationRecord {
    pub uuid: InvitationUuid,
    pub code: String,
    pub inviter: ProfileUuid,
    pub invitee_email: Option<String>,
    pub status: InvitationStatus,
    pub used_by: Option<ProfileUuid>,
    pub used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InvitationRecord {
    /// Check whether the invitation can still be redeemed at `now`.
    ///
    /// A pending invitation past its expiry is rejected as expired even before
    /// the expiry sweep has rewritten its status. The expiry instant itself is
    /// still redeemable.
    pub fn check_redeemable(&self, now: Timestamp) -> Result<(), InvitationRejection> {
        match self.status {
            InvitationStatus::Used => Err(InvitationRejection::AlreadyUsed),
            InvitationStatus::Expired => Err(InvitationRejection::Expired),
            InvitationStatus::Pending => match self.expires_at {
                Some(expires_at) if expires_at < now => Err(InvitationRejection::Expired),
                _ => Ok(()),
            },
        }
    }
}
