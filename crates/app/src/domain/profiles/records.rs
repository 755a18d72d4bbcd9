//! Profile Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Profile UUID
///
/// Shares its value with the identity provider's user id.
pub type ProfileUuid = TypedUuid<ProfileRecord>;

/// Profile role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileRole {
    #[default]
    Agent,
    TeamAdmin,
    SystemAdmin,
}

impl ProfileRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::TeamAdmin => "team_admin",
            Self::SystemAdmin => "system_admin",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown profile role: {0}")]
pub struct UnknownProfileRole(pub String);

impl FromStr for ProfileRole {
    type Err = UnknownProfileRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "agent" => Ok(Self::Agent),
            "team_admin" => Ok(Self::TeamAdmin),
            "system_admin" => Ok(Self::SystemAdmin),
            other => Err(UnknownProfileRole(other.to_string())),
        }
    }
}

/// Profile Record
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub uuid: ProfileUuid,
    pub full_name: String,
    pub email: Option<String>,
    pub role: ProfileRole,

    /// Invitations this profile may still issue.
    pub invitations_left: u32,

    /// Profile whose invitation this profile redeemed at signup.
    pub invited_by: Option<ProfileUuid>,

    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProfileRecord {
    /// Whether the ledger allows this profile to issue another invitation.
    #[must_use]
    pub fn can_issue_invitation(&self) -> bool {
        self.is_active && self.invitations_left > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile(invitations_left: u32, is_active: bool) -> ProfileRecord {
        ProfileRecord {
            uuid: ProfileUuid::new(),
            full_name: "Ada Agent".to_string(),
            email: None,
            role: ProfileRole::Agent,
            invitations_left,
            invited_by: None,
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn active_profile_with_allotment_can_issue() {
        assert!(make_profile(1, true).can_issue_invitation());
    }

    #[test]
    fn exhausted_profile_cannot_issue() {
        assert!(!make_profile(0, true).can_issue_invitation());
    }

    #[test]
    fn inactive_profile_cannot_issue() {
        assert!(!make_profile(5, false).can_issue_invitation());
    }

    #[test]
    fn role_parses_its_own_string_form() {
        for role in [
            ProfileRole::Agent,
            ProfileRole::TeamAdmin,
            ProfileRole::SystemAdmin,
        ] {
            assert_eq!(role.as_str().parse::<ProfileRole>().ok(), Some(role));
        }
    }

    #[test]
    fn role_rejects_unknown_value() {
        assert!("owner".parse::<ProfileRole>().is_err());
    }
}
