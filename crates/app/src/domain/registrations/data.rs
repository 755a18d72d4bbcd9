//! Registration Data

use crate::domain::{
    invitations::records::InvitationRecord,
    profiles::records::{ProfileRecord, ProfileUuid},
};

/// A signup completed with an invitation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    /// Identity provider user id of the new signer.
    pub user: ProfileUuid,
    pub code: String,
    pub full_name: String,
    pub email: Option<String>,
}

/// Result of binding a user to an invitation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub profile: ProfileRecord,
    pub invitation: InvitationRecord,

    /// `true` when the same user had already redeemed this code and nothing
    /// was changed.
    pub replayed: bool,
}
