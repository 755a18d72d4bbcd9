//! Invitation Data

use crate::domain::invitations::records::{InvitationRecord, InvitationRejection};

/// New Invitation Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewInvitation {
    /// Address the inviter intends to send the code to.
    pub invitee_email: Option<String>,
}

/// Outcome of checking a submitted code.
#[derive(Debug, Clone)]
pub enum InvitationValidation {
    Valid(InvitationRecord),
    Invalid(InvitationRejection),
}

impl InvitationValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Remaining ledger balance for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvitationAllowance {
    pub invitations_left: u32,
    pub can_issue: bool,
}
