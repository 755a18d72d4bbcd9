//! Invitation Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use surecrm_app::domain::invitations::{
    data::InvitationAllowance, records::InvitationRecord,
};

/// Invitation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvitationResponse {
    pub uuid: Uuid,

    /// Code to hand to the invitee, e.g. `ABC-123-XYZ`
    pub code: String,

    pub inviter_uuid: Uuid,

    pub invitee_email: Option<String>,

    /// One of `pending`, `used`, `expired`
    pub status: String,

    /// Profile that redeemed the code
    pub used_by_uuid: Option<Uuid>,

    pub used_at: Option<String>,

    /// The code stops validating after this time; absent codes never expire
    pub expires_at: Option<String>,

    pub created_at: String,
}

impl From<InvitationRecord> for InvitationResponse {
    fn from(invitation: InvitationRecord) -> Self {
        Self {
            uuid: invitation.uuid.into_uuid(),
            code: invitation.code,
            inviter_uuid: invitation.inviter.into_uuid(),
            invitee_email: invitation.invitee_email,
            status: invitation.status.to_string(),
            used_by_uuid: invitation.used_by.map(|uuid| uuid.into_uuid()),
            used_at: invitation.used_at.map(|at| at.to_string()),
            expires_at: invitation.expires_at.map(|at| at.to_string()),
            created_at: invitation.created_at.to_string(),
        }
    }
}

/// Allowance Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AllowanceResponse {
    /// Invitations the caller can still issue
    pub invitations_left: u32,

    /// Whether issuing would currently succeed
    pub can_issue: bool,
}

impl From<InvitationAllowance> for AllowanceResponse {
    fn from(allowance: InvitationAllowance) -> Self {
        Self {
            invitations_left: allowance.invitations_left,
            can_issue: allowance.can_issue,
        }
    }
}
