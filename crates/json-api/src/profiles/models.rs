//! Profile Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use surecrm_app::domain::profiles::records::ProfileRecord;

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    /// Profile UUID, shared with the identity provider's user id
    pub uuid: Uuid,

    pub full_name: String,

    pub email: Option<String>,

    /// One of `agent`, `team_admin`, `system_admin`
    pub role: String,

    /// Invitations the profile can still issue
    pub invitations_left: u32,

    /// Profile whose invitation this profile redeemed
    pub invited_by_uuid: Option<Uuid>,

    pub is_active: bool,

    /// The date and time the profile was created
    pub created_at: String,

    /// The date and time the profile was last updated
    pub updated_at: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        Self {
            uuid: profile.uuid.into_uuid(),
            full_name: profile.full_name,
            email: profile.email,
            role: profile.role.to_string(),
            invitations_left: profile.invitations_left,
            invited_by_uuid: profile.invited_by.map(|uuid| uuid.into_uuid()),
            is_active: profile.is_active,
            created_at: profile.created_at.to_string(),
            updated_at: profile.updated_at.to_string(),
        }
    }
}
