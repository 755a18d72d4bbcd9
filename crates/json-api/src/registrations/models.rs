//! Registration Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use surecrm_app::domain::registrations::data::Registration;

use crate::{invitations::models::InvitationResponse, profiles::models::ProfileResponse};

/// Registration Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationResponse {
    /// The registered profile, carrying its starting allotment
    pub profile: ProfileResponse,

    /// The redeemed invitation
    pub invitation: InvitationResponse,

    /// Set when this exact registration had already completed
    pub replayed: bool,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            profile: registration.profile.into(),
            invitation: registration.invitation.into(),
            replayed: registration.replayed,
        }
    }
}
