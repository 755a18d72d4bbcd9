//! Errors

use salvo::http::StatusError;
use tracing::error;

use surecrm_app::domain::invitations::InvitationsServiceError;

pub(crate) fn into_status_error(error: InvitationsServiceError) -> StatusError {
    match error {
        InvitationsServiceError::NoInvitationsLeft => {
            StatusError::conflict().brief("No invitations left")
        }
        InvitationsServiceError::ProfileInactive => {
            StatusError::forbidden().brief("Profile is inactive")
        }
        InvitationsServiceError::ProfileNotFound => {
            StatusError::not_found().brief("Profile not found")
        }
        InvitationsServiceError::NotFound => StatusError::not_found(),
        InvitationsServiceError::InvalidCode(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        InvitationsServiceError::InvalidReference
        | InvitationsServiceError::MissingRequiredData
        | InvitationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid invitation payload")
        }
        InvitationsServiceError::AlreadyExists => {
            error!("invitation code collision survived the retry loop");

            StatusError::internal_server_error()
        }
        InvitationsServiceError::ExpiryOutOfRange(source) => {
            error!("invitation expiry out of range, check INVITATION_TTL_HOURS: {source}");

            StatusError::internal_server_error()
        }
        InvitationsServiceError::Sql(source) => {
            error!("invitation storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
