//! Errors

use salvo::http::StatusError;
use tracing::error;

use surecrm_app::domain::{
    invitations::records::InvitationRejection, registrations::RegistrationsServiceError,
};

use crate::observability::{InvitationEvent, record_invitation_event};

pub(crate) fn into_status_error(error: RegistrationsServiceError) -> StatusError {
    match error {
        RegistrationsServiceError::Rejected(rejection) => {
            record_invitation_event(InvitationEvent::Rejected, 1);

            let status = match rejection {
                InvitationRejection::NotFound => StatusError::not_found(),
                InvitationRejection::AlreadyUsed => StatusError::conflict(),
                InvitationRejection::Expired => StatusError::gone(),
            };

            status.brief(rejection.to_string())
        }
        RegistrationsServiceError::SelfReferral => {
            record_invitation_event(InvitationEvent::Rejected, 1);

            StatusError::unprocessable_entity()
                .brief("Invitation codes cannot be redeemed by their inviter")
        }
        RegistrationsServiceError::AlreadyRegistered => {
            StatusError::conflict().brief("Profile is already registered")
        }
        RegistrationsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Registration already exists")
        }
        RegistrationsServiceError::InvalidCode(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        RegistrationsServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Invalid email address")
        }
        RegistrationsServiceError::InvalidReference
        | RegistrationsServiceError::MissingRequiredData
        | RegistrationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        RegistrationsServiceError::Sql(source) => {
            error!("registration storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn rejections_map_to_distinct_statuses() {
        let cases = [
            (InvitationRejection::NotFound, StatusCode::NOT_FOUND),
            (InvitationRejection::AlreadyUsed, StatusCode::CONFLICT),
            (InvitationRejection::Expired, StatusCode::GONE),
        ];

        for (rejection, expected) in cases {
            let status = into_status_error(rejection.into());

            assert_eq!(status.code, expected);
            assert_eq!(status.brief, rejection.to_string());
        }
    }

    #[test]
    fn self_referral_is_unprocessable() {
        assert_eq!(
            into_status_error(RegistrationsServiceError::SelfReferral).code,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
