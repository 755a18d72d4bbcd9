//! Validate Invitation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use surecrm_app::domain::invitations::data::InvitationValidation;

use crate::{
    extensions::*,
    invitations::errors::into_status_error,
    observability::{InvitationEvent, record_invitation_event},
    state::State,
};

/// Validate Invitation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateInvitationRequest {
    /// Code as typed by the invitee; case and surrounding whitespace are ignored
    pub code: String,
}

/// Redeemable invitation details.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidInvitation {
    pub code: String,
    pub inviter_uuid: Uuid,
    pub invitee_email: Option<String>,
    pub expires_at: Option<String>,
}

/// Validate Invitation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateInvitationResponse {
    pub valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation: Option<ValidInvitation>,

    /// One of `not_found`, `expired`, `already_used`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human readable rejection message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<InvitationValidation> for ValidateInvitationResponse {
    fn from(validation: InvitationValidation) -> Self {
        match validation {
            InvitationValidation::Valid(invitation) => Self {
                valid: true,
                invitation: Some(ValidInvitation {
                    code: invitation.code,
                    inviter_uuid: invitation.inviter.into_uuid(),
                    invitee_email: invitation.invitee_email,
                    expires_at: invitation.expires_at.map(|at| at.to_string()),
                }),
                reason: None,
                error: None,
            },
            InvitationValidation::Invalid(rejection) => Self {
                valid: false,
                invitation: None,
                reason: Some(rejection.reason().to_string()),
                error: Some(rejection.to_string()),
            },
        }
    }
}

/// Validate Invitation Handler
///
/// Checks a code before signup. Rejections are reported in the body with a
/// `200`, only malformed codes produce a `400`.
#[endpoint(
    tags("invitations"),
    summary = "Validate Invitation Code",
    responses(
        (status_code = StatusCode::OK, description = "Validation outcome"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or malformed code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateInvitationRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateInvitationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let validation = state
        .app
        .invitations
        .validate_code(&json.into_inner().code)
        .await
        .map_err(into_status_error)?;

    if !validation.is_valid() {
        record_invitation_event(InvitationEvent::Rejected, 1);
    }

    Ok(Json(validation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use surecrm_app::domain::{
        invitations::{
            InvitationsServiceError, MockInvitationsService, codes::InvalidCode,
            records::InvitationRejection,
        },
        profiles::records::ProfileUuid,
    };

    use crate::test_helpers::{Mocks, make_invitation, public_service};

    use super::*;

    fn make_service(invitations: MockInvitationsService) -> Service {
        public_service(
            Mocks {
                invitations,
                ..Mocks::strict()
            },
            Router::with_path("validate-invitation").post(handler),
        )
    }

    fn expect_only_validate(invitations: &mut MockInvitationsService) {
        invitations.expect_allowance().never();
        invitations.expect_issue_invitation().never();
        invitations.expect_list_invitations().never();
        invitations.expect_expire_invitations().never();
    }

    #[tokio::test]
    async fn test_valid_code_returns_invitation() -> TestResult {
        let inviter = ProfileUuid::from_uuid(Uuid::now_v7());
        let invitation = make_invitation(inviter, "ABC-123-XYZ");

        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_validate_code()
            .once()
            .withf(|code| code == " abc-123-xyz ")
            .return_once(move |_| Ok(InvitationValidation::Valid(invitation)));

        expect_only_validate(&mut invitations);

        let mut res = TestClient::post("http://example.com/validate-invitation")
            .json(&json!({ "code": " abc-123-xyz " }))
            .send(&make_service(invitations))
            .await;

        let body: ValidateInvitationResponse = res.take_json().await?;
        let valid = body.invitation.ok_or("missing invitation")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.valid);
        assert_eq!(valid.code, "ABC-123-XYZ");
        assert_eq!(valid.inviter_uuid, inviter.into_uuid());
        assert!(body.reason.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_reports_not_found() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_validate_code()
            .once()
            .withf(|code| code == "ZZZ-000")
            .return_once(|_| Ok(InvitationValidation::Invalid(InvitationRejection::NotFound)));

        expect_only_validate(&mut invitations);

        let mut res = TestClient::post("http://example.com/validate-invitation")
            .json(&json!({ "code": "ZZZ-000" }))
            .send(&make_service(invitations))
            .await;

        let body: ValidateInvitationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.valid);
        assert!(body.invitation.is_none());
        assert_eq!(body.reason.as_deref(), Some("not_found"));
        assert_eq!(body.error.as_deref(), Some("invitation code not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_used_code_reports_already_used() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_validate_code()
            .once()
            .return_once(|_| Ok(InvitationValidation::Invalid(InvitationRejection::AlreadyUsed)));

        expect_only_validate(&mut invitations);

        let mut res = TestClient::post("http://example.com/validate-invitation")
            .json(&json!({ "code": "ABC-123-XYZ" }))
            .send(&make_service(invitations))
            .await;

        let body: ValidateInvitationResponse = res.take_json().await?;

        assert!(!body.valid);
        assert_eq!(body.reason.as_deref(), Some("already_used"));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_code_returns_400() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_validate_code()
            .once()
            .return_once(|_| Err(InvitationsServiceError::InvalidCode(InvalidCode::Missing)));

        expect_only_validate(&mut invitations);

        let res = TestClient::post("http://example.com/validate-invitation")
            .json(&json!({ "code": "   " }))
            .send(&make_service(invitations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_code_field_returns_400() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations.expect_validate_code().never();
        expect_only_validate(&mut invitations);

        let res = TestClient::post("http://example.com/validate-invitation")
            .json(&json!({}))
            .send(&make_service(invitations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
