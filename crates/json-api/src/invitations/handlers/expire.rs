//! Expire Invitations Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    invitations::errors::into_status_error,
    observability::{InvitationEvent, record_invitation_event},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ExpireInvitationsResponse {
    /// Pending invitations moved to `expired` by this sweep
    pub expired: u64,
}

/// Expire Invitations Handler
///
/// Sweep for scheduled jobs, guarded by the webhook secret.
#[endpoint(
    tags("invitations"),
    summary = "Expire Stale Invitations",
    security(("webhook_secret" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sweep completed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid webhook secret"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ExpireInvitationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let expired = state
        .app
        .invitations
        .expire_invitations()
        .await
        .map_err(into_status_error)?;

    record_invitation_event(InvitationEvent::Expired, expired);

    Ok(Json(ExpireInvitationsResponse { expired }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use surecrm_app::domain::invitations::MockInvitationsService;

    use crate::{
        auth::webhook::WEBHOOK_SECRET_HEADER,
        test_helpers::{Mocks, TEST_WEBHOOK_SECRET, strict_invitations_mock, webhook_service},
    };

    use super::*;

    fn make_service(invitations: MockInvitationsService) -> Service {
        webhook_service(
            Mocks {
                invitations,
                ..Mocks::strict()
            },
            Router::with_path("invitations/expire").post(handler),
        )
    }

    #[tokio::test]
    async fn test_expire_returns_count() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_expire_invitations()
            .once()
            .return_once(|| Ok(3));

        invitations.expect_validate_code().never();
        invitations.expect_allowance().never();
        invitations.expect_issue_invitation().never();
        invitations.expect_list_invitations().never();

        let mut res = TestClient::post("http://example.com/invitations/expire")
            .add_header(WEBHOOK_SECRET_HEADER, TEST_WEBHOOK_SECRET, true)
            .send(&make_service(invitations))
            .await;

        let body: ExpireInvitationsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.expired, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_expire_without_secret_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/invitations/expire")
            .send(&make_service(strict_invitations_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
