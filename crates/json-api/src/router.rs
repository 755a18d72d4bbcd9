//! API Router

use salvo::Router;

use crate::{auth, invitations, profiles, registrations};

/// Routes mounted under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("validate-invitation")
                .post(invitations::handlers::validate::handler),
        )
        .push(
            Router::new()
                .hoop(auth::webhook::handler)
                .push(
                    Router::with_path("webhooks/user-created")
                        .post(registrations::handlers::webhook::handler),
                )
                .push(
                    Router::with_path("invitations/expire")
                        .post(invitations::handlers::expire::handler),
                ),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("registrations")
                        .post(registrations::handlers::create::handler),
                )
                .push(
                    Router::with_path("profiles/me")
                        .get(profiles::handlers::get::handler)
                        .patch(profiles::handlers::update::handler),
                )
                .push(
                    Router::with_path("invitations")
                        .get(invitations::handlers::index::handler)
                        .post(invitations::handlers::create::handler)
                        .push(
                            Router::with_path("allowance")
                                .get(invitations::handlers::allowance::handler),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::StatusCode,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use surecrm_app::domain::invitations::{
        MockInvitationsService, data::InvitationValidation, records::InvitationRejection,
    };

    use crate::test_helpers::{Mocks, state_with};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with(mocks)))
                .push(api_router()),
        )
    }

    #[tokio::test]
    async fn test_validate_invitation_is_public() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_validate_code()
            .once()
            .return_once(|_| Ok(InvitationValidation::Invalid(InvitationRejection::NotFound)));

        invitations.expect_allowance().never();
        invitations.expect_issue_invitation().never();
        invitations.expect_list_invitations().never();
        invitations.expect_expire_invitations().never();

        let mut res = TestClient::post("http://example.com/api/validate-invitation")
            .json(&json!({ "code": "ZZZ-000" }))
            .send(&make_service(Mocks {
                invitations,
                ..Mocks::strict()
            }))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains("not_found"), "unexpected body: {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_routes_require_token() -> TestResult {
        let service = make_service(Mocks::strict());

        for res in [
            TestClient::get("http://example.com/api/profiles/me")
                .send(&service)
                .await,
            TestClient::get("http://example.com/api/invitations")
                .send(&service)
                .await,
            TestClient::get("http://example.com/api/invitations/allowance")
                .send(&service)
                .await,
            TestClient::post("http://example.com/api/registrations")
                .json(&json!({ "code": "ABC-123-XYZ", "full_name": "Bea Broker" }))
                .send(&service)
                .await,
        ] {
            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_webhook_routes_require_secret() -> TestResult {
        let service = make_service(Mocks::strict());

        for res in [
            TestClient::post("http://example.com/api/invitations/expire")
                .send(&service)
                .await,
            TestClient::post("http://example.com/api/webhooks/user-created")
                .json(&json!({ "user_uuid": uuid::Uuid::now_v7() }))
                .send(&service)
                .await,
        ] {
            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        }

        Ok(())
    }
}
