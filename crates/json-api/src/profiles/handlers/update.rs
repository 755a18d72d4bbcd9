//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use surecrm_app::domain::profiles::data::ProfileUpdate;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Update Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub full_name: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            full_name: request.full_name,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("profiles"),
    summary = "Update Current Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .profiles
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use surecrm_app::domain::profiles::{MockProfilesService, ProfilesServiceError};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_profile};

    use super::*;

    fn make_service(profiles: MockProfilesService) -> Service {
        authenticated_service(
            Mocks {
                profiles,
                ..Mocks::strict()
            },
            Router::with_path("profiles/me").patch(handler),
        )
    }

    fn expect_only_update(profiles: &mut MockProfilesService) {
        profiles.expect_get_profile().never();
        profiles.expect_create_profile().never();
        profiles.expect_deactivate_profile().never();
        profiles.expect_grant_invitations().never();
    }

    #[tokio::test]
    async fn test_update_full_name() -> TestResult {
        let mut profile = make_profile(TEST_USER_UUID);
        profile.full_name = "Ada Lovelace".to_string();

        let mut profiles = MockProfilesService::new();

        profiles
            .expect_update_profile()
            .once()
            .withf(|uuid, update| {
                *uuid == TEST_USER_UUID
                    && *update
                        == ProfileUpdate {
                            full_name: "Ada Lovelace".to_string(),
                        }
            })
            .return_once(move |_, _| Ok(profile));

        expect_only_update(&mut profiles);

        let mut res = TestClient::patch("http://example.com/profiles/me")
            .json(&json!({ "full_name": "Ada Lovelace" }))
            .send(&make_service(profiles))
            .await;

        let body: ProfileResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.full_name, "Ada Lovelace");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(ProfilesServiceError::MissingRequiredData));

        expect_only_update(&mut profiles);

        let res = TestClient::patch("http://example.com/profiles/me")
            .json(&json!({ "full_name": "  " }))
            .send(&make_service(profiles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
