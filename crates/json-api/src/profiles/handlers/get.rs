//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profiles::{errors::into_status_error, models::ProfileResponse},
    state::State,
};

/// Get Profile Handler
///
/// Returns the caller's own profile.
#[endpoint(
    tags("profiles"),
    summary = "Get Current Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
