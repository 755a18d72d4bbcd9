//! Invitation Allowance Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    invitations::{errors::into_status_error, models::AllowanceResponse},
    state::State,
};

/// Invitation Allowance Handler
///
/// How many invitations the caller can still issue.
#[endpoint(
    tags("invitations"),
    summary = "Get Invitation Allowance",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current allowance"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AllowanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let allowance = state
        .app
        .invitations
        .allowance(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(allowance.into()))
}
