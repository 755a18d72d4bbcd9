//! Create Registration Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use surecrm_app::domain::{profiles::records::ProfileUuid, registrations::data::NewRegistration};

use crate::{
    extensions::*,
    observability::{InvitationEvent, record_invitation_event},
    registrations::{errors::into_status_error, models::RegistrationResponse},
    state::State,
};

/// Create Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateRegistrationRequest {
    /// Invitation code entered at signup
    pub code: String,

    pub full_name: String,

    #[serde(default)]
    pub email: Option<String>,
}

impl CreateRegistrationRequest {
    fn into_registration(self, user: ProfileUuid) -> NewRegistration {
        NewRegistration {
            user,
            code: self.code,
            full_name: self.full_name,
            email: self.email,
        }
    }
}

/// Create Registration Handler
///
/// Redeems an invitation code for the signed-in user. Repeating a completed
/// registration returns `200` with `replayed` set.
#[endpoint(
    tags("registrations"),
    summary = "Register With Invitation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Registration completed"),
        (status_code = StatusCode::OK, description = "Registration already completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Invitation code not found"),
        (status_code = StatusCode::CONFLICT, description = "Code already used or profile already registered"),
        (status_code = StatusCode::GONE, description = "Invitation code expired"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Self referral"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRegistrationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let registration = state
        .app
        .registrations
        .register(json.into_inner().into_registration(user))
        .await
        .map_err(into_status_error)?;

    if registration.replayed {
        res.status_code(StatusCode::OK);
    } else {
        record_invitation_event(InvitationEvent::Registered, 1);

        res.add_header(LOCATION, "/api/profiles/me", true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);
    }

    Ok(Json(registration.into()))
}
