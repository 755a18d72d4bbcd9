//! User Created Webhook Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use surecrm_app::domain::{
    profiles::records::ProfileUuid,
    registrations::{RegistrationsServiceError, data::NewRegistration},
};

use crate::{
    extensions::*,
    observability::{InvitationEvent, record_invitation_event},
    registrations::errors::into_status_error,
    state::State,
};

const DEFAULT_FULL_NAME: &str = "New agent";

/// Post-signup hook payload sent by the identity provider.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserCreatedRequest {
    pub user_uuid: Uuid,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    /// Code the user entered on the signup form
    #[serde(default)]
    pub invitation_code: Option<String>,
}

impl UserCreatedRequest {
    /// Registration for this signup, or `None` when no code was supplied.
    fn into_registration(self) -> Option<NewRegistration> {
        let code = self
            .invitation_code
            .filter(|code| !code.trim().is_empty())?;

        let full_name = self
            .full_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| DEFAULT_FULL_NAME.to_string());

        Some(NewRegistration {
            user: ProfileUuid::from_uuid(self.user_uuid),
            code,
            full_name,
            email: self.email,
        })
    }
}

/// Outcome of a processed hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum UserCreatedStatus {
    Registered,
    Ignored,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserCreatedResponse {
    pub status: UserCreatedStatus,
}

/// User Created Webhook Handler
///
/// Runs the registration for a signup reported by the identity provider.
/// Signups without a code and hooks for users who are already registered are
/// acknowledged without changes.
#[endpoint(
    tags("webhooks"),
    summary = "User Created Webhook",
    security(("webhook_secret" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Hook processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid webhook secret"),
        (status_code = StatusCode::NOT_FOUND, description = "Invitation code not found"),
        (status_code = StatusCode::CONFLICT, description = "Invitation code already used"),
        (status_code = StatusCode::GONE, description = "Invitation code expired"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Self referral"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UserCreatedRequest>,
    depot: &mut Depot,
) -> Result<Json<UserCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let user = request.user_uuid;

    let Some(registration) = request.into_registration() else {
        debug!(user = %user, "signup without invitation code");

        return Ok(Json(UserCreatedResponse {
            status: UserCreatedStatus::Ignored,
        }));
    };

    let status = match state.app.registrations.register(registration).await {
        Ok(registration) if registration.replayed => UserCreatedStatus::Ignored,
        Ok(_) => {
            record_invitation_event(InvitationEvent::Registered, 1);

            UserCreatedStatus::Registered
        }
        Err(RegistrationsServiceError::AlreadyRegistered) => {
            info!(user = %user, "user already registered");

            UserCreatedStatus::Ignored
        }
        Err(error) => return Err(into_status_error(error)),
    };

    Ok(Json(UserCreatedResponse { status }))
}
