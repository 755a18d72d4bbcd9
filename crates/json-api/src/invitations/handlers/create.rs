//! Issue Invitation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use surecrm_app::domain::invitations::data::NewInvitation;

use crate::{
    extensions::*,
    invitations::{errors::into_status_error, models::InvitationResponse},
    observability::{InvitationEvent, record_invitation_event},
    state::State,
};

/// Issue Invitation Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssueInvitationRequest {
    /// Address the code is meant for
    #[serde(default)]
    pub invitee_email: Option<String>,
}

impl From<IssueInvitationRequest> for NewInvitation {
    fn from(request: IssueInvitationRequest) -> Self {
        NewInvitation {
            invitee_email: request.invitee_email,
        }
    }
}

/// Issue Invitation Handler
///
/// Spends one invitation from the caller's allotment.
#[endpoint(
    tags("invitations"),
    summary = "Issue Invitation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Invitation issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Profile is inactive"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::CONFLICT, description = "No invitations left"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<IssueInvitationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<InvitationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let invitation = state
        .app
        .invitations
        .issue_invitation(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_invitation_event(InvitationEvent::Issued, 1);

    res.status_code(StatusCode::CREATED);

    Ok(Json(invitation.into()))
}
