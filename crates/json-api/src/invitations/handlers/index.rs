//! Invitation Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    invitations::{errors::into_status_error, models::InvitationResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvitationsResponse {
    /// Invitations issued by the caller, newest first
    pub invitations: Vec<InvitationResponse>,
}

/// Invitation Index Handler
#[endpoint(
    tags("invitations"),
    summary = "List Issued Invitations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InvitationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let invitations = state
        .app
        .invitations
        .list_invitations(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(InvitationsResponse {
        invitations: invitations.into_iter().map(Into::into).collect(),
    }))
}
