//! Bearer token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use surecrm_app::auth::IdentityServiceError;
use tracing::debug;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let user = match state.app.identity.authenticate_bearer(token).await {
        Ok(user) => user,
        Err(IdentityServiceError::InvalidToken(source)) => {
            debug!("rejected access token: {source}");

            res.render(StatusError::unauthorized().brief("Invalid access token"));

            return;
        }
        Err(IdentityServiceError::InvalidSubject(source)) => {
            debug!("rejected access token subject: {source}");

            res.render(StatusError::unauthorized().brief("Invalid access token"));

            return;
        }
    };

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
