//! State

use std::sync::Arc;

use surecrm_app::context::AppContext;

use crate::auth::webhook::WebhookSecret;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) webhook_secret: WebhookSecret,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, webhook_secret: WebhookSecret) -> Self {
        Self {
            app,
            webhook_secret,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, webhook_secret: WebhookSecret) -> Arc<Self> {
        Arc::new(Self::new(app, webhook_secret))
    }
}
