//! Auth Config

use clap::Args;
use surecrm_app::auth::IdentityConfig;

/// Access token and webhook authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 secret the identity provider signs access tokens with
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Required `aud` claim on access tokens
    #[arg(long, env = "JWT_AUDIENCE", default_value = "authenticated")]
    pub jwt_audience: String,

    /// Shared secret expected in the `x-webhook-secret` header
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: String,
}

impl AuthConfig {
    /// Access token verification settings.
    #[must_use]
    pub fn identity(&self) -> IdentityConfig {
        IdentityConfig {
            jwt_secret: self.jwt_secret.clone(),
            audience: self.jwt_audience.clone(),
        }
    }
}
