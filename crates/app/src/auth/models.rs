//! Identity token models.

use serde::{Deserialize, Serialize};

/// Claims read from an identity provider access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User id.
    pub sub: String,

    pub aud: String,

    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Settings for verifying access tokens.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Shared HS256 signing secret.
    pub jwt_secret: String,

    /// Required `aud` claim.
    pub audience: String,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("audience", &self.audience)
            .finish()
    }
}
