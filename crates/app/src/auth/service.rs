//! Identity service.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{AccessTokenClaims, IdentityConfig, IdentityServiceError},
    domain::profiles::records::ProfileUuid,
};

/// Verifies HS256 access tokens signed with the identity provider's secret.
#[derive(Clone)]
pub struct JwtIdentityService {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityService {
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and verify a token, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns an error when the signature, audience or expiry check fails.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, IdentityServiceError> {
        let data = decode::<AccessTokenClaims>(token, &self.key, &self.validation)?;

        Ok(data.claims)
    }
}

#[async_trait]
impl IdentityService for JwtIdentityService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ProfileUuid, IdentityServiceError> {
        let claims = self.verify(bearer_token)?;

        let user = Uuid::parse_str(&claims.sub).map_err(IdentityServiceError::InvalidSubject)?;

        Ok(ProfileUuid::from_uuid(user))
    }
}

#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve a bearer token to the profile it was issued for.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ProfileUuid, IdentityServiceError>;
}
