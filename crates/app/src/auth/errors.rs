//! Identity service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Bad signature, wrong audience, expired or otherwise unusable token.
    #[error("invalid access token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token verified but its subject is not a user id.
    #[error("invalid token subject")]
    InvalidSubject(#[source] uuid::Error),
}

impl From<jsonwebtoken::errors::Error> for IdentityServiceError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(error)
    }
}
