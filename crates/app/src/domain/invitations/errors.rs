//! Invitations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::invitations::codes::InvalidCode;

#[derive(Debug, Error)]
pub enum InvitationsServiceError {
    #[error("invitation already exists")]
    AlreadyExists,

    #[error("invitation not found")]
    NotFound,

    #[error("inviter profile not found")]
    ProfileNotFound,

    #[error("inviter profile is inactive")]
    ProfileInactive,

    #[error("no invitations left to issue")]
    NoInvitationsLeft,

    #[error("invalid invitation code")]
    InvalidCode(#[from] InvalidCode),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("invitation expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InvitationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
