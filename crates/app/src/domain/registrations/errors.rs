//! Registrations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::invitations::{codes::InvalidCode, records::InvitationRejection};

#[derive(Debug, Error)]
pub enum RegistrationsServiceError {
    #[error(transparent)]
    Rejected(#[from] InvitationRejection),

    #[error("invitation codes cannot be redeemed by their inviter")]
    SelfReferral,

    #[error("profile is already bound to an inviter")]
    AlreadyRegistered,

    #[error("invalid invitation code")]
    InvalidCode(#[from] InvalidCode),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("registration already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RegistrationsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
