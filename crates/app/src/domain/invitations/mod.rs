//! Invitations
//!
//! The per-profile invitation ledger and the code validator.

pub mod codes;
pub mod data;
pub mod errors;
pub mod policy;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::InvitationsServiceError;
pub use service::*;
