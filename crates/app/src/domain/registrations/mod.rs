//! Registrations
//!
//! Binds a newly signed-up user to the invitation they redeemed.

pub mod data;
pub mod errors;
pub mod service;

pub use errors::RegistrationsServiceError;
pub use service::*;
