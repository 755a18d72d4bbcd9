//! Authentication
//!
//! Sign-in is handled by the identity provider; this module only verifies the
//! access tokens it issues.

mod errors;
mod models;
mod service;

pub use errors::*;
pub use models::*;
pub use service::*;
