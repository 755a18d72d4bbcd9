//! SureCRM Domain Concerns

pub mod emails;
pub mod invitations;
pub mod profiles;
pub mod registrations;
