//! Profile Data

use crate::domain::profiles::records::{ProfileRole, ProfileUuid};

/// New Profile Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub uuid: ProfileUuid,
    pub full_name: String,
    pub email: Option<String>,
    pub role: ProfileRole,
    pub invitations_left: u32,
}

/// Profile Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: String,
}
