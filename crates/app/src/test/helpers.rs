//! Test Helpers

use crate::{
    domain::profiles::{
        ProfilesService, ProfilesServiceError,
        data::NewProfile,
        records::{ProfileRecord, ProfileRole, ProfileUuid},
    },
    test::TestContext,
};

impl TestContext {
    /// Create an active agent profile holding `invitations_left` invitations.
    pub(crate) async fn create_profile(
        &self,
        invitations_left: u32,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let uuid = ProfileUuid::new();

        self.profiles
            .create_profile(NewProfile {
                uuid,
                full_name: format!("Agent {uuid}"),
                email: Some(format!("{}@example.com", uuid.into_uuid().simple())),
                role: ProfileRole::Agent,
                invitations_left,
            })
            .await
    }
}
