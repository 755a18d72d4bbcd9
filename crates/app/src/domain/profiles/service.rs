//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::profiles::{
        data::{NewProfile, ProfileUpdate},
        errors::ProfilesServiceError,
        records::{ProfileRecord, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_profile(&self, profile: ProfileUuid) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_profile(
        &self,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        if update.full_name.trim().is_empty() {
            return Err(ProfilesServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, profile, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn deactivate_profile(&self, profile: ProfileUuid) -> Result<(), ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.deactivate_profile(&mut tx, profile).await?;

        if rows_affected == 0 {
            // Already inactive profiles still exist; unknown ones surface as NotFound.
            self.repository.get_profile(&mut tx, profile).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn grant_invitations(
        &self,
        profile: ProfileUuid,
        count: u32,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .grant_invitations(&mut tx, profile, count)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Retrieve a single profile.
    async fn get_profile(&self, profile: ProfileUuid) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Creates a profile outside of the invitation flow (seeding, administration).
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Applies a profile edit.
    async fn update_profile(
        &self,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Soft-deactivates a profile. Deactivating an inactive profile is a no-op.
    async fn deactivate_profile(&self, profile: ProfileUuid) -> Result<(), ProfilesServiceError>;

    /// Adds `count` invitations to the profile's allotment.
    async fn grant_invitations(
        &self,
        profile: ProfileUuid,
        count: u32,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}
