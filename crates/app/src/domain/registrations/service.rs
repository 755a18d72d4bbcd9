//! Registrations service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        emails::normalize_email,
        invitations::{
            codes::normalize_code,
            policy::InvitationPolicy,
            records::{InvitationRejection, InvitationStatus},
            repository::PgInvitationsRepository,
        },
        profiles::{
            data::NewProfile,
            records::ProfileRole,
            repository::PgProfilesRepository,
        },
        registrations::{
            data::{NewRegistration, Registration},
            errors::RegistrationsServiceError,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgRegistrationsService {
    db: Db,
    invitations: PgInvitationsRepository,
    profiles: PgProfilesRepository,
    policy: InvitationPolicy,
}

impl PgRegistrationsService {
    #[must_use]
    pub fn new(db: Db, policy: InvitationPolicy) -> Self {
        Self {
            db,
            invitations: PgInvitationsRepository::new(),
            profiles: PgProfilesRepository::new(),
            policy,
        }
    }
}

#[async_trait]
impl RegistrationsService for PgRegistrationsService {
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<Registration, RegistrationsServiceError> {
        let code = normalize_code(&registration.code)?;

        let full_name = registration.full_name.trim();

        if full_name.is_empty() {
            return Err(RegistrationsServiceError::MissingRequiredData);
        }

        let email = normalize_email(registration.email.as_deref())
            .map_err(|_| RegistrationsServiceError::InvalidEmail)?;

        let user = registration.user;

        let mut tx = self.db.begin_transaction().await?;

        let invitation = self
            .invitations
            .find_by_code_for_update(&mut tx, &code)
            .await?
            .ok_or(InvitationRejection::NotFound)?;

        if invitation.status == InvitationStatus::Used && invitation.used_by == Some(user) {
            let profile = self.profiles.get_profile(&mut tx, user).await?;

            tx.commit().await?;

            info!(user = %user, invitation = %invitation.uuid, "registration replayed");

            return Ok(Registration {
                profile,
                invitation,
                replayed: true,
            });
        }

        invitation.check_redeemable(Timestamp::now())?;

        if invitation.inviter == user {
            return Err(RegistrationsServiceError::SelfReferral);
        }

        let profile = self
            .profiles
            .bind_invited_profile(
                &mut tx,
                NewProfile {
                    uuid: user,
                    full_name: full_name.to_string(),
                    email,
                    role: ProfileRole::Agent,
                    invitations_left: self.policy.starting_allotment,
                },
                invitation.inviter,
            )
            .await?
            .ok_or(RegistrationsServiceError::AlreadyRegistered)?;

        let invitation = self
            .invitations
            .mark_used(&mut tx, invitation.uuid, user)
            .await?
            .ok_or(InvitationRejection::AlreadyUsed)?;

        self.profiles
            .grant_invitations(&mut tx, invitation.inviter, self.policy.inviter_bonus)
            .await?;

        tx.commit().await?;

        info!(
            user = %user,
            inviter = %invitation.inviter,
            invitation = %invitation.uuid,
            "registration completed"
        );

        Ok(Registration {
            profile,
            invitation,
            replayed: false,
        })
    }
}

#[automock]
#[async_trait]
pub trait RegistrationsService: Send + Sync {
    /// Redeem an invitation code for a newly signed-up user.
    ///
    /// Creates (or activates) the user's profile with the starting allotment,
    /// marks the invitation used and credits the inviter, all in one
    /// transaction. Repeating a completed registration for the same user and
    /// code returns the stored result with `replayed` set and changes nothing.
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<Registration, RegistrationsServiceError>;
}
