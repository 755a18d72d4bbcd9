//! Invitations service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info, warn};

use crate::{
    database::Db,
    domain::{
        emails::normalize_email,
        invitations::{
            codes::{CodeGenerator, MAX_CODE_ATTEMPTS, RandomCodeGenerator, fallback_code, normalize_code},
            data::{InvitationAllowance, InvitationValidation, NewInvitation},
            errors::InvitationsServiceError,
            policy::InvitationPolicy,
            records::{InvitationRecord, InvitationRejection, InvitationUuid},
            repository::{InvitationInsert, PgInvitationsRepository},
        },
        profiles::{records::ProfileUuid, repository::PgProfilesRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgInvitationsService {
    db: Db,
    repository: PgInvitationsRepository,
    profiles: PgProfilesRepository,
    policy: InvitationPolicy,
    codes: Arc<dyn CodeGenerator>,
}

impl PgInvitationsService {
    #[must_use]
    pub fn new(db: Db, policy: InvitationPolicy) -> Self {
        Self {
            db,
            repository: PgInvitationsRepository::new(),
            profiles: PgProfilesRepository::new(),
            policy,
            codes: Arc::new(RandomCodeGenerator),
        }
    }

    /// Replace the source of candidate codes.
    #[must_use]
    pub fn with_code_generator(mut self, codes: Arc<dyn CodeGenerator>) -> Self {
        self.codes = codes;
        self
    }

    /// Insert under a fresh code, retrying on collisions.
    async fn insert_with_unique_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        inviter: ProfileUuid,
        invitee_email: Option<&str>,
        expires_at: Option<Timestamp>,
    ) -> Result<InvitationRecord, InvitationsServiceError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.codes.generate();

            let inserted = self
                .repository
                .insert_invitation(
                    tx,
                    InvitationInsert {
                        uuid: InvitationUuid::new(),
                        code: &code,
                        inviter,
                        invitee_email,
                        expires_at,
                    },
                )
                .await?;

            if let Some(invitation) = inserted {
                return Ok(invitation);
            }

            debug!(attempt, "invitation code collision");
        }

        warn!(
            attempts = MAX_CODE_ATTEMPTS,
            "invitation code attempts exhausted, using fallback code"
        );

        let code = fallback_code();

        self.repository
            .insert_invitation(
                tx,
                InvitationInsert {
                    uuid: InvitationUuid::new(),
                    code: &code,
                    inviter,
                    invitee_email,
                    expires_at,
                },
            )
            .await?
            .ok_or(InvitationsServiceError::AlreadyExists)
    }
}

#[async_trait]
impl InvitationsService for PgInvitationsService {
    async fn validate_code(
        &self,
        code: &str,
    ) -> Result<InvitationValidation, InvitationsServiceError> {
        let code = normalize_code(code)?;

        let mut tx = self.db.begin_transaction().await?;

        let invitation = self.repository.find_by_code(&mut tx, &code).await?;

        tx.commit().await?;

        let Some(invitation) = invitation else {
            return Ok(InvitationValidation::Invalid(InvitationRejection::NotFound));
        };

        Ok(match invitation.check_redeemable(Timestamp::now()) {
            Ok(()) => InvitationValidation::Valid(invitation),
            Err(rejection) => InvitationValidation::Invalid(rejection),
        })
    }

    async fn allowance(
        &self,
        profile: ProfileUuid,
    ) -> Result<InvitationAllowance, InvitationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profiles
            .get_profile(&mut tx, profile)
            .await
            .map_err(profile_lookup_error)?;

        tx.commit().await?;

        Ok(InvitationAllowance {
            invitations_left: profile.invitations_left,
            can_issue: profile.can_issue_invitation(),
        })
    }

    async fn issue_invitation(
        &self,
        inviter: ProfileUuid,
        invitation: NewInvitation,
    ) -> Result<InvitationRecord, InvitationsServiceError> {
        let invitee_email = normalize_email(invitation.invitee_email.as_deref())
            .map_err(|_| InvitationsServiceError::InvalidData)?;

        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profiles
            .get_profile_for_update(&mut tx, inviter)
            .await?
            .ok_or(InvitationsServiceError::ProfileNotFound)?;

        if !profile.is_active {
            return Err(InvitationsServiceError::ProfileInactive);
        }

        if profile.invitations_left == 0 {
            return Err(InvitationsServiceError::NoInvitationsLeft);
        }

        let spent = self
            .profiles
            .spend_invitation(&mut tx, inviter)
            .await?
            .ok_or(InvitationsServiceError::NoInvitationsLeft)?;

        let expires_at = self
            .policy
            .expires_at(Timestamp::now())
            .map_err(InvitationsServiceError::ExpiryOutOfRange)?;

        let created = self
            .insert_with_unique_code(&mut tx, inviter, invitee_email.as_deref(), expires_at)
            .await?;

        tx.commit().await?;

        info!(
            inviter = %inviter,
            invitation = %created.uuid,
            invitations_left = spent.invitations_left,
            "issued invitation"
        );

        Ok(created)
    }

    async fn list_invitations(
        &self,
        inviter: ProfileUuid,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let invitations = self.repository.list_by_inviter(&mut tx, inviter).await?;

        tx.commit().await?;

        Ok(invitations)
    }

    async fn expire_invitations(&self) -> Result<u64, InvitationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let expired = self
            .repository
            .expire_invitations(&mut tx, Timestamp::now())
            .await?;

        tx.commit().await?;

        if expired > 0 {
            info!(expired, "expired pending invitations");
        }

        Ok(expired)
    }
}

fn profile_lookup_error(error: sqlx::Error) -> InvitationsServiceError {
    match error {
        sqlx::Error::RowNotFound => InvitationsServiceError::ProfileNotFound,
        error => error.into(),
    }
}

#[automock]
#[async_trait]
pub trait InvitationsService: Send + Sync {
    /// Report whether a submitted code could be redeemed right now.
    ///
    /// Unknown codes are a [`InvitationValidation::Invalid`] outcome rather than
    /// an error; only malformed input and storage failures are errors.
    async fn validate_code(
        &self,
        code: &str,
    ) -> Result<InvitationValidation, InvitationsServiceError>;

    /// Remaining allotment of a profile.
    async fn allowance(
        &self,
        profile: ProfileUuid,
    ) -> Result<InvitationAllowance, InvitationsServiceError>;

    /// Spend one unit of the inviter's allotment and issue a pending invitation.
    async fn issue_invitation(
        &self,
        inviter: ProfileUuid,
        invitation: NewInvitation,
    ) -> Result<InvitationRecord, InvitationsServiceError>;

    /// Invitations issued by `inviter`, newest first.
    async fn list_invitations(
        &self,
        inviter: ProfileUuid,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError>;

    /// Mark every pending invitation past its expiry as expired.
    async fn expire_invitations(&self) -> Result<u64, InvitationsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        domain::{
            invitations::{
                codes::{CODE_GROUP_LEN, CODE_GROUPS},
                records::InvitationStatus,
            },
            profiles::ProfilesService,
        },
        test::TestContext,
    };

    use super::*;

    #[derive(Debug)]
    struct FixedCodeGenerator(&'static str);

    impl CodeGenerator for FixedCodeGenerator {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    async fn backdate_expiry(ctx: &TestContext, invitation: InvitationUuid) -> TestResult {
        sqlx::query("UPDATE invitations SET expires_at = now() - interval '1 hour' WHERE uuid = $1")
            .bind(invitation.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn issue_invitation_spends_one_unit_and_returns_pending_code() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(2).await?;

        let invitation = ctx
            .invitations
            .issue_invitation(
                inviter.uuid,
                NewInvitation {
                    invitee_email: Some(" Friend@Example.com ".to_string()),
                },
            )
            .await?;

        assert_eq!(invitation.inviter, inviter.uuid);
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.invitee_email.as_deref(), Some("friend@example.com"));
        assert!(invitation.used_by.is_none());
        assert!(invitation.expires_at.is_none());

        let groups: Vec<&str> = invitation.code.split('-').collect();

        assert_eq!(groups.len(), CODE_GROUPS);
        assert!(groups.iter().all(|group| group.len() == CODE_GROUP_LEN));

        let allowance = ctx.invitations.allowance(inviter.uuid).await?;

        assert_eq!(allowance.invitations_left, 1);
        assert!(allowance.can_issue);

        Ok(())
    }

    #[tokio::test]
    async fn issue_invitation_with_exhausted_allotment_is_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(1).await?;

        ctx.invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        let result = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await;

        assert!(
            matches!(result, Err(InvitationsServiceError::NoInvitationsLeft)),
            "expected NoInvitationsLeft, got {result:?}"
        );

        let allowance = ctx.invitations.allowance(inviter.uuid).await?;

        assert_eq!(allowance.invitations_left, 0);
        assert!(!allowance.can_issue);
        assert_eq!(ctx.invitations.list_invitations(inviter.uuid).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn issue_invitation_for_inactive_profile_is_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(3).await?;

        ctx.profiles.deactivate_profile(inviter.uuid).await?;

        let result = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await;

        assert!(
            matches!(result, Err(InvitationsServiceError::ProfileInactive)),
            "expected ProfileInactive, got {result:?}"
        );

        assert_eq!(ctx.invitations.allowance(inviter.uuid).await?.invitations_left, 3);

        Ok(())
    }

    #[tokio::test]
    async fn issue_invitation_for_unknown_profile_returns_profile_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .invitations
            .issue_invitation(ProfileUuid::new(), NewInvitation::default())
            .await;

        assert!(
            matches!(result, Err(InvitationsServiceError::ProfileNotFound)),
            "expected ProfileNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn issue_invitation_rejects_malformed_invitee_email() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(1).await?;

        let result = ctx
            .invitations
            .issue_invitation(
                inviter.uuid,
                NewInvitation {
                    invitee_email: Some("not-an-email".to_string()),
                },
            )
            .await;

        assert!(
            matches!(result, Err(InvitationsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        assert_eq!(ctx.invitations.allowance(inviter.uuid).await?.invitations_left, 1);

        Ok(())
    }

    #[tokio::test]
    async fn issue_invitation_applies_configured_ttl() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(1).await?;

        let service = PgInvitationsService::new(
            ctx.app_db(),
            InvitationPolicy {
                ttl: Some(SignedDuration::from_hours(24)),
                ..InvitationPolicy::default()
            },
        );

        let before = Timestamp::now();
        let invitation = service
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        let expires_at = invitation.expires_at.ok_or("expected an expiry")?;

        assert!(expires_at >= before.checked_add(SignedDuration::from_hours(24))?);
        assert!(expires_at <= Timestamp::now().checked_add(SignedDuration::from_hours(24))?);

        Ok(())
    }

    #[tokio::test]
    async fn colliding_codes_fall_back_to_uuid_code() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(2).await?;

        let service = PgInvitationsService::new(ctx.app_db(), InvitationPolicy::default())
            .with_code_generator(Arc::new(FixedCodeGenerator("ABC-123-XYZ")));

        let first = service
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        let second = service
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        assert_eq!(first.code, "ABC-123-XYZ");
        assert!(second.code.starts_with("INV-"), "unexpected code: {}", second.code);
        assert_ne!(first.code, second.code);

        assert_eq!(service.allowance(inviter.uuid).await?.invitations_left, 0);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_issues_never_overdraw_the_allotment() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(3).await?;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = ctx.invitations.clone();

                tokio::spawn(async move {
                    service
                        .issue_invitation(inviter.uuid, NewInvitation::default())
                        .await
                })
            })
            .collect();

        let mut issued = 0;
        let mut refused = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => issued += 1,
                Err(InvitationsServiceError::NoInvitationsLeft) => refused += 1,
                Err(error) => return Err(error.into()),
            }
        }

        assert_eq!(issued, 3);
        assert_eq!(refused, 5);

        let invitations = ctx.invitations.list_invitations(inviter.uuid).await?;
        let codes: HashSet<&str> = invitations.iter().map(|i| i.code.as_str()).collect();

        assert_eq!(invitations.len(), 3);
        assert_eq!(codes.len(), 3);
        assert_eq!(ctx.invitations.allowance(inviter.uuid).await?.invitations_left, 0);

        Ok(())
    }

    #[tokio::test]
    async fn validate_code_accepts_pending_code_in_any_case() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(1).await?;

        let invitation = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        let submitted = format!("  {}  ", invitation.code.to_lowercase());
        let validation = ctx.invitations.validate_code(&submitted).await?;

        match validation {
            InvitationValidation::Valid(found) => {
                assert_eq!(found.uuid, invitation.uuid);
                assert_eq!(found.inviter, inviter.uuid);
            }
            InvitationValidation::Invalid(rejection) => {
                return Err(format!("expected a valid code, got {rejection:?}").into());
            }
        }

        Ok(())
    }

    #[tokio::test]
    async fn validate_code_unknown_code_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let validation = ctx.invitations.validate_code("ZZZ-000").await?;

        assert!(
            matches!(
                validation,
                InvitationValidation::Invalid(InvitationRejection::NotFound)
            ),
            "expected NotFound, got {validation:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_code_rejects_malformed_input() {
        let ctx = TestContext::new().await;

        let result = ctx.invitations.validate_code("   ").await;

        assert!(
            matches!(result, Err(InvitationsServiceError::InvalidCode(_))),
            "expected InvalidCode, got {result:?}"
        );
    }

    #[tokio::test]
    async fn validate_code_past_expiry_is_expired() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(1).await?;

        let invitation = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        backdate_expiry(&ctx, invitation.uuid).await?;

        let validation = ctx.invitations.validate_code(&invitation.code).await?;

        assert!(
            matches!(
                validation,
                InvitationValidation::Invalid(InvitationRejection::Expired)
            ),
            "expected Expired, got {validation:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expire_invitations_sweeps_only_past_due_pending() -> TestResult {
        let ctx = TestContext::new().await;
        let inviter = ctx.create_profile(2).await?;

        let stale = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        let fresh = ctx
            .invitations
            .issue_invitation(inviter.uuid, NewInvitation::default())
            .await?;

        backdate_expiry(&ctx, stale.uuid).await?;

        assert_eq!(ctx.invitations.expire_invitations().await?, 1);
        assert_eq!(ctx.invitations.expire_invitations().await?, 0);

        let invitations = ctx.invitations.list_invitations(inviter.uuid).await?;

        for invitation in invitations {
            let expected = if invitation.uuid == stale.uuid {
                InvitationStatus::Expired
            } else {
                assert_eq!(invitation.uuid, fresh.uuid);
                InvitationStatus::Pending
            };

            assert_eq!(invitation.status, expected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn list_invitations_only_returns_the_inviters_codes() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_profile(2).await?;
        let bob = ctx.create_profile(1).await?;

        ctx.invitations
            .issue_invitation(alice.uuid, NewInvitation::default())
            .await?;
        ctx.invitations
            .issue_invitation(alice.uuid, NewInvitation::default())
            .await?;
        ctx.invitations
            .issue_invitation(bob.uuid, NewInvitation::default())
            .await?;

        let invitations = ctx.invitations.list_invitations(alice.uuid).await?;

        assert_eq!(invitations.len(), 2);
        assert!(invitations.iter().all(|i| i.inviter == alice.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn allowance_for_unknown_profile_returns_profile_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.invitations.allowance(ProfileUuid::new()).await;

        assert!(
            matches!(result, Err(InvitationsServiceError::ProfileNotFound)),
            "expected ProfileNotFound, got {result:?}"
        );
    }
}
