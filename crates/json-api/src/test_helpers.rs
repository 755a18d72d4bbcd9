//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use surecrm_app::{
    auth::MockIdentityService,
    context::AppContext,
    domain::{
        invitations::{
            MockInvitationsService,
            records::{InvitationRecord, InvitationStatus, InvitationUuid},
        },
        profiles::{
            MockProfilesService,
            records::{ProfileRecord, ProfileRole, ProfileUuid},
        },
        registrations::MockRegistrationsService,
    },
};
use uuid::Uuid;

use crate::{
    auth::webhook::WebhookSecret,
    extensions::*,
    state::State,
};

pub(crate) const TEST_USER_UUID: ProfileUuid = ProfileUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

/// Service mocks backing a test [`State`].
pub(crate) struct Mocks {
    pub(crate) profiles: MockProfilesService,
    pub(crate) invitations: MockInvitationsService,
    pub(crate) registrations: MockRegistrationsService,
    pub(crate) identity: MockIdentityService,
}

impl Mocks {
    /// Mocks that fail the test if any method is called.
    pub(crate) fn strict() -> Self {
        Self {
            profiles: strict_profiles_mock(),
            invitations: strict_invitations_mock(),
            registrations: strict_registrations_mock(),
            identity: strict_identity_mock(),
        }
    }
}

pub(crate) fn strict_profiles_mock() -> MockProfilesService {
    let mut profiles = MockProfilesService::new();

    profiles.expect_get_profile().never();
    profiles.expect_create_profile().never();
    profiles.expect_update_profile().never();
    profiles.expect_deactivate_profile().never();
    profiles.expect_grant_invitations().never();

    profiles
}

pub(crate) fn strict_invitations_mock() -> MockInvitationsService {
    let mut invitations = MockInvitationsService::new();

    invitations.expect_validate_code().never();
    invitations.expect_allowance().never();
    invitations.expect_issue_invitation().never();
    invitations.expect_list_invitations().never();
    invitations.expect_expire_invitations().never();

    invitations
}

pub(crate) fn strict_registrations_mock() -> MockRegistrationsService {
    let mut registrations = MockRegistrationsService::new();

    registrations.expect_register().never();

    registrations
}

fn strict_identity_mock() -> MockIdentityService {
    let mut identity = MockIdentityService::new();

    identity.expect_authenticate_bearer().never();

    identity
}

pub(crate) fn state_with(mocks: Mocks) -> Arc<State> {
    State::from_app_context(
        AppContext {
            profiles: Arc::new(mocks.profiles),
            invitations: Arc::new(mocks.invitations),
            registrations: Arc::new(mocks.registrations),
            identity: Arc::new(mocks.identity),
        },
        WebhookSecret::new(TEST_WEBHOOK_SECRET),
    )
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Route served as the authenticated [`TEST_USER_UUID`].
pub(crate) fn authenticated_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Route guarded by the webhook secret check.
pub(crate) fn webhook_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks)))
            .hoop(crate::auth::webhook::handler)
            .push(route),
    )
}

/// Unauthenticated route.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with(mocks))).push(route))
}

pub(crate) fn make_profile(uuid: ProfileUuid) -> ProfileRecord {
    ProfileRecord {
        uuid,
        full_name: "Ada Agent".to_string(),
        email: Some("ada@example.com".to_string()),
        role: ProfileRole::Agent,
        invitations_left: 2,
        invited_by: None,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_invitation(inviter: ProfileUuid, code: &str) -> InvitationRecord {
    InvitationRecord {
        uuid: InvitationUuid::from_uuid(Uuid::now_v7()),
        code: code.to_string(),
        inviter,
        invitee_email: None,
        status: InvitationStatus::Pending,
        used_by: None,
        used_at: None,
        expires_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
