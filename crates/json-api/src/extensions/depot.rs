//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use surecrm_app::domain::profiles::records::ProfileUuid;

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated caller.
    fn insert_user_uuid(&mut self, user: ProfileUuid);

    /// The authenticated caller, or `401` when the route was reached without one.
    fn user_uuid_or_401(&self) -> Result<ProfileUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: ProfileUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<ProfileUuid, StatusError> {
        self.get::<ProfileUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
