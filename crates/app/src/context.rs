//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{IdentityConfig, IdentityService, JwtIdentityService},
    database::{self, Db},
    domain::{
        invitations::{InvitationsService, PgInvitationsService, policy::InvitationPolicy},
        profiles::{PgProfilesService, ProfilesService},
        registrations::{PgRegistrationsService, RegistrationsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub profiles: Arc<dyn ProfilesService>,
    pub invitations: Arc<dyn InvitationsService>,
    pub registrations: Arc<dyn RegistrationsService>,
    pub identity: Arc<dyn IdentityService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when
    /// `run_migrations` is set and a migration fails to apply.
    pub async fn from_database_url(
        url: &str,
        run_migrations: bool,
        policy: InvitationPolicy,
        identity: &IdentityConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(Db::new(pool), policy, identity))
    }

    #[must_use]
    pub fn from_db(db: Db, policy: InvitationPolicy, identity: &IdentityConfig) -> Self {
        Self {
            profiles: Arc::new(PgProfilesService::new(db.clone())),
            invitations: Arc::new(PgInvitationsService::new(db.clone(), policy)),
            registrations: Arc::new(PgRegistrationsService::new(db, policy)),
            identity: Arc::new(JwtIdentityService::new(identity)),
        }
    }
}
