//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::profiles::{
    data::{NewProfile, ProfileUpdate},
    records::{ProfileRecord, ProfileRole, ProfileUuid},
};

const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const GET_PROFILE_FOR_UPDATE_SQL: &str = include_str!("sql/get_profile_for_update.sql");
const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const DEACTIVATE_PROFILE_SQL: &str = include_str!("sql/deactivate_profile.sql");
const GRANT_INVITATIONS_SQL: &str = include_str!("sql/grant_invitations.sql");
const SPEND_INVITATION_SQL: &str = include_str!("sql/spend_invitation.sql");
const BIND_INVITED_PROFILE_SQL: &str = include_str!("sql/bind_invited_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a profile and hold its row lock until the transaction ends.
    pub(crate) async fn get_profile_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_FOR_UPDATE_SQL)
            .bind(profile.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewProfile,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(CREATE_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.full_name)
            .bind(profile.email)
            .bind(profile.role.as_str())
            .bind(encode_count("invitations_left", profile.invitations_left)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(UPDATE_PROFILE_SQL)
            .bind(profile.into_uuid())
            .bind(update.full_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_PROFILE_SQL)
            .bind(profile.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn grant_invitations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        count: u32,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GRANT_INVITATIONS_SQL)
            .bind(profile.into_uuid())
            .bind(encode_count("count", count)?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Decrement the allotment by one.
    ///
    /// Returns `None` when the profile is inactive or has nothing left to spend.
    pub(crate) async fn spend_invitation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(SPEND_INVITATION_SQL)
            .bind(profile.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Create the profile for a newly registered user, or activate an existing
    /// unbound one, linking it to its inviter.
    ///
    /// Returns `None` when the profile exists and is already bound to an inviter.
    pub(crate) async fn bind_invited_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewProfile,
        invited_by: ProfileUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(BIND_INVITED_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.full_name)
            .bind(profile.email)
            .bind(profile.role.as_str())
            .bind(encode_count("invitations_left", profile.invitations_left)?)
            .bind(invited_by.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role
            .parse::<ProfileRole>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        let invitations_left: i32 = row.try_get("invitations_left")?;

        let invitations_left =
            u32::try_from(invitations_left).map_err(|e| sqlx::Error::ColumnDecode {
                index: "invitations_left".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            role,
            invitations_left,
            invited_by: row
                .try_get::<Option<Uuid>, _>("invited_by_uuid")?
                .map(ProfileUuid::from_uuid),
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn encode_count(column: &str, count: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
