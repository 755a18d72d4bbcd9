//! Invitations Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    invitations::records::{InvitationRecord, InvitationStatus, InvitationUuid},
    profiles::records::ProfileUuid,
};

const INSERT_INVITATION_SQL: &str = include_str!("sql/insert_invitation.sql");
const FIND_INVITATION_BY_CODE_SQL: &str = include_str!("sql/find_invitation_by_code.sql");
const FIND_INVITATION_BY_CODE_FOR_UPDATE_SQL: &str =
    include_str!("sql/find_invitation_by_code_for_update.sql");
const LIST_INVITATIONS_BY_INVITER_SQL: &str = include_str!("sql/list_invitations_by_inviter.sql");
const MARK_INVITATION_USED_SQL: &str = include_str!("sql/mark_invitation_used.sql");
const EXPIRE_INVITATIONS_SQL: &str = include_str!("sql/expire_invitations.sql");

/// Row values for a freshly issued invitation.
#[derive(Debug, Clone)]
pub(crate) struct InvitationInsert<'a> {
    pub(crate) uuid: InvitationUuid,
    pub(crate) code: &'a str,
    pub(crate) inviter: ProfileUuid,
    pub(crate) invitee_email: Option<&'a str>,
    pub(crate) expires_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInvitationsRepository;

impl PgInvitationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an invitation.
    ///
    /// Returns `None` when the code is already taken, leaving the transaction usable.
    pub(crate) async fn insert_invitation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invitation: InvitationInsert<'_>,
    ) -> Result<Option<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(INSERT_INVITATION_SQL)
            .bind(invitation.uuid.into_uuid())
            .bind(invitation.code)
            .bind(invitation.inviter.into_uuid())
            .bind(invitation.invitee_email)
            .bind(invitation.expires_at.map(SqlxTimestamp::from))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(FIND_INVITATION_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch an invitation and hold its row lock until the transaction ends.
    pub(crate) async fn find_by_code_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(FIND_INVITATION_BY_CODE_FOR_UPDATE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_by_inviter(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        inviter: ProfileUuid,
    ) -> Result<Vec<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(LIST_INVITATIONS_BY_INVITER_SQL)
            .bind(inviter.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Transition a pending invitation to used.
    ///
    /// Returns `None` if the invitation was no longer pending.
    pub(crate) async fn mark_used(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invitation: InvitationUuid,
        used_by: ProfileUuid,
    ) -> Result<Option<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(MARK_INVITATION_USED_SQL)
            .bind(invitation.into_uuid())
            .bind(used_by.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn expire_invitations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(EXPIRE_INVITATIONS_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for InvitationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<InvitationStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: InvitationUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            inviter: ProfileUuid::from_uuid(row.try_get("inviter_uuid")?),
            invitee_email: row.try_get("invitee_email")?,
            status,
            used_by: row
                .try_get::<Option<Uuid>, _>("used_by_uuid")?
                .map(ProfileUuid::from_uuid),
            used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
