//! PostgreSQL session revocation list.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, sea_query::OnConflict};
use uuid::Uuid;

use secretly_core::error::RepoError;
use secretly_core::ports::SessionRevocations;

use super::entity::revoked_session::{self, Entity as RevokedSessionEntity};
use super::postgres_repo::query_error;

/// Revoked session ids in the `revoked_sessions` table.
///
/// Rows whose token has expired are pruned on every revoke.
pub struct PostgresSessionRevocations {
    db: Arc<DbConn>,
}

impl PostgresSessionRevocations {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRevocations for PostgresSessionRevocations {
    async fn revoke(&self, session_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), RepoError> {
        RevokedSessionEntity::insert(revoked_session::ActiveModel::revoked_now(
            session_id, expires_at,
        ))
        .on_conflict(
            OnConflict::column(revoked_session::Column::SessionId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await
        .map_err(query_error)?;

        let pruned = RevokedSessionEntity::delete_many()
            .filter(revoked_session::Column::ExpiresAt.lt(Utc::now()))
            .exec(self.db.as_ref())
            .await
            .map_err(query_error)?;

        tracing::debug!(%session_id, pruned = pruned.rows_affected, "Session revoked");
        Ok(())
    }

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RepoError> {
        let row = RevokedSessionEntity::find_by_id(session_id)
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(row.is_some())
    }
}
