//! Revoked session entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "revoked_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: Uuid,
    /// When the revoked token would have expired anyway.
    pub expires_at: DateTimeWithTimeZone,
    pub revoked_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn revoked_now(session_id: Uuid, expires_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            session_id: Set(session_id),
            expires_at: Set(expires_at.into()),
            revoked_at: Set(chrono::Utc::now().into()),
        }
    }
}
