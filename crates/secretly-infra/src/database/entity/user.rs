//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub password_hash: Option<String>,
    #[sea_orm(unique)]
    pub provider_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain aggregate from the user row and its post rows.
    pub fn into_domain(self, posts: Vec<super::post::Model>) -> secretly_core::domain::User {
        secretly_core::domain::User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            provider_id: self.provider_id,
            posts: posts.into_iter().map(Into::into).collect(),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel. Posts are stored separately.
impl From<&secretly_core::domain::User> for ActiveModel {
    fn from(user: &secretly_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            provider_id: Set(user.provider_id.clone()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
