//! PostgreSQL repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Select, SqlErr,
};
use uuid::Uuid;

use secretly_core::domain::{Post, User};
use secretly_core::error::RepoError;
use secretly_core::ports::UserRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// PostgreSQL user repository. Posts live in their own table, keyed by owner.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    async fn find_one(&self, select: Select<UserEntity>) -> Result<Option<User>, RepoError> {
        let Some(user) = select.one(self.db.as_ref()).await.map_err(query_error)? else {
            return Ok(None);
        };

        let posts = user
            .find_related(PostEntity)
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(Some(user.into_domain(posts)))
    }
}

pub(super) fn query_error(err: DbErr) -> RepoError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// Classify a failed write. `sql` is the driver's reading of `err`.
///
/// Unique violations become [`RepoError::Constraint`]; foreign-key violations
/// mean the owning row is gone.
pub(super) fn write_error(err: DbErr, sql: Option<SqlErr>) -> RepoError {
    match sql {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Constraint(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepoError::NotFound,
        _ => query_error(err),
    }
}

fn classify_write(err: DbErr) -> RepoError {
    let sql = err.sql_err();
    write_error(err, sql)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.find_one(UserEntity::find_by_id(id)).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        self.find_one(UserEntity::find().filter(user::Column::Username.eq(username)))
            .await
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, RepoError> {
        self.find_one(UserEntity::find().filter(user::Column::ProviderId.eq(provider_id)))
            .await
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        UserEntity::insert(user::ActiveModel::from(&user))
            .exec(self.db.as_ref())
            .await
            .map_err(classify_write)?;

        tracing::debug!(user_id = %user.id, "User inserted");
        Ok(user)
    }

    async fn append_post(&self, user_id: Uuid, post: Post) -> Result<(), RepoError> {
        let post_id = post.id;

        // A single INSERT; the foreign key rejects posts for missing users.
        PostEntity::insert(post::ActiveModel::for_user(user_id, post))
            .exec(self.db.as_ref())
            .await
            .map_err(classify_write)?;

        tracing::debug!(%user_id, %post_id, "Post appended");
        Ok(())
    }

    async fn list_with_posts(&self) -> Result<Vec<User>, RepoError> {
        let rows = UserEntity::find()
            .find_with_related(PostEntity)
            .order_by_asc(user::Column::Id)
            .order_by_asc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|(user, posts)| user.into_domain(posts))
            .collect())
    }
}
