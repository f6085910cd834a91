use async_trait::async_trait;
use sqlx::error::ErrorKind;

use crate::database::SqliteDatabase;
use crate::error::Error;

use super::{AdminUserRow, User, UserId};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, Error>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    async fn fetch_users_with_campaign_counts(&self) -> Result<Vec<AdminUserRow>, Error>;

    async fn delete_user(&self, user_id: UserId) -> Result<(), Error>;

    async fn promote_user_to_admin(&self, email: &str) -> Result<bool, Error>;
}

#[async_trait]
impl UserStore for SqliteDatabase {
    #[tracing::instrument(skip(self, password_hash))]
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, Error> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES (?, ?) \
             RETURNING id, email, password_hash, role, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(err)) if err.kind() == ErrorKind::UniqueViolation => {
                Err(Error::EmailAlreadyRegistered)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_users_with_campaign_counts(&self) -> Result<Vec<AdminUserRow>, Error> {
        let users = sqlx::query_as::<_, AdminUserRow>(
            "SELECT u.id, u.email, u.role, u.created_at, \
               (SELECT COUNT(*) FROM user_campaigns uc WHERE uc.user_id = u.id) AS campaign_count \
             FROM users u \
             ORDER BY u.created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_user(&self, user_id: UserId) -> Result<(), Error> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn promote_user_to_admin(&self, email: &str) -> Result<bool, Error> {
        let result = sqlx::query("UPDATE users SET role = 'admin' WHERE email = ?")
            .bind(email)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
