use async_trait::async_trait;

use crate::database::SqliteDatabase;
use crate::error::Error;
use crate::user::UserId;

/// The local source of truth for who may act on which campaign. Campaign
/// ids are kept as opaque strings; the platform assigned them.
#[async_trait]
pub trait OwnershipStore: Send + Sync {
    async fn fetch_campaign_ids_by_user(&self, user_id: UserId) -> Result<Vec<String>, Error>;

    async fn ownership_exists(&self, user_id: UserId, campaign_id: &str) -> Result<bool, Error>;

    async fn insert_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error>;

    async fn delete_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error>;

    async fn delete_ownerships_by_user(&self, user_id: UserId) -> Result<(), Error>;
}

#[async_trait]
impl OwnershipStore for SqliteDatabase {
    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_ids_by_user(&self, user_id: UserId) -> Result<Vec<String>, Error> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT campaign_id FROM user_campaigns WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(ids)
    }

    #[tracing::instrument(skip(self))]
    async fn ownership_exists(&self, user_id: UserId, campaign_id: &str) -> Result<bool, Error> {
        let row = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM user_campaigns WHERE user_id = ? AND campaign_id = ?",
        )
        .bind(user_id)
        .bind(campaign_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.is_some())
    }

    // insert-if-absent keeps concurrent re-grants idempotent
    #[tracing::instrument(skip(self))]
    async fn insert_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error> {
        sqlx::query("INSERT OR IGNORE INTO user_campaigns (user_id, campaign_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(campaign_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_ownership(&self, user_id: UserId, campaign_id: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM user_campaigns WHERE user_id = ? AND campaign_id = ?")
            .bind(user_id)
            .bind(campaign_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_ownerships_by_user(&self, user_id: UserId) -> Result<(), Error> {
        sqlx::query("DELETE FROM user_campaigns WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
