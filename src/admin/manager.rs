use serde_json::Value;

use crate::database::Database;
use crate::error::Error;
use crate::googleads::GoogleAds;
use crate::user::{AdminUserRow, UserId};
use crate::violations::Violation;

#[tracing::instrument(skip(db))]
pub async fn list_users(db: &dyn Database) -> Result<Vec<AdminUserRow>, Error> {
    db.users().fetch_users_with_campaign_counts().await
}

/// Deletes a user and every ownership record they hold. The acting admin
/// can never delete themselves.
#[tracing::instrument(skip(db))]
pub async fn delete_user(
    db: &dyn Database,
    acting_user_id: UserId,
    user_id: UserId,
) -> Result<(), Error> {
    if acting_user_id == user_id {
        return Err(Error::CannotDeleteSelf);
    }

    db.ownerships().delete_ownerships_by_user(user_id).await?;
    db.users().delete_user(user_id).await?;

    Ok(())
}

/// Every SEARCH campaign on the platform, regardless of ownership.
#[tracing::instrument(skip(ads))]
pub async fn list_all_campaigns(ads: &dyn GoogleAds) -> Result<Vec<Value>, Error> {
    ads.search(
        "SELECT \
           campaign.id, \
           campaign.name, \
           campaign.status \
         FROM campaign \
         WHERE campaign.advertising_channel_type = 'SEARCH' \
         ORDER BY campaign.name",
    )
    .await
}

#[tracing::instrument(skip(db))]
pub async fn list_user_campaigns(
    db: &dyn Database,
    user_id: UserId,
) -> Result<Vec<String>, Error> {
    db.ownerships().fetch_campaign_ids_by_user(user_id).await
}

#[tracing::instrument(skip(db))]
pub async fn grant_campaign(
    db: &dyn Database,
    user_id: UserId,
    campaign_id: &str,
) -> Result<(), Error> {
    if campaign_id.trim().is_empty() {
        return Err(Error::RequestViolatesRules {
            violations: vec![Violation::CampaignIdMissing],
        });
    }

    db.ownerships().insert_ownership(user_id, campaign_id).await
}

#[tracing::instrument(skip(db))]
pub async fn revoke_campaign(
    db: &dyn Database,
    user_id: UserId,
    campaign_id: &str,
) -> Result<(), Error> {
    db.ownerships().delete_ownership(user_id, campaign_id).await
}
