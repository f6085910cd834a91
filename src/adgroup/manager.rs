use serde_json::Value;
use tracing::error;

use crate::campaign::{self, CampaignId};
use crate::database::Database;
use crate::error::Error;
use crate::googleads::{
    extract_resource_id, AdGroupStatus, AdGroupType, CustomerId, Entity, GoogleAds, MutateBatch,
    MutateResponse,
};
use crate::user::UserId;
use crate::violations::Violation;

use super::{AdGroupId, AdGroupResource};

pub fn validate_create_ad_group(name: &str) -> Result<(), Vec<Violation>> {
    if name.trim().is_empty() {
        Err(vec![Violation::AdGroupNameMissing])
    } else {
        Ok(())
    }
}

/// Resolves an ad group's parent campaign with a single upward platform
/// lookup. `None` means the ad group does not exist.
#[tracing::instrument(skip(ads))]
pub async fn resolve_parent_campaign(
    ads: &dyn GoogleAds,
    ad_group_id: AdGroupId,
) -> Result<Option<CampaignId>, Error> {
    let query = format!(
        "SELECT campaign.id FROM ad_group WHERE ad_group.id = {} LIMIT 1",
        ad_group_id
    );
    let rows = ads.search(&query).await?;

    let row = match rows.first() {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(campaign_id_from_row(row))
}

fn campaign_id_from_row(row: &Value) -> Option<CampaignId> {
    match row.pointer("/campaign/id")? {
        Value::String(raw) => raw.parse().ok(),
        Value::Number(number) => number.as_u64().map(CampaignId::from),
        _ => None,
    }
}

/// Resolve the parent campaign, then check campaign ownership. Ownership
/// is only ever defined at campaign granularity, so every deeper check
/// degrades to this two-step composition. Fails closed: a resolution or
/// store failure reads as not owned, never as authorized.
#[tracing::instrument(skip(db, ads))]
pub async fn verify_ad_group_ownership(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    user_id: UserId,
    ad_group_id: AdGroupId,
) -> bool {
    let campaign_id = match resolve_parent_campaign(ads, ad_group_id).await {
        Ok(Some(campaign_id)) => campaign_id,
        Ok(None) => return false,
        Err(err) => {
            error!("ownership check error: {}", err);
            return false;
        }
    };

    match campaign::manager::verify_campaign_ownership(db, user_id, campaign_id).await {
        Ok(owned) => owned,
        Err(err) => {
            error!("ownership check error: {}", err);
            false
        }
    }
}

#[tracing::instrument(skip(db, ads))]
pub async fn list_ad_groups(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    user_id: UserId,
    campaign_id: CampaignId,
) -> Result<Vec<Value>, Error> {
    if !campaign::manager::verify_campaign_ownership(db, user_id, campaign_id).await? {
        return Err(Error::AccessDenied);
    }

    let query = format!(
        "SELECT \
           ad_group.id, \
           ad_group.name, \
           ad_group.status, \
           ad_group.type, \
           ad_group.cpc_bid_micros \
         FROM ad_group \
         WHERE campaign.id = {} \
         ORDER BY ad_group.name",
        campaign_id
    );

    ads.search(&query).await
}

/// Creates an enabled standard search ad group under an owned campaign.
/// Unlike campaign creation, a missing generated id is tolerated here; it
/// is reported back as absent rather than failing the request.
#[tracing::instrument(skip(db, ads))]
pub async fn create_ad_group(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    customer_id: &CustomerId,
    user_id: UserId,
    campaign_id: CampaignId,
    name: String,
    cpc_bid_micros: i64,
) -> Result<(MutateResponse, Option<String>), Error> {
    if !campaign::manager::verify_campaign_ownership(db, user_id, campaign_id).await? {
        return Err(Error::AccessDenied);
    }

    validate_create_ad_group(&name)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let mut batch = MutateBatch::new(customer_id.clone());
    batch.create(
        Entity::AdGroup,
        &AdGroupResource {
            name,
            campaign: campaign_id.resource_name(customer_id),
            status: AdGroupStatus::Enabled,
            kind: AdGroupType::SearchStandard,
            cpc_bid_micros,
        },
    )?;

    let response = ads.mutate(batch.into_operations()).await?;
    let ad_group_id = extract_resource_id(&response, Entity::AdGroup);

    Ok((response, ad_group_id))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::adgroup::DEFAULT_CPC_BID_MICROS;
    use crate::database::test::MockDatabase;
    use crate::googleads::test::{mutate_response, MockGoogleAds};
    use crate::googleads::MutateOperation;

    use super::*;

    fn customer_id() -> CustomerId {
        CustomerId::new("1234567890").unwrap()
    }

    #[tokio::test]
    async fn resolution_walks_up_to_the_parent_campaign() {
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|query| {
            assert!(query.contains("ad_group.id = 789"), "{}", query);
            Ok(vec![json!({ "campaign": { "id": "456" }, "adGroup": { "id": "789" } })])
        });

        let campaign_id = resolve_parent_campaign(&ads, AdGroupId::from(789))
            .await
            .unwrap();

        assert_eq!(campaign_id, Some(CampaignId::from(456)));
    }

    #[tokio::test]
    async fn a_missing_ad_group_resolves_to_no_campaign() {
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|_| Ok(vec![]));

        let campaign_id = resolve_parent_campaign(&ads, AdGroupId::from(789))
            .await
            .unwrap();

        assert_eq!(campaign_id, None);
    }

    #[tokio::test]
    async fn ownership_delegates_to_the_campaign_check() {
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|_| Ok(vec![json!({ "campaign": { "id": "456" } })]));
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|user_id, campaign_id| {
            assert_eq!(campaign_id, "456");
            Ok(user_id == 7)
        });

        assert!(verify_ad_group_ownership(&db, &ads, 7, AdGroupId::from(789)).await);
        assert!(!verify_ad_group_ownership(&db, &ads, 8, AdGroupId::from(789)).await);
    }

    #[tokio::test]
    async fn ownership_fails_closed_on_platform_errors() {
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|_| {
            Err(Error::PlatformRejected {
                message: "quota exhausted".to_string(),
            })
        });
        let db = MockDatabase::new();

        assert!(!verify_ad_group_ownership(&db, &ads, 7, AdGroupId::from(789)).await);
    }

    #[tokio::test]
    async fn ownership_fails_closed_on_store_errors() {
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|_| Ok(vec![json!({ "campaign": { "id": "456" } })]));
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists =
            Box::new(|_, _| Err(Error::ExistentialState("pool dropped".to_string())));

        assert!(!verify_ad_group_ownership(&db, &ads, 7, AdGroupId::from(789)).await);
    }

    #[tokio::test]
    async fn listing_requires_campaign_ownership() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(false));
        let ads = MockGoogleAds::new();

        let error = list_ad_groups(&db, &ads, 8, CampaignId::from(456))
            .await
            .unwrap_err();

        assert_eq!(error, Error::AccessDenied);
    }

    #[tokio::test]
    async fn creation_builds_an_enabled_standard_search_ad_group() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(true));
        let captured = Arc::new(Mutex::new(Vec::<MutateOperation>::new()));
        let captured_clone = Arc::clone(&captured);
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(move |operations| {
            *captured_clone.lock().unwrap() = operations.to_vec();
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "adGroupResult": { "resourceName": "customers/1234567890/adGroups/789" } },
                ]
            })))
        });

        let (_, ad_group_id) = create_ad_group(
            &db,
            &ads,
            &customer_id(),
            7,
            CampaignId::from(456),
            "Brand terms".into(),
            DEFAULT_CPC_BID_MICROS,
        )
        .await
        .unwrap();

        assert_eq!(ad_group_id.as_deref(), Some("789"));

        let operations = captured.lock().unwrap().clone();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].entity, Entity::AdGroup);
        assert_eq!(
            operations[0].resource,
            json!({
                "name": "Brand terms",
                "campaign": "customers/1234567890/campaigns/456",
                "status": "ENABLED",
                "type": "SEARCH_STANDARD",
                "cpc_bid_micros": 1_000_000,
            })
        );
    }

    #[tokio::test]
    async fn creation_rejects_a_blank_name() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(true));
        let ads = MockGoogleAds::new();

        let error = create_ad_group(
            &db,
            &ads,
            &customer_id(),
            7,
            CampaignId::from(456),
            "  ".into(),
            DEFAULT_CPC_BID_MICROS,
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            Error::RequestViolatesRules {
                violations: vec![Violation::AdGroupNameMissing],
            }
        );
    }
}
