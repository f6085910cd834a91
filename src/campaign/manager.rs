use serde_json::Value;
use tracing::{error, warn};

use crate::database::Database;
use crate::error::Error;
use crate::googleads::{
    extract_resource_id, BudgetDeliveryMethod, CampaignStatus, CustomerId, Entity,
    EuPoliticalAdvertisingStatus, GoogleAds, MutateBatch, MutateResponse,
};
use crate::googleads::AdvertisingChannelType;
use crate::user::UserId;
use crate::violations::Violation;

use super::{
    Bidding, BiddingStrategy, CampaignBudgetResource, CampaignId, CampaignResource,
    CampaignStatusUpdate, NetworkSettings,
};

/// Validates a campaign-creation request, returning the validated budget
/// amount when the request is well formed.
pub fn validate_create_campaign(
    name: &str,
    budget_amount_micros: Option<i64>,
) -> Result<i64, Vec<Violation>> {
    let mut violations = vec![];
    if name.trim().is_empty() {
        violations.push(Violation::CampaignNameMissing);
    }
    let amount = match budget_amount_micros {
        None => {
            violations.push(Violation::BudgetAmountMissing);
            0
        }
        Some(amount) if amount <= 0 => {
            violations.push(Violation::BudgetAmountNotPositive {
                amount_micros: amount,
            });
            0
        }
        Some(amount) => amount,
    };

    if violations.is_empty() {
        Ok(amount)
    } else {
        Err(violations)
    }
}

pub fn validate_status_change(
    status: Option<CampaignStatus>,
) -> Result<CampaignStatus, Vec<Violation>> {
    match status {
        Some(status @ (CampaignStatus::Enabled | CampaignStatus::Paused)) => Ok(status),
        Some(status) => Err(vec![Violation::StatusNotAllowed { provided: status }]),
        None => Err(vec![Violation::StatusMissing]),
    }
}

/// Exact (user, campaign) lookup against the local ownership store. No
/// platform call is involved.
#[tracing::instrument(skip(db))]
pub async fn verify_campaign_ownership(
    db: &dyn Database,
    user_id: UserId,
    campaign_id: CampaignId,
) -> Result<bool, Error> {
    db.ownerships()
        .ownership_exists(user_id, &campaign_id.to_string())
        .await
}

#[tracing::instrument(skip(db, ads))]
pub async fn list_campaigns(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    user_id: UserId,
) -> Result<Vec<Value>, Error> {
    let owned = db.ownerships().fetch_campaign_ids_by_user(user_id).await?;
    let mut campaign_ids: Vec<CampaignId> = vec![];
    for raw in &owned {
        match raw.parse() {
            Ok(id) => campaign_ids.push(id),
            Err(_) => warn!("skipping malformed owned campaign id: {}", raw),
        }
    }

    if campaign_ids.is_empty() {
        return Ok(vec![]);
    }

    let id_list = campaign_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let query = format!(
        "SELECT \
           campaign.id, \
           campaign.name, \
           campaign.status, \
           campaign.advertising_channel_type, \
           campaign_budget.amount_micros, \
           metrics.impressions, \
           metrics.clicks, \
           metrics.cost_micros \
         FROM campaign \
         WHERE campaign.advertising_channel_type = 'SEARCH' \
           AND campaign.id IN ({}) \
         ORDER BY campaign.name",
        id_list
    );

    ads.search(&query).await
}

/// Creates a budget and a campaign referencing it in one atomic batch,
/// records ownership for the creating user, and returns the generated
/// campaign id.
#[tracing::instrument(skip(db, ads))]
pub async fn create_campaign(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    customer_id: &CustomerId,
    user_id: UserId,
    name: String,
    budget_amount_micros: Option<i64>,
    bidding_strategy: BiddingStrategy,
) -> Result<(MutateResponse, CampaignId), Error> {
    let amount_micros = validate_create_campaign(&name, budget_amount_micros)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let mut batch = MutateBatch::new(customer_id.clone());
    let budget_resource_name = batch.allocate_temporary_name(Entity::CampaignBudget);
    batch.create(
        Entity::CampaignBudget,
        &CampaignBudgetResource {
            resource_name: budget_resource_name.clone(),
            name: format!("{} Budget", name),
            amount_micros,
            delivery_method: BudgetDeliveryMethod::Standard,
            explicitly_shared: false,
        },
    )?;
    batch.create(
        Entity::Campaign,
        &CampaignResource {
            name,
            campaign_budget: budget_resource_name,
            advertising_channel_type: AdvertisingChannelType::Search,
            status: CampaignStatus::Paused,
            network_settings: NetworkSettings {
                target_google_search: true,
                target_search_network: false,
                target_content_network: false,
            },
            contains_eu_political_advertising:
                EuPoliticalAdvertisingStatus::DoesNotContainEuPoliticalAdvertising,
            bidding: Bidding::from(bidding_strategy),
        },
    )?;

    let response = ads.mutate(batch.into_operations()).await?;

    // a created-but-untracked campaign; log everything we got back
    let campaign_id = match extract_resource_id(&response, Entity::Campaign)
        .and_then(|raw| raw.parse::<CampaignId>().ok())
    {
        Some(id) => id,
        None => {
            error!(
                response = %serde_json::to_string(&response).unwrap_or_default(),
                "no campaign result in mutate response"
            );
            return Err(Error::MutationResultMissing {
                entity: Entity::Campaign,
            });
        }
    };

    db.ownerships()
        .insert_ownership(user_id, &campaign_id.to_string())
        .await?;

    Ok((response, campaign_id))
}

#[tracing::instrument(skip(db, ads))]
pub async fn change_campaign_status(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    customer_id: &CustomerId,
    user_id: UserId,
    campaign_id: CampaignId,
    status: Option<CampaignStatus>,
) -> Result<MutateResponse, Error> {
    if !verify_campaign_ownership(db, user_id, campaign_id).await? {
        return Err(Error::AccessDenied);
    }

    let status = validate_status_change(status)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let mut batch = MutateBatch::new(customer_id.clone());
    batch.update(
        Entity::Campaign,
        &CampaignStatusUpdate {
            resource_name: campaign_id.resource_name(customer_id),
            status,
        },
    )?;

    ads.mutate(batch.into_operations()).await
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::database::test::MockDatabase;
    use crate::googleads::test::{mutate_response, MockGoogleAds};
    use crate::googleads::{MutateOperation, OperationKind};

    use super::*;

    fn customer_id() -> CustomerId {
        CustomerId::new("1234567890").unwrap()
    }

    #[tokio::test]
    async fn create_campaign_builds_an_atomic_budget_and_campaign_batch() {
        let db = {
            let mut db = MockDatabase::new();
            db.ownerships.on_insert_ownership = Box::new(|user_id, campaign_id| {
                assert_eq!(user_id, 7);
                assert_eq!(campaign_id, "456");
                Ok(())
            });
            db
        };
        let captured = Arc::new(Mutex::new(Vec::<MutateOperation>::new()));
        let captured_clone = Arc::clone(&captured);
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(move |operations| {
            *captured_clone.lock().unwrap() = operations.to_vec();
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "campaignBudgetResult": { "resourceName": "customers/1234567890/campaignBudgets/11" } },
                    { "campaignResult": { "resourceName": "customers/1234567890/campaigns/456" } },
                ]
            })))
        });

        let (_, campaign_id) = create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(5_000_000),
            BiddingStrategy::default(),
        )
        .await
        .unwrap();

        assert_eq!(campaign_id, CampaignId::from(456));

        let operations = captured.lock().unwrap().clone();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].entity, Entity::CampaignBudget);
        assert_eq!(operations[0].kind, OperationKind::Create);
        assert_eq!(
            operations[0].resource,
            json!({
                "resource_name": "customers/1234567890/campaignBudgets/-1",
                "name": "Spring Sale Budget",
                "amount_micros": 5_000_000,
                "delivery_method": "STANDARD",
                "explicitly_shared": false,
            })
        );
        assert_eq!(operations[1].entity, Entity::Campaign);
        assert_eq!(
            operations[1].resource,
            json!({
                "name": "Spring Sale",
                "campaign_budget": "customers/1234567890/campaignBudgets/-1",
                "advertising_channel_type": "SEARCH",
                "status": "PAUSED",
                "network_settings": {
                    "target_google_search": true,
                    "target_search_network": false,
                    "target_content_network": false,
                },
                "contains_eu_political_advertising":
                    "DOES_NOT_CONTAIN_EU_POLITICAL_ADVERTISING",
                "target_spend": { "cpc_bid_ceiling_micros": 10_000_000 },
            })
        );
    }

    #[tokio::test]
    async fn create_campaign_rejects_a_missing_name_and_budget() {
        let db = MockDatabase::new();
        let ads = MockGoogleAds::new();

        let error = create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "".into(),
            None,
            BiddingStrategy::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            Error::RequestViolatesRules {
                violations: vec![
                    Violation::CampaignNameMissing,
                    Violation::BudgetAmountMissing,
                ],
            }
        );
    }

    #[tokio::test]
    async fn create_campaign_rejects_a_non_positive_budget() {
        let db = MockDatabase::new();
        let ads = MockGoogleAds::new();

        let error = create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(0),
            BiddingStrategy::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            Error::RequestViolatesRules {
                violations: vec![Violation::BudgetAmountNotPositive { amount_micros: 0 }],
            }
        );
    }

    #[tokio::test]
    async fn manual_cpc_attaches_only_the_manual_bid_block() {
        let mut db = MockDatabase::new();
        db.ownerships.on_insert_ownership = Box::new(|_, _| Ok(()));
        let captured = Arc::new(Mutex::new(Vec::<MutateOperation>::new()));
        let captured_clone = Arc::clone(&captured);
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(move |operations| {
            *captured_clone.lock().unwrap() = operations.to_vec();
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "campaignResult": { "resourceName": "customers/1234567890/campaigns/456" } },
                ]
            })))
        });

        create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(5_000_000),
            BiddingStrategy::ManualCpc,
        )
        .await
        .unwrap();

        let operations = captured.lock().unwrap().clone();
        let campaign = &operations[1].resource;
        assert_eq!(
            campaign.get("manual_cpc"),
            Some(&json!({ "enhanced_cpc_enabled": false }))
        );
        assert_eq!(campaign.get("target_spend"), None);
        assert_eq!(campaign.get("target_cpa"), None);
    }

    #[tokio::test]
    async fn target_cpa_attaches_only_the_fixed_target_block() {
        let mut db = MockDatabase::new();
        db.ownerships.on_insert_ownership = Box::new(|_, _| Ok(()));
        let captured = Arc::new(Mutex::new(Vec::<MutateOperation>::new()));
        let captured_clone = Arc::clone(&captured);
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(move |operations| {
            *captured_clone.lock().unwrap() = operations.to_vec();
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "campaignResult": { "resourceName": "customers/1234567890/campaigns/456" } },
                ]
            })))
        });

        create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(5_000_000),
            BiddingStrategy::TargetCpa,
        )
        .await
        .unwrap();

        let operations = captured.lock().unwrap().clone();
        let campaign = &operations[1].resource;
        assert_eq!(
            campaign.get("target_cpa"),
            Some(&json!({ "target_cpa_micros": 1_000_000 }))
        );
        assert_eq!(campaign.get("target_spend"), None);
        assert_eq!(campaign.get("manual_cpc"), None);
    }

    #[tokio::test]
    async fn a_missing_campaign_result_is_surfaced_as_unrecoverable() {
        // ownership must not be written; the default mock panics on insert
        let db = MockDatabase::new();
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(|_| {
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "campaignBudgetResult": { "resourceName": "customers/1234567890/campaignBudgets/11" } },
                ]
            })))
        });

        let error = create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(5_000_000),
            BiddingStrategy::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            Error::MutationResultMissing {
                entity: Entity::Campaign,
            }
        );
    }

    #[tokio::test]
    async fn a_created_campaign_is_immediately_owned_by_its_creator() {
        let owned = Arc::new(Mutex::new(Vec::<String>::new()));
        let owned_clone = Arc::clone(&owned);
        let mut db = MockDatabase::new();
        db.ownerships.on_insert_ownership = Box::new(move |_, campaign_id| {
            owned_clone.lock().unwrap().push(campaign_id.to_string());
            Ok(())
        });
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(|_| {
            Ok(mutate_response(json!({
                "mutateOperationResponses": [
                    { "campaignResult": { "resourceName": "customers/1234567890/campaigns/777" } },
                ]
            })))
        });

        let (_, campaign_id) = create_campaign(
            &db,
            &ads,
            &customer_id(),
            7,
            "Spring Sale".into(),
            Some(5_000_000),
            BiddingStrategy::default(),
        )
        .await
        .unwrap();

        let owned = owned.lock().unwrap().clone();
        assert_eq!(owned, vec![campaign_id.to_string()]);

        // the ownership check for the creating user now succeeds
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(move |user_id, id| {
            Ok(user_id == 7 && id == "777")
        });
        assert!(verify_campaign_ownership(&db, 7, campaign_id).await.unwrap());
        assert!(!verify_campaign_ownership(&db, 8, campaign_id).await.unwrap());
    }

    #[tokio::test]
    async fn status_change_requires_ownership() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(false));
        let ads = MockGoogleAds::new();

        let error = change_campaign_status(
            &db,
            &ads,
            &customer_id(),
            8,
            CampaignId::from(456),
            Some(CampaignStatus::Enabled),
        )
        .await
        .unwrap_err();

        assert_eq!(error, Error::AccessDenied);
    }

    #[tokio::test]
    async fn status_change_rejects_other_statuses() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(true));
        let ads = MockGoogleAds::new();

        let error = change_campaign_status(
            &db,
            &ads,
            &customer_id(),
            7,
            CampaignId::from(456),
            Some(CampaignStatus::Removed),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error,
            Error::RequestViolatesRules {
                violations: vec![Violation::StatusNotAllowed {
                    provided: CampaignStatus::Removed,
                }],
            }
        );
    }

    #[tokio::test]
    async fn status_change_builds_an_update_with_a_status_mask() {
        let mut db = MockDatabase::new();
        db.ownerships.on_ownership_exists = Box::new(|_, _| Ok(true));
        let captured = Arc::new(Mutex::new(Vec::<MutateOperation>::new()));
        let captured_clone = Arc::clone(&captured);
        let mut ads = MockGoogleAds::new();
        ads.on_mutate = Box::new(move |operations| {
            *captured_clone.lock().unwrap() = operations.to_vec();
            Ok(mutate_response(json!({ "mutateOperationResponses": [] })))
        });

        change_campaign_status(
            &db,
            &ads,
            &customer_id(),
            7,
            CampaignId::from(456),
            Some(CampaignStatus::Enabled),
        )
        .await
        .unwrap();

        let operations = captured.lock().unwrap().clone();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].kind, OperationKind::Update);
        assert_eq!(operations[0].update_mask.as_deref(), Some("status"));
        assert_eq!(
            operations[0].resource,
            json!({
                "resource_name": "customers/1234567890/campaigns/456",
                "status": "ENABLED",
            })
        );
    }

    #[tokio::test]
    async fn listing_without_ownership_skips_the_platform() {
        let mut db = MockDatabase::new();
        db.ownerships.on_fetch_campaign_ids_by_user = Box::new(|_| Ok(vec![]));
        let ads = MockGoogleAds::new();

        let rows = list_campaigns(&db, &ads, 7).await.unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn owned_campaign_ids_scope_the_listing_query() {
        let mut db = MockDatabase::new();
        db.ownerships.on_fetch_campaign_ids_by_user =
            Box::new(|_| Ok(vec!["456".to_string(), "789".to_string()]));
        let mut ads = MockGoogleAds::new();
        ads.on_search = Box::new(|query| {
            assert!(query.contains("campaign.id IN (456,789)"), "{}", query);
            Ok(vec![json!({ "campaign": { "id": "456" } })])
        });

        let rows = list_campaigns(&db, &ads, 7).await.unwrap();

        assert_eq!(rows.len(), 1);
    }
}
