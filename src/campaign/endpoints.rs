use actix_web::web::{Data, Json, Path};
use actix_web::{get, patch, post, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Identity;
use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::googleads::{CampaignStatus, GoogleAds, MutateResponse};

use super::{manager, BiddingStrategy, CampaignId};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budget_amount_micros: Option<i64>,
    #[serde(default)]
    pub bidding_strategy: BiddingStrategy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCampaignBody {
    pub results: MutateResponse,
    pub campaign_id: CampaignId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangeCampaignStatusBody {
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MutateResultsBody {
    pub results: MutateResponse,
}

#[get("/api/campaigns")]
#[tracing::instrument(skip(db, ads, identity))]
async fn get_campaigns(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    identity: Identity,
) -> Result<Json<Vec<Value>>, Error> {
    let campaigns = manager::list_campaigns(&***db, &***ads, identity.id).await?;

    Ok(Json(campaigns))
}

#[post("/api/campaigns")]
#[tracing::instrument(skip(db, ads, config, identity, body))]
async fn create_campaign(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    config: Data<Config>,
    identity: Identity,
    body: Json<CreateCampaignBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let (results, campaign_id) = manager::create_campaign(
        &***db,
        &***ads,
        &config.ads.customer_id,
        identity.id,
        body.name,
        body.budget_amount_micros,
        body.bidding_strategy,
    )
    .await?;

    Ok(HttpResponse::Created().json(CreatedCampaignBody {
        results,
        campaign_id,
    }))
}

#[patch("/api/campaigns/{campaign_id}/status")]
#[tracing::instrument(skip(db, ads, config, identity, body))]
async fn change_campaign_status(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    config: Data<Config>,
    identity: Identity,
    params: Path<CampaignId>,
    body: Json<ChangeCampaignStatusBody>,
) -> Result<Json<MutateResultsBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let results = manager::change_campaign_status(
        &***db,
        &***ads,
        &config.ads.customer_id,
        identity.id,
        campaign_id,
        body.status,
    )
    .await?;

    Ok(Json(MutateResultsBody { results }))
}
