use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Identity;
use crate::campaign::CampaignId;
use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::googleads::{GoogleAds, MutateResponse};

use super::{manager, DEFAULT_CPC_BID_MICROS};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdGroupBody {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_cpc_bid_micros")]
    pub cpc_bid_micros: i64,
}

fn default_cpc_bid_micros() -> i64 {
    DEFAULT_CPC_BID_MICROS
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAdGroupBody {
    pub results: MutateResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<String>,
}

#[get("/api/campaigns/{campaign_id}/adgroups")]
#[tracing::instrument(skip(db, ads, identity))]
async fn get_ad_groups(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    identity: Identity,
    params: Path<CampaignId>,
) -> Result<Json<Vec<Value>>, Error> {
    let campaign_id = params.into_inner();

    let ad_groups = manager::list_ad_groups(&***db, &***ads, identity.id, campaign_id).await?;

    Ok(Json(ad_groups))
}

#[post("/api/campaigns/{campaign_id}/adgroups")]
#[tracing::instrument(skip(db, ads, config, identity, body))]
async fn create_ad_group(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    config: Data<Config>,
    identity: Identity,
    params: Path<CampaignId>,
    body: Json<CreateAdGroupBody>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let (results, ad_group_id) = manager::create_ad_group(
        &***db,
        &***ads,
        &config.ads.customer_id,
        identity.id,
        campaign_id,
        body.name,
        body.cpc_bid_micros,
    )
    .await?;

    Ok(HttpResponse::Created().json(CreatedAdGroupBody {
        results,
        ad_group_id,
    }))
}
