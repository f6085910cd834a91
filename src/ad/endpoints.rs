use actix_web::web::{Data, Json, Path};
use actix_web::{post, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::adgroup::AdGroupId;
use crate::auth::Identity;
use crate::campaign::MutateResultsBody;
use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::googleads::GoogleAds;

use super::manager;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdBody {
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub final_url: String,
}

#[post("/api/adgroups/{ad_group_id}/ads")]
#[tracing::instrument(skip(db, ads, config, identity, body))]
async fn create_ad(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    config: Data<Config>,
    identity: Identity,
    params: Path<AdGroupId>,
    body: Json<CreateAdBody>,
) -> Result<HttpResponse, Error> {
    let ad_group_id = params.into_inner();
    let body = body.into_inner();

    let results = manager::create_ad(
        &***db,
        &***ads,
        &config.ads.customer_id,
        identity.id,
        ad_group_id,
        body.headlines,
        body.descriptions,
        body.final_url,
    )
    .await?;

    Ok(HttpResponse::Created().json(MutateResultsBody { results }))
}
