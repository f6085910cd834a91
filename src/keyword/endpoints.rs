use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adgroup::AdGroupId;
use crate::auth::Identity;
use crate::campaign::MutateResultsBody;
use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::googleads::GoogleAds;

use super::{manager, KeywordSpec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateKeywordsBody {
    #[serde(default)]
    pub keywords: Vec<KeywordSpec>,
}

#[get("/api/adgroups/{ad_group_id}/keywords")]
#[tracing::instrument(skip(db, ads, identity))]
async fn get_keywords(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    identity: Identity,
    params: Path<AdGroupId>,
) -> Result<Json<Vec<Value>>, Error> {
    let ad_group_id = params.into_inner();

    let keywords = manager::list_keywords(&***db, &***ads, identity.id, ad_group_id).await?;

    Ok(Json(keywords))
}

#[post("/api/adgroups/{ad_group_id}/keywords")]
#[tracing::instrument(skip(db, ads, config, identity, body))]
async fn create_keywords(
    db: Data<Box<dyn Database>>,
    ads: Data<Box<dyn GoogleAds>>,
    config: Data<Config>,
    identity: Identity,
    params: Path<AdGroupId>,
    body: Json<CreateKeywordsBody>,
) -> Result<HttpResponse, Error> {
    let ad_group_id = params.into_inner();
    let body = body.into_inner();

    let results = manager::create_keywords(
        &***db,
        &***ads,
        &config.ads.customer_id,
        identity.id,
        ad_group_id,
        body.keywords,
    )
    .await?;

    Ok(HttpResponse::Created().json(MutateResultsBody { results }))
}
