use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Admin;
use crate::database::Database;
use crate::error::Error;
use crate::googleads::GoogleAds;
use crate::user::{AdminUserRow, UserId};

use super::manager;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCampaignBody {
    #[serde(default)]
    pub campaign_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OkBody {
    pub ok: bool,
}

#[get("/api/admin/users")]
#[tracing::instrument(skip(db, _admin))]
async fn get_users(
    db: Data<Box<dyn Database>>,
    _admin: Admin,
) -> Result<Json<Vec<AdminUserRow>>, Error> {
    let users = manager::list_users(&***db).await?;

    Ok(Json(users))
}

#[delete("/api/admin/users/{user_id}")]
#[tracing::instrument(skip(db, admin))]
async fn delete_user(
    db: Data<Box<dyn Database>>,
    admin: Admin,
    params: Path<UserId>,
) -> Result<Json<OkBody>, Error> {
    let user_id = params.into_inner();

    manager::delete_user(&***db, admin.0.id, user_id).await?;

    Ok(Json(OkBody { ok: true }))
}

#[get("/api/admin/campaigns")]
#[tracing::instrument(skip(ads, _admin))]
async fn get_all_campaigns(
    ads: Data<Box<dyn GoogleAds>>,
    _admin: Admin,
) -> Result<Json<Vec<Value>>, Error> {
    let campaigns = manager::list_all_campaigns(&***ads).await?;

    Ok(Json(campaigns))
}

#[get("/api/admin/users/{user_id}/campaigns")]
#[tracing::instrument(skip(db, _admin))]
async fn get_user_campaigns(
    db: Data<Box<dyn Database>>,
    _admin: Admin,
    params: Path<UserId>,
) -> Result<Json<Vec<String>>, Error> {
    let user_id = params.into_inner();

    let campaign_ids = manager::list_user_campaigns(&***db, user_id).await?;

    Ok(Json(campaign_ids))
}

#[post("/api/admin/users/{user_id}/campaigns")]
#[tracing::instrument(skip(db, _admin, body))]
async fn grant_campaign(
    db: Data<Box<dyn Database>>,
    _admin: Admin,
    params: Path<UserId>,
    body: Json<GrantCampaignBody>,
) -> Result<HttpResponse, Error> {
    let user_id = params.into_inner();
    let body = body.into_inner();

    manager::grant_campaign(&***db, user_id, &body.campaign_id).await?;

    Ok(HttpResponse::Created().json(OkBody { ok: true }))
}

#[delete("/api/admin/users/{user_id}/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db, _admin))]
async fn revoke_campaign(
    db: Data<Box<dyn Database>>,
    _admin: Admin,
    params: Path<(UserId, String)>,
) -> Result<Json<OkBody>, Error> {
    let (user_id, campaign_id) = params.into_inner();

    manager::revoke_campaign(&***db, user_id, &campaign_id).await?;

    Ok(Json(OkBody { ok: true }))
}
