use actix_web::post;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::error::Error;

use super::{manager, GeneratedCampaign, TextGenerator};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub website_url: String,
}

#[post("/api/onboarding/generate")]
#[tracing::instrument(skip(generator, _identity, body))]
async fn generate(
    generator: Data<Box<dyn TextGenerator>>,
    _identity: Identity,
    body: Json<GenerateBody>,
) -> Result<Json<GeneratedCampaign>, Error> {
    let body = body.into_inner();

    let generated =
        manager::generate_campaign_structure(&***generator, body.website_url).await?;

    Ok(Json(generated))
}
