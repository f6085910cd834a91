use actix_web::web::{self, Data, JsonConfig, PathConfig, QueryConfig};
use actix_web::{App, HttpServer, ResponseError};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod ad;
pub mod adgroup;
pub mod admin;
pub mod auth;
pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod googleads;
pub mod keyword;
pub mod onboarding;
pub mod resourceid;
pub mod user;
pub mod violations;

pub use config::Config;
pub use error::Error;

use crate::auth::{GoogleTokenVerifier, HttpGoogleTokenVerifier};
use crate::database::{Database, SqliteDatabase};
use crate::googleads::{GoogleAds, HttpGoogleAds};
use crate::onboarding::{GeminiGenerator, TextGenerator};

pub async fn run(config: Config) -> Result<(), Error> {
    info!("connecting to db: {}", config.database_url);
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await?;
    let db = SqliteDatabase::initialize(pool).await?;

    let db: Data<Box<dyn Database>> = Data::new(Box::new(db));
    let ads: Data<Box<dyn GoogleAds>> =
        Data::new(Box::new(HttpGoogleAds::new(config.ads.clone())));
    let generator: Data<Box<dyn TextGenerator>> =
        Data::new(Box::new(GeminiGenerator::new(config.generation.clone())));
    let verifier: Data<Box<dyn GoogleTokenVerifier>> = Data::new(Box::new(
        HttpGoogleTokenVerifier::new(config.google_client_id.clone()),
    ));
    let bind_address = config.bind_address.clone();
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(JsonConfig::default().error_handler(|err, _req| {
                // format json errors with custom format
                Error::InvalidJson(err).into()
            }))
            .app_data(PathConfig::default().error_handler(|err, _req| {
                // format path errors with custom format
                Error::InvalidPath(err).into()
            }))
            .app_data(QueryConfig::default().error_handler(|err, _req| {
                // format query errors with custom format
                Error::InvalidQuery(err).into()
            }))
            .app_data(db.clone())
            .app_data(ads.clone())
            .app_data(generator.clone())
            .app_data(verifier.clone())
            .app_data(config.clone())
            .wrap(TracingLogger::default())
            .service(auth::endpoints::register)
            .service(auth::endpoints::login)
            .service(auth::endpoints::google)
            .service(campaign::endpoints::get_campaigns)
            .service(campaign::endpoints::create_campaign)
            .service(campaign::endpoints::change_campaign_status)
            .service(adgroup::endpoints::get_ad_groups)
            .service(adgroup::endpoints::create_ad_group)
            .service(ad::endpoints::create_ad)
            .service(keyword::endpoints::get_keywords)
            .service(keyword::endpoints::create_keywords)
            .service(admin::endpoints::get_users)
            .service(admin::endpoints::delete_user)
            .service(admin::endpoints::get_all_campaigns)
            .service(admin::endpoints::get_user_campaigns)
            .service(admin::endpoints::grant_campaign)
            .service(admin::endpoints::revoke_campaign)
            .service(onboarding::endpoints::generate)
            .default_service(web::to(|| async { Error::PathDoesNotExist.error_response() }))
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
