use std::env;

use crate::error::Error;
use crate::googleads::CustomerId;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_ADS_ENDPOINT: &str = "https://googleads.googleapis.com/v17";
const DEFAULT_GENERATION_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Immutable process configuration, built once at startup and passed to
/// every component. Business logic never reads the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub google_client_id: Option<String>,
    pub generation: GenerationConfig,
    pub ads: AdsConfig,
}

#[derive(Clone, Debug)]
pub struct AdsConfig {
    pub endpoint: String,
    pub customer_id: CustomerId,
    pub developer_token: String,
    pub access_token: String,
}

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        let customer_id_raw = required("ADS_CUSTOMER_ID")?;
        let customer_id = CustomerId::new(&customer_id_raw).map_err(|_| {
            Error::InvalidConfiguration {
                key: "ADS_CUSTOMER_ID".to_string(),
            }
        })?;

        Ok(Config {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            generation: GenerationConfig {
                endpoint: env::var("GENERATION_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_GENERATION_ENDPOINT.to_string()),
                api_key: env::var("GEMINI_API_KEY").ok(),
            },
            ads: AdsConfig {
                endpoint: env::var("ADS_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_ADS_ENDPOINT.to_string()),
                customer_id,
                developer_token: required("ADS_DEVELOPER_TOKEN")?,
                access_token: required("ADS_ACCESS_TOKEN")?,
            },
        })
    }
}

fn required(key: &str) -> Result<String, Error> {
    env::var(key).map_err(|_| Error::MissingConfiguration {
        key: key.to_string(),
    })
}
