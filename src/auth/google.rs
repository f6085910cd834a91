use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::Error;

const TOKENINFO_ENDPOINT: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Narrow collaborator verifying a Google identity token and returning the
/// asserted email.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<String, Error>;
}

pub struct HttpGoogleTokenVerifier {
    http: reqwest::Client,
    client_id: Option<String>,
}

impl HttpGoogleTokenVerifier {
    pub fn new(client_id: Option<String>) -> HttpGoogleTokenVerifier {
        HttpGoogleTokenVerifier {
            http: reqwest::Client::new(),
            client_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
}

#[async_trait]
impl GoogleTokenVerifier for HttpGoogleTokenVerifier {
    #[tracing::instrument(skip(self, credential))]
    async fn verify(&self, credential: &str) -> Result<String, Error> {
        let client_id = match &self.client_id {
            Some(client_id) => client_id,
            None => {
                warn!("google sign-in is not configured");
                return Err(Error::InvalidGoogleToken);
            }
        };

        let response = self
            .http
            .get(TOKENINFO_ENDPOINT)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|err| {
                warn!("identity token check failed: {}", err);
                Error::InvalidGoogleToken
            })?;

        if !response.status().is_success() {
            return Err(Error::InvalidGoogleToken);
        }

        let info: TokenInfo = response.json().await.map_err(|err| {
            warn!("identity token payload was unreadable: {}", err);
            Error::InvalidGoogleToken
        })?;

        if info.aud != *client_id {
            return Err(Error::InvalidGoogleToken);
        }

        info.email.ok_or(Error::InvalidGoogleToken)
    }
}
