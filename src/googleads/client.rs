use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::config::AdsConfig;
use crate::error::Error;

use super::{MutateOperation, MutateResponse};

/// Narrow interface over the advertising platform: read-only structured
/// queries and batch mutations. No retry logic; a single failure is
/// surfaced immediately.
#[async_trait]
pub trait GoogleAds: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Value>, Error>;

    async fn mutate(&self, operations: Vec<MutateOperation>) -> Result<MutateResponse, Error>;
}

pub struct HttpGoogleAds {
    http: reqwest::Client,
    config: AdsConfig,
}

impl HttpGoogleAds {
    pub fn new(config: AdsConfig) -> HttpGoogleAds {
        HttpGoogleAds {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, method: &str) -> String {
        format!(
            "{}/customers/{}/googleAds:{}",
            self.config.endpoint, self.config.customer_id, method
        )
    }

    async fn post(&self, method: &str, body: Value) -> Result<Value, Error> {
        let response = self
            .http
            .post(self.url(method))
            .header("developer-token", &self.config.developer_token)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!("advertising platform call failed: {}", err);
                Error::PlatformRejected {
                    message: err.to_string(),
                }
            })?;

        let status = response.status();
        let payload: Value = response.json().await.map_err(|err| {
            error!("advertising platform returned an unreadable payload: {}", err);
            Error::PlatformRejected {
                message: err.to_string(),
            }
        })?;

        if !status.is_success() {
            error!(%status, payload = %payload, "advertising platform rejected the request");
            return Err(Error::PlatformRejected {
                message: failure_message(&payload),
            });
        }

        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[async_trait]
impl GoogleAds for HttpGoogleAds {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Value>, Error> {
        let payload = self.post("search", json!({ "query": query })).await?;
        let response: SearchResponse = serde_json::from_value(payload)?;

        Ok(response.results)
    }

    #[tracing::instrument(skip(self, operations))]
    async fn mutate(&self, operations: Vec<MutateOperation>) -> Result<MutateResponse, Error> {
        let operations: Vec<Value> = operations.iter().map(to_wire).collect();
        let payload = self
            .post("mutate", json!({ "mutateOperations": operations }))
            .await?;
        let response: MutateResponse = serde_json::from_value(payload)?;

        Ok(response)
    }
}

fn to_wire(operation: &MutateOperation) -> Value {
    let mut inner = serde_json::Map::new();
    inner.insert(
        operation.kind.wire_key().to_string(),
        operation.resource.clone(),
    );
    if let Some(mask) = &operation.update_mask {
        inner.insert("updateMask".to_string(), Value::String(mask.clone()));
    }

    let mut wrapper = serde_json::Map::new();
    wrapper.insert(
        operation.entity.operation_key().to_string(),
        Value::Object(inner),
    );

    Value::Object(wrapper)
}

/// The user-facing message for an upstream failure: the first structured
/// issue's message if present, otherwise the top-level message, otherwise a
/// fixed fallback.
pub(crate) fn failure_message(payload: &Value) -> String {
    payload
        .pointer("/error/details/0/errors/0/message")
        .or_else(|| payload.pointer("/error/message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or("Google Ads API error")
        .to_string()
}
