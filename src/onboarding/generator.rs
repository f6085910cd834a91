use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::config::GenerationConfig;
use crate::error::Error;

/// Black-box text-generation collaborator. Returns loosely-structured text
/// the caller coerces into a fixed schema.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

pub struct GeminiGenerator {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl GeminiGenerator {
    pub fn new(config: GenerationConfig) -> GeminiGenerator {
        GeminiGenerator {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    #[tracing::instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(Error::GenerationNotConfigured)?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", api_key)])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": 0.7,
                    "maxOutputTokens": 8192,
                    "responseMimeType": "application/json",
                },
            }))
            .send()
            .await
            .map_err(|err| {
                error!("generation call failed: {}", err);
                Error::GenerationFailed
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "generation service rejected the request");
            return Err(Error::GenerationFailed);
        }

        let payload: GenerateResponse = response.json().await.map_err(|err| {
            error!("generation payload was unreadable: {}", err);
            Error::GenerationFailed
        })?;

        // thinking parts come back without text; take the first text part
        payload
            .candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.content.parts)
            .unwrap_or_default()
            .into_iter()
            .find_map(|part| part.text)
            .ok_or_else(|| {
                error!("generation response carried no text part");
                Error::GenerationFailed
            })
    }
}
