use serde::{Deserialize, Serialize};

use crate::googleads::KeywordMatchType;

pub mod endpoints;
pub mod generator;
pub mod manager;

pub use endpoints::*;
pub use generator::{GeminiGenerator, TextGenerator};

/// The fixed schema loosely-structured generator output is coerced into.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCampaign {
    pub campaign_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub ad_group: GeneratedAdGroup,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAdGroup {
    pub name: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<GeneratedKeyword>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeyword {
    pub text: String,
    #[serde(default)]
    pub match_type: Option<KeywordMatchType>,
}
