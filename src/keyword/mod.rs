use serde::{Deserialize, Serialize};

use crate::googleads::{AdGroupCriterionStatus, KeywordMatchType};

pub mod endpoints;
pub mod manager;

pub use endpoints::*;

pub const MAXIMUM_KEYWORD_LENGTH: usize = 80;

/// One requested keyword. A missing match type defaults to broad at
/// composition time, never at validation time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSpec {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<KeywordMatchType>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdGroupCriterionResource {
    pub ad_group: String,
    pub status: AdGroupCriterionStatus,
    pub keyword: KeywordInfo,
}

#[derive(Clone, Debug, Serialize)]
pub struct KeywordInfo {
    pub text: String,
    pub match_type: KeywordMatchType,
}
