use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::resourceid::ParseResourceIdError;

pub mod client;
pub mod mutate;
pub mod response;

pub use client::{GoogleAds, HttpGoogleAds};
pub use mutate::{Entity, MutateBatch, MutateOperation, OperationKind};
pub use response::{extract_resource_id, MutateOperationResponse, MutateResponse, MutateResult};

/// The account every campaign in this deployment lives under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerId(String);

impl CustomerId {
    /// Accepts the dashed form customer ids are usually quoted in.
    pub fn new(raw: &str) -> Result<CustomerId, ParseResourceIdError> {
        let digits: String = raw.chars().filter(|c| *c != '-').collect();
        if digits.is_empty() {
            return Err(ParseResourceIdError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseResourceIdError::NotNumeric);
        }

        Ok(CustomerId(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Unspecified,
    Unknown,
    Enabled,
    Paused,
    Removed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertisingChannelType {
    Search,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetDeliveryMethod {
    Standard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EuPoliticalAdvertisingStatus {
    DoesNotContainEuPoliticalAdvertising,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupStatus {
    Enabled,
    Paused,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupType {
    SearchStandard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupAdStatus {
    Enabled,
    Paused,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupCriterionStatus {
    Enabled,
    Paused,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordMatchType {
    Exact,
    Phrase,
    Broad,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ServedAssetFieldType {
    #[serde(rename = "HEADLINE_1")]
    Headline1,
}
