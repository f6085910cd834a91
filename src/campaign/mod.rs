use serde::{Deserialize, Serialize};

use crate::googleads::{
    AdvertisingChannelType, BudgetDeliveryMethod, CampaignStatus, EuPoliticalAdvertisingStatus,
};
use crate::resourceid::{ResourceId, ResourceKind};

pub mod db;
pub mod endpoints;
pub mod manager;

pub use db::OwnershipStore;
pub use endpoints::*;

pub type CampaignId = ResourceId<Campaign>;

/// The remote campaign entity. Campaign content is never stored locally;
/// only the ownership mapping is.
pub struct Campaign;

impl ResourceKind for Campaign {
    const COLLECTION: &'static str = "campaigns";
}

/// Fixed bid ceiling attached to the maximize-clicks strategy.
pub const DEFAULT_CPC_BID_CEILING_MICROS: i64 = 10_000_000;
/// Fixed target attached to the target-CPA strategy.
pub const DEFAULT_TARGET_CPA_MICROS: i64 = 1_000_000;

/// The strategy a caller may ask for. Anything else is rejected at
/// deserialization, never silently defaulted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiddingStrategy {
    #[default]
    MaximizeClicks,
    ManualCpc,
    TargetCpa,
}

/// Exactly one of these is ever attached to a created campaign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bidding {
    ManualCpc { enhanced_cpc_enabled: bool },
    TargetCpa { target_cpa_micros: i64 },
    TargetSpend { cpc_bid_ceiling_micros: i64 },
}

impl From<BiddingStrategy> for Bidding {
    fn from(strategy: BiddingStrategy) -> Bidding {
        match strategy {
            BiddingStrategy::ManualCpc => Bidding::ManualCpc {
                enhanced_cpc_enabled: false,
            },
            BiddingStrategy::TargetCpa => Bidding::TargetCpa {
                target_cpa_micros: DEFAULT_TARGET_CPA_MICROS,
            },
            // "Maximize Clicks" on the platform is a target-spend block
            BiddingStrategy::MaximizeClicks => Bidding::TargetSpend {
                cpc_bid_ceiling_micros: DEFAULT_CPC_BID_CEILING_MICROS,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CampaignBudgetResource {
    pub resource_name: String,
    pub name: String,
    pub amount_micros: i64,
    pub delivery_method: BudgetDeliveryMethod,
    pub explicitly_shared: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct CampaignResource {
    pub name: String,
    pub campaign_budget: String,
    pub advertising_channel_type: AdvertisingChannelType,
    pub status: CampaignStatus,
    pub network_settings: NetworkSettings,
    pub contains_eu_political_advertising: EuPoliticalAdvertisingStatus,
    #[serde(flatten)]
    pub bidding: Bidding,
}

#[derive(Clone, Debug, Serialize)]
pub struct NetworkSettings {
    pub target_google_search: bool,
    pub target_search_network: bool,
    pub target_content_network: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct CampaignStatusUpdate {
    pub resource_name: String,
    pub status: CampaignStatus,
}
