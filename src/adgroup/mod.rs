use serde::Serialize;

use crate::googleads::{AdGroupStatus, AdGroupType};
use crate::resourceid::{ResourceId, ResourceKind};

pub mod endpoints;
pub mod manager;

pub use endpoints::*;

pub type AdGroupId = ResourceId<AdGroup>;

/// The remote ad group entity. Its parent campaign is resolved by a live
/// platform lookup, never stored locally.
pub struct AdGroup;

impl ResourceKind for AdGroup {
    const COLLECTION: &'static str = "adGroups";
}

pub const DEFAULT_CPC_BID_MICROS: i64 = 1_000_000;

#[derive(Clone, Debug, Serialize)]
pub struct AdGroupResource {
    pub name: String,
    pub campaign: String,
    pub status: AdGroupStatus,
    #[serde(rename = "type")]
    pub kind: AdGroupType,
    pub cpc_bid_micros: i64,
}
