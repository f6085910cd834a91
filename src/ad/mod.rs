use serde::Serialize;

use crate::googleads::{AdGroupAdStatus, ServedAssetFieldType};

pub mod endpoints;
pub mod manager;

pub use endpoints::*;

pub const MINIMUM_HEADLINES: usize = 3;
pub const MAXIMUM_HEADLINE_LENGTH: usize = 30;
pub const MINIMUM_DESCRIPTIONS: usize = 2;
pub const MAXIMUM_DESCRIPTION_LENGTH: usize = 90;

/// A fixed-slot responsive search creative attached to an ad group.
#[derive(Clone, Debug, Serialize)]
pub struct AdGroupAdResource {
    pub ad_group: String,
    pub status: AdGroupAdStatus,
    pub ad: AdResource,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdResource {
    pub responsive_search_ad: ResponsiveSearchAd,
    pub final_urls: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResponsiveSearchAd {
    pub headlines: Vec<AdTextAsset>,
    pub descriptions: Vec<AdTextAsset>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdTextAsset {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_field: Option<ServedAssetFieldType>,
}
