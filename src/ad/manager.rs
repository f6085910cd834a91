use crate::adgroup::{self, AdGroupId};
use crate::database::Database;
use crate::error::Error;
use crate::googleads::{
    AdGroupAdStatus, CustomerId, Entity, GoogleAds, MutateBatch, MutateResponse,
    ServedAssetFieldType,
};
use crate::user::UserId;
use crate::violations::Violation;

use super::{
    AdGroupAdResource, AdResource, AdTextAsset, ResponsiveSearchAd, MAXIMUM_DESCRIPTION_LENGTH,
    MAXIMUM_HEADLINE_LENGTH, MINIMUM_DESCRIPTIONS, MINIMUM_HEADLINES,
};

/// Violating any single element fails the whole request; there is no
/// partial creation.
pub fn validate_create_ad(
    headlines: &[String],
    descriptions: &[String],
    final_url: &str,
) -> Result<(), Vec<Violation>> {
    let mut violations = vec![];

    if headlines.len() < MINIMUM_HEADLINES {
        violations.push(Violation::HeadlinesTooFew {
            minimum: MINIMUM_HEADLINES,
            provided: headlines.len(),
        });
    }
    for (index, headline) in headlines.iter().enumerate() {
        let length = headline.chars().count();
        if length > MAXIMUM_HEADLINE_LENGTH {
            violations.push(Violation::HeadlineTooLong {
                index,
                maximum: MAXIMUM_HEADLINE_LENGTH,
                length,
            });
        }
    }

    if descriptions.len() < MINIMUM_DESCRIPTIONS {
        violations.push(Violation::DescriptionsTooFew {
            minimum: MINIMUM_DESCRIPTIONS,
            provided: descriptions.len(),
        });
    }
    for (index, description) in descriptions.iter().enumerate() {
        let length = description.chars().count();
        if length > MAXIMUM_DESCRIPTION_LENGTH {
            violations.push(Violation::DescriptionTooLong {
                index,
                maximum: MAXIMUM_DESCRIPTION_LENGTH,
                length,
            });
        }
    }

    if final_url.is_empty() {
        violations.push(Violation::FinalUrlMissing);
    } else if reqwest::Url::parse(final_url).is_err() {
        violations.push(Violation::FinalUrlInvalid {
            url: final_url.to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Creates a responsive search ad under an owned ad group. Only the first
/// headline is pinned to the primary slot, and the ad starts paused; new
/// creative is never auto-enabled.
#[tracing::instrument(skip(db, ads, headlines, descriptions))]
pub async fn create_ad(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    customer_id: &CustomerId,
    user_id: UserId,
    ad_group_id: AdGroupId,
    headlines: Vec<String>,
    descriptions: Vec<String>,
    final_url: String,
) -> Result<MutateResponse, Error> {
    if !adgroup::manager::verify_ad_group_ownership(db, ads, user_id, ad_group_id).await {
        return Err(Error::AccessDenied);
    }

    validate_create_ad(&headlines, &descriptions, &final_url)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let mut batch = MutateBatch::new(customer_id.clone());
    batch.create(
        Entity::AdGroupAd,
        &AdGroupAdResource {
            ad_group: ad_group_id.resource_name(customer_id),
            status: AdGroupAdStatus::Paused,
            ad: AdResource {
                responsive_search_ad: ResponsiveSearchAd {
                    headlines: headlines
                        .into_iter()
                        .enumerate()
                        .map(|(index, text)| AdTextAsset {
                            text,
                            pinned_field: (index == 0).then_some(ServedAssetFieldType::Headline1),
                        })
                        .collect(),
                    descriptions: descriptions
                        .into_iter()
                        .map(|text| AdTextAsset {
                            text,
                            pinned_field: None,
                        })
                        .collect(),
                },
                final_urls: vec![final_url],
            },
        },
    )?;

    ads.mutate(batch.into_operations()).await
}
