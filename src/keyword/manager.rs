use serde_json::Value;

use crate::adgroup::{self, AdGroupId};
use crate::database::Database;
use crate::error::Error;
use crate::googleads::{
    AdGroupCriterionStatus, CustomerId, Entity, GoogleAds, KeywordMatchType, MutateBatch,
    MutateResponse,
};
use crate::user::UserId;
use crate::violations::Violation;

use super::{AdGroupCriterionResource, KeywordInfo, KeywordSpec, MAXIMUM_KEYWORD_LENGTH};

pub fn validate_create_keywords(keywords: &[KeywordSpec]) -> Result<(), Vec<Violation>> {
    let mut violations = vec![];

    if keywords.is_empty() {
        violations.push(Violation::KeywordsMissing);
    }
    for (index, keyword) in keywords.iter().enumerate() {
        if keyword.text.trim().is_empty() {
            violations.push(Violation::KeywordTextBlank { index });
            continue;
        }
        let length = keyword.text.chars().count();
        if length > MAXIMUM_KEYWORD_LENGTH {
            violations.push(Violation::KeywordTextTooLong {
                index,
                maximum: MAXIMUM_KEYWORD_LENGTH,
                length,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[tracing::instrument(skip(db, ads))]
pub async fn list_keywords(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    user_id: UserId,
    ad_group_id: AdGroupId,
) -> Result<Vec<Value>, Error> {
    if !adgroup::manager::verify_ad_group_ownership(db, ads, user_id, ad_group_id).await {
        return Err(Error::AccessDenied);
    }

    let query = format!(
        "SELECT \
           ad_group_criterion.criterion_id, \
           ad_group_criterion.keyword.text, \
           ad_group_criterion.keyword.match_type, \
           ad_group_criterion.status \
         FROM ad_group_criterion \
         WHERE ad_group.id = {} \
           AND ad_group_criterion.type = 'KEYWORD' \
         ORDER BY ad_group_criterion.keyword.text",
        ad_group_id
    );

    ads.search(&query).await
}

/// Fans one criterion operation out per keyword, all targeting the same ad
/// group, submitted as a single batch.
#[tracing::instrument(skip(db, ads, keywords))]
pub async fn create_keywords(
    db: &dyn Database,
    ads: &dyn GoogleAds,
    customer_id: &CustomerId,
    user_id: UserId,
    ad_group_id: AdGroupId,
    keywords: Vec<KeywordSpec>,
) -> Result<MutateResponse, Error> {
    if !adgroup::manager::verify_ad_group_ownership(db, ads, user_id, ad_group_id).await {
        return Err(Error::AccessDenied);
    }

    validate_create_keywords(&keywords)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let ad_group = ad_group_id.resource_name(customer_id);
    let mut batch = MutateBatch::new(customer_id.clone());
    for keyword in keywords {
        batch.create(
            Entity::AdGroupCriterion,
            &AdGroupCriterionResource {
                ad_group: ad_group.clone(),
                status: AdGroupCriterionStatus::Enabled,
                keyword: KeywordInfo {
                    text: keyword.text,
                    match_type: keyword.match_type.unwrap_or(KeywordMatchType::Broad),
                },
            },
        )?;
    }

    ads.mutate(batch.into_operations()).await
}
