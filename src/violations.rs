use serde::{Deserialize, Serialize};

use crate::googleads::CampaignStatus;

/// A specific request rule that was not met. Validators collect these and
/// reject the whole request if any are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Violation {
    CredentialsMissing,
    PasswordTooShort {
        minimum: usize,
    },
    GoogleCredentialMissing,
    CampaignNameMissing,
    BudgetAmountMissing,
    BudgetAmountNotPositive {
        amount_micros: i64,
    },
    StatusMissing,
    StatusNotAllowed {
        provided: CampaignStatus,
    },
    AdGroupNameMissing,
    HeadlinesTooFew {
        minimum: usize,
        provided: usize,
    },
    HeadlineTooLong {
        index: usize,
        maximum: usize,
        length: usize,
    },
    DescriptionsTooFew {
        minimum: usize,
        provided: usize,
    },
    DescriptionTooLong {
        index: usize,
        maximum: usize,
        length: usize,
    },
    FinalUrlMissing,
    FinalUrlInvalid {
        url: String,
    },
    KeywordsMissing,
    KeywordTextBlank {
        index: usize,
    },
    KeywordTextTooLong {
        index: usize,
        maximum: usize,
        length: usize,
    },
    CampaignIdMissing,
    WebsiteUrlMissing,
    WebsiteUrlInvalid {
        url: String,
    },
}
