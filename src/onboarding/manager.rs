use tracing::error;

use crate::error::Error;
use crate::violations::Violation;

use super::{GeneratedCampaign, TextGenerator};

pub fn validate_generate(website_url: &str) -> Result<(), Vec<Violation>> {
    if website_url.is_empty() {
        return Err(vec![Violation::WebsiteUrlMissing]);
    }
    if reqwest::Url::parse(website_url).is_err() {
        return Err(vec![Violation::WebsiteUrlInvalid {
            url: website_url.to_string(),
        }]);
    }

    Ok(())
}

/// Asks the generator for a full campaign structure and coerces its
/// loosely-structured output into the fixed schema.
#[tracing::instrument(skip(generator))]
pub async fn generate_campaign_structure(
    generator: &dyn TextGenerator,
    website_url: String,
) -> Result<GeneratedCampaign, Error> {
    validate_generate(&website_url)
        .map_err(|violations| Error::RequestViolatesRules { violations })?;

    let text = generator.generate(&prompt(&website_url)).await?;

    coerce(&text)
}

fn prompt(website_url: &str) -> String {
    format!(
        "You are a Google Ads expert. Based on the website address below, \
generate a complete Google Ads Search campaign structure.\n\
\n\
Website: {website_url}\n\
\n\
Analyze the site yourself, determine the industry and business category, \
and generate the campaign from that.\n\
\n\
Generate JSON:\n\
{{\n\
  \"campaignName\": \"short campaign name (max 50 characters)\",\n\
  \"category\": \"detected business category\",\n\
  \"adGroup\": {{\n\
    \"name\": \"ad group name (max 50 characters)\",\n\
    \"headlines\": [\"headline1\", \"headline2\"],\n\
    \"descriptions\": [\"description1\", \"description2\"],\n\
    \"keywords\": [\n\
      {{\"text\": \"keyword\", \"matchType\": \"BROAD\"}}\n\
    ]\n\
  }}\n\
}}\n\
\n\
Rules:\n\
- campaignName: concise campaign name, max 50 characters\n\
- category: short name of the detected category (e.g. \"E-commerce\", \"Local services\", \"IT/SaaS\")\n\
- headlines: 5 to 10 texts, each max 30 characters\n\
- descriptions: 2 to 4 texts, each MUST be max 90 characters (NEVER exceed 90 characters!)\n\
- keywords: 5 to 10 keywords, matchType: BROAD, PHRASE or EXACT\n\
- Headline 1 should carry the company or site name\n\
- Headlines and descriptions should carry calls to action (CTA)\n\
- Keywords should be relevant to the detected industry"
    )
}

fn coerce(text: &str) -> Result<GeneratedCampaign, Error> {
    let stripped = text
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    serde_json::from_str(&stripped).map_err(|err| {
        error!("generator output did not match the campaign schema: {}", err);
        Error::GenerationFailed
    })
}
