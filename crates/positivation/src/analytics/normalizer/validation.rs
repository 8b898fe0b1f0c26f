use chrono::NaiveDate;

/// Malformed campaign or client input. Fatal to the computation that received it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("campaign is missing its id")]
    MissingCampaignId,
    #[error("client at position {index} is missing its id")]
    MissingClientId { index: usize },
    #[error("client id '{0}' appears more than once")]
    DuplicateClientId(String),
    #[error("industry at position {index} has a blank name")]
    BlankIndustryName { index: usize },
    #[error("industry '{0}' is defined more than once")]
    DuplicateIndustry(String),
    #[error("industry '{industry}' has a blank product name")]
    BlankProductName { industry: String },
    #[error("product '{product}' is defined more than once in industry '{industry}'")]
    DuplicateProduct { industry: String, product: String },
    #[error("{field} must be a non-negative amount (found {value})")]
    InvalidMoney { field: String, value: String },
    #[error("unknown campaign status '{0}'")]
    UnknownStatus(String),
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("campaign ends on {end} before it starts on {start}")]
    InvertedPeriod { start: NaiveDate, end: NaiveDate },
    #[error("industry '{industry}' has an unsupported layout")]
    MalformedIndustry { industry: String },
    #[error("client '{client}' has an unsupported record for industry '{industry}'")]
    MalformedClientIndustry { client: String, industry: String },
    #[error("client '{client}' has an unsupported record for '{product}' in industry '{industry}'")]
    MalformedProduct {
        client: String,
        industry: String,
        product: String,
    },
}
