//! Keyword responders
//!
//! Two separate tables answer without any network call. [`LOCAL_RESPONSES`]
//! handles queries classified as local; [`REMOTE_FALLBACK_RESPONSES`] answers
//! remote queries once every endpoint has failed. They overlap in topics but
//! not in wording.

/// Returned for every query when no credential is configured
pub const NOT_CONFIGURED: &str = "AI key not configured.";

/// Keywords for each topic (matched against the lower-cased query)
mod keywords {
    pub const CROP: &[&str] = &["crop"];
    pub const DISEASE: &[&str] = &["disease", "pest"];
    pub const MARKET: &[&str] = &["price", "market"];
    pub const WEATHER: &[&str] = &["weather", "rain"];
    pub const PROFIT: &[&str] = &["profit", "cost"];
}

/// Ordered keyword-to-answer rules with a default
#[derive(Debug)]
pub struct KeywordTable {
    rules: &'static [(&'static [&'static str], &'static str)],
    default: &'static str,
}

impl KeywordTable {
    /// Answer for `query`: the first rule with a matching keyword, else the default
    pub fn respond(&self, query: &str) -> &'static str {
        let query = query.to_lowercase();
        self.rules
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| query.contains(kw)))
            .map_or(self.default, |(_, answer)| *answer)
    }

    /// Answer given when nothing matches
    pub fn default_answer(&self) -> &'static str {
        self.default
    }
}

/// Answers for queries that never go remote
pub static LOCAL_RESPONSES: KeywordTable = KeywordTable {
    rules: &[
        (
            keywords::CROP,
            "For optimal crop growth, ensure proper soil nutrients (NPK balance), adequate water supply, and good pest management practices.",
        ),
        (
            keywords::MARKET,
            "Check the Market Prices tab for the latest crop prices and trends in your area.",
        ),
        (
            keywords::DISEASE,
            "Use the Disease Detection feature to upload an image of the affected plant, and I will help you identify and treat it.",
        ),
        (
            keywords::PROFIT,
            "Navigate to the Profit & Loss Analysis tab to calculate your farming costs and expected returns.",
        ),
    ],
    default: "I understand your question about farming. Could you provide more specific details? I can help with crop selection, disease detection, market prices, and profitability analysis.",
};

/// Answers for remote queries after every endpoint failed
pub static REMOTE_FALLBACK_RESPONSES: KeywordTable = KeywordTable {
    rules: &[
        (
            keywords::CROP,
            "For crops, maintain NPK balance, regular irrigation, and pest monitoring.",
        ),
        (
            keywords::DISEASE,
            "Try identifying the disease: upload clear images in Disease Detection; meanwhile remove affected leaves and apply recommended fungicide.",
        ),
        (
            keywords::MARKET,
            "Open Market Prices tab for latest rates; prices vary by region and grade.",
        ),
        (
            keywords::WEATHER,
            "Check the Weather tab for 7-day forecast and prepare irrigation accordingly.",
        ),
    ],
    default: "I can help with crop selection, disease detection, market prices and profitability; please provide more details.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_table() {
        assert!(LOCAL_RESPONSES.respond("Best CROP for clay soil").starts_with("For optimal crop growth"));
        assert!(LOCAL_RESPONSES.respond("market trends").starts_with("Check the Market Prices tab"));
        assert!(LOCAL_RESPONSES.respond("what about pest control").starts_with("Use the Disease Detection feature"));
        assert!(LOCAL_RESPONSES.respond("input cost").starts_with("Navigate to the Profit & Loss"));
        assert_eq!(LOCAL_RESPONSES.respond("hello"), LOCAL_RESPONSES.default_answer());
    }

    #[test]
    fn test_local_table_priority() {
        // crop is checked before pest
        assert!(LOCAL_RESPONSES.respond("crop pest").starts_with("For optimal crop growth"));
        // price is checked before disease
        assert!(LOCAL_RESPONSES.respond("disease price").starts_with("Check the Market Prices tab"));
    }

    #[test]
    fn test_fallback_table() {
        assert!(REMOTE_FALLBACK_RESPONSES.respond("rice pest control").starts_with("Try identifying the disease"));
        assert!(REMOTE_FALLBACK_RESPONSES.respond("wheat market price").starts_with("Open Market Prices tab"));
        assert!(REMOTE_FALLBACK_RESPONSES.respond("Will it RAIN on my paddy").starts_with("Check the Weather tab"));
        assert!(REMOTE_FALLBACK_RESPONSES.respond("crop rotation").starts_with("For crops, maintain"));
        assert_eq!(
            REMOTE_FALLBACK_RESPONSES.respond("maize"),
            REMOTE_FALLBACK_RESPONSES.default_answer()
        );
    }

    #[test]
    fn test_tables_are_distinct() {
        assert_ne!(LOCAL_RESPONSES.respond("crop"), REMOTE_FALLBACK_RESPONSES.respond("crop"));
        assert_ne!(LOCAL_RESPONSES.default_answer(), REMOTE_FALLBACK_RESPONSES.default_answer());
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(LOCAL_RESPONSES.respond(""), LOCAL_RESPONSES.default_answer());
        assert_eq!(REMOTE_FALLBACK_RESPONSES.respond(""), REMOTE_FALLBACK_RESPONSES.default_answer());
    }
}
