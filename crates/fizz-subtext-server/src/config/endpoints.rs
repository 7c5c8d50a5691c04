//! Upstream endpoint constants and URL construction.

/// Scheme used for upstream calls unless overridden.
pub const DEFAULT_SCHEME: &str = "https";

/// Host serving every upstream endpoint unless overridden.
pub const DEFAULT_HOST: &str = "api.example.com";

/// Name embedded in every submitted result envelope unless overridden.
pub const DEFAULT_CANDIDATE: &str = "fizz-subtext";

pub const RANGE_INFO_PATH: &str = "/fizzbuzz/rangeInfo";
pub const DIVISOR_INFO_PATH: &str = "/fizzbuzz/divisorInfo";
pub const TEXT_TO_SEARCH_PATH: &str = "/subtext/textToSearch";
pub const SUBTEXTS_PATH: &str = "/subtext/subTexts";
pub const SUBMIT_RESULTS_PATH: &str = "/subtext/submitResults";

/// Absolute URLs of the upstream endpoints, all relative to one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(scheme: &str, host: &str) -> Self {
        Self::from_base_url(format!("{scheme}://{host}"))
    }

    /// Use a full base such as `http://127.0.0.1:8080`.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn range_info(&self) -> String {
        self.url(RANGE_INFO_PATH)
    }

    pub fn divisor_info(&self) -> String {
        self.url(DIVISOR_INFO_PATH)
    }

    pub fn text_to_search(&self) -> String {
        self.url(TEXT_TO_SEARCH_PATH)
    }

    pub fn subtexts(&self) -> String {
        self.url(SUBTEXTS_PATH)
    }

    pub fn submit_results(&self) -> String {
        self.url(SUBMIT_RESULTS_PATH)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME, DEFAULT_HOST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.range_info(),
            "https://api.example.com/fizzbuzz/rangeInfo"
        );
        assert_eq!(
            endpoints.submit_results(),
            "https://api.example.com/subtext/submitResults"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let endpoints = Endpoints::from_base_url("http://127.0.0.1:8080/");
        assert_eq!(endpoints.base_url(), "http://127.0.0.1:8080");
        assert_eq!(endpoints.subtexts(), "http://127.0.0.1:8080/subtext/subTexts");
    }
}
