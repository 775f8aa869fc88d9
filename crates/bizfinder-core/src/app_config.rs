#[derive(Clone)]
pub struct AppConfig {
    pub serpapi_key: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Location used when the caller names none.
    pub default_location: String,
    /// Province used when the caller names no location.
    pub default_province: Option<String>,
    /// District within `default_province`; ignored without a province.
    pub default_district: Option<String>,
    /// Overrides the SerpApi endpoint, e.g. for a local proxy or mock.
    pub api_base_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("serpapi_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_location", &self.default_location)
            .field("default_province", &self.default_province)
            .field("default_district", &self.default_district)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
