use std::path::PathBuf;

/// Application configuration, loaded from `DARKSTORE_*` environment
/// variables. Every field has a default; see [`crate::config`].
#[derive(Clone)]
pub struct AppConfig {
    /// WebDriver endpoint the browser session is created against.
    pub webdriver_url: String,
    /// Storefront entry page loaded before address resolution.
    pub start_url: String,
    /// User-agent override passed to the browser session.
    pub user_agent: String,
    /// Optional manual HTTP proxy (`host:port`), applied to the session.
    pub proxy_http: Option<String>,
    /// Path the extracted CSV is written to.
    pub output_path: PathBuf,
    pub log_level: String,
    /// Wait for the layout sidebar on the entry page (T1).
    pub sidebar_timeout_secs: u64,
    /// Wait for the address-suggestion panel after opening the prompt (T2).
    pub suggest_timeout_secs: u64,
    /// Shorter wait for the suggestion panel after typing a city (T3).
    pub city_suggest_timeout_secs: u64,
    /// Wait for listing content after a category navigation.
    pub page_timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Settle delay after typing into a debounced suggestion input.
    pub typing_settle_ms: u64,
    /// How many leading catalog sections contribute category links.
    pub catalog_section_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("webdriver_url", &self.webdriver_url)
            .field("start_url", &self.start_url)
            .field("user_agent", &self.user_agent)
            // The proxy value may carry embedded credentials.
            .field("proxy_http", &self.proxy_http.as_ref().map(|_| "[redacted]"))
            .field("output_path", &self.output_path)
            .field("log_level", &self.log_level)
            .field("sidebar_timeout_secs", &self.sidebar_timeout_secs)
            .field("suggest_timeout_secs", &self.suggest_timeout_secs)
            .field("city_suggest_timeout_secs", &self.city_suggest_timeout_secs)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("typing_settle_ms", &self.typing_settle_ms)
            .field("catalog_section_limit", &self.catalog_section_limit)
            .finish()
    }
}
