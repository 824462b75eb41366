use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default user-agent: a plain desktop Chrome profile, matching what the
/// storefront serves its full layout to.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let webdriver_url = or_default("DARKSTORE_WEBDRIVER_URL", "http://localhost:4444");
    let start_url = or_default("DARKSTORE_START_URL", "https://samokat.ru/");
    let user_agent = or_default("DARKSTORE_USER_AGENT", DEFAULT_USER_AGENT);
    let proxy_http = lookup("DARKSTORE_PROXY_HTTP").ok();
    let output_path = PathBuf::from(or_default("DARKSTORE_OUTPUT_PATH", "products.csv"));
    let log_level = or_default("DARKSTORE_LOG_LEVEL", "info");

    let sidebar_timeout_secs = parse_u64("DARKSTORE_SIDEBAR_TIMEOUT_SECS", "10")?;
    let suggest_timeout_secs = parse_u64("DARKSTORE_SUGGEST_TIMEOUT_SECS", "5")?;
    let city_suggest_timeout_secs = parse_u64("DARKSTORE_CITY_SUGGEST_TIMEOUT_SECS", "3")?;
    let page_timeout_secs = parse_u64("DARKSTORE_PAGE_TIMEOUT_SECS", "10")?;
    let poll_interval_ms = parse_u64("DARKSTORE_POLL_INTERVAL_MS", "250")?;
    let typing_settle_ms = parse_u64("DARKSTORE_TYPING_SETTLE_MS", "1000")?;

    let catalog_section_limit = parse_usize("DARKSTORE_CATALOG_SECTION_LIMIT", "3")?;
    if catalog_section_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DARKSTORE_CATALOG_SECTION_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        webdriver_url,
        start_url,
        user_agent,
        proxy_http,
        output_path,
        log_level,
        sidebar_timeout_secs,
        suggest_timeout_secs,
        city_suggest_timeout_secs,
        page_timeout_secs,
        poll_interval_ms,
        typing_settle_ms,
        catalog_section_limit,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
