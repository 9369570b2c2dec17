//! Application configuration loaded from environment variables.
//!
//! - `BOOKDESK_BASE_URL` — collaborator base URL (default
//!   `http://127.0.0.1:3000`)
//! - `BOOKDESK_REFRESH_MS` — book polling cadence in milliseconds
//!   (default 5000)
//! - `BOOKDESK_LOG_FILE` — when set, tracing output is written to this
//!   file (stderr would corrupt the TUI)

use crate::error::BookdeskError;

/// Default collaborator endpoint.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default book refresh cadence.
const DEFAULT_REFRESH_MS: u64 = 5000;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub refresh_ms: u64,
    pub log_file: Option<String>,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`BookdeskError::Config`] if `BOOKDESK_REFRESH_MS` is set but
/// is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("BOOKDESK_BASE_URL")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let refresh_ms = match non_empty_var("BOOKDESK_REFRESH_MS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                return Err(BookdeskError::Config(format!(
                    "BOOKDESK_REFRESH_MS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => DEFAULT_REFRESH_MS,
    };

    let log_file = non_empty_var("BOOKDESK_LOG_FILE");

    Ok(AppConfig {
        base_url,
        refresh_ms,
        log_file,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
