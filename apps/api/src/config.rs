use anyhow::{Context, Result};

pub const DEFAULT_TAB_NAME: &str = "External";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if the spreadsheet id is missing. Service account
/// credentials are optional here and checked when a row is appended.
#[derive(Debug, Clone)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub tab_name: String,
    pub service_account_email: Option<String>,
    /// PEM as found in the environment; may still contain literal `\n`.
    pub private_key: Option<String>,
    pub token_uri: String,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            sheets: SheetsConfig {
                spreadsheet_id: require_env("GOOGLE_SHEETS_SPREADSHEET_ID")?,
                tab_name: env_or("GOOGLE_SHEETS_TAB_NAME", DEFAULT_TAB_NAME),
                service_account_email: optional_env("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
                private_key: optional_env("GOOGLE_PRIVATE_KEY"),
                token_uri: env_or("GOOGLE_TOKEN_URI", DEFAULT_TOKEN_URI),
                api_base: env_or("GOOGLE_SHEETS_API_BASE", DEFAULT_SHEETS_API_BASE),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

impl SheetsConfig {
    /// `Tab!A:Z`, the range rows are appended to.
    pub fn append_range(&self) -> String {
        format!("{}!A:Z", self.tab_name)
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_range_uses_tab_name() {
        let sheets = SheetsConfig {
            spreadsheet_id: "abc".to_string(),
            tab_name: DEFAULT_TAB_NAME.to_string(),
            service_account_email: None,
            private_key: None,
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
        };
        assert_eq!(sheets.append_range(), "External!A:Z");
    }

    #[test]
    fn test_blank_env_counts_as_missing() {
        std::env::set_var("JOB_TRACKER_TEST_BLANK", "   ");
        assert_eq!(optional_env("JOB_TRACKER_TEST_BLANK"), None);
        assert!(require_env("JOB_TRACKER_TEST_BLANK").is_err());
        assert_eq!(env_or("JOB_TRACKER_TEST_BLANK", "fallback"), "fallback");
        std::env::remove_var("JOB_TRACKER_TEST_BLANK");
    }
}
