//! Sheets client — the single place that talks to the Google Sheets API.
//!
//! Authenticates as a service account (RS256 JWT exchanged for an access token)
//! and appends one row per call. No retries: a failed append is reported once
//! and the caller decides what to do.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SheetsConfig;
use crate::models::job::JobRecord;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Missing Google service account env vars")]
    MissingCredentials,

    #[error("Invalid service account private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign service account token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token exchange failed (status {status}): {message}")]
    Token { status: u16, message: String },

    #[error("Sheets API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Sheets API URL: {0}")]
    Url(String),
}

/// Anything that can persist a finished job record as a sheet row.
///
/// Carried in `AppState` as `Arc<dyn RowAppender>`.
#[async_trait]
pub trait RowAppender: Send + Sync {
    async fn append_row(&self, record: &JobRecord) -> Result<(), SheetsError>;
}

#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleApiError {
    error: GoogleApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleApiErrorBody {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// Service account credentials, resolved per call.
#[derive(Debug, Clone)]
pub struct ServiceAccount {
    pub email: String,
    pub private_key_pem: String,
}

impl ServiceAccount {
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SheetsError> {
        match (&config.service_account_email, &config.private_key) {
            (Some(email), Some(key)) => Ok(Self {
                email: email.clone(),
                // keys pasted into .env usually carry escaped newlines
                private_key_pem: key.replace("\\n", "\n"),
            }),
            _ => Err(SheetsError::MissingCredentials),
        }
    }

    /// Signed JWT assertion for the OAuth jwt-bearer grant.
    pub fn sign_assertion(&self, audience: &str, issued_at: i64) -> Result<String, SheetsError> {
        let key = EncodingKey::from_rsa_pem(self.private_key_pem.as_bytes())
            .map_err(SheetsError::InvalidKey)?;
        let claims = Claims {
            iss: self.email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: audience.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(SheetsError::Signing)
    }
}

/// Appends rows to one tab of one spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            config,
        })
    }

    /// Exchanges a freshly signed assertion for a bearer token.
    async fn access_token(&self) -> Result<String, SheetsError> {
        let account = ServiceAccount::from_config(&self.config)?;
        let assertion = account.sign_assertion(&self.config.token_uri, Utc::now().timestamp())?;

        let response = self
            .client
            .post(&self.config.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TokenError>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {}", e.error, description),
                    None => e.error,
                })
                .unwrap_or(body);
            return Err(SheetsError::Token {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// `{api_base}/v4/spreadsheets/{id}/values/{tab}!A:Z:append?valueInputOption=USER_ENTERED`
    fn append_url(&self) -> Result<Url, SheetsError> {
        let mut url =
            Url::parse(&self.config.api_base).map_err(|e| SheetsError::Url(e.to_string()))?;
        let range = format!("{}:append", self.config.append_range());

        url.path_segments_mut()
            .map_err(|_| SheetsError::Url(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        Ok(url)
    }
}

#[async_trait]
impl RowAppender for SheetsClient {
    async fn append_row(&self, record: &JobRecord) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let url = self.append_url()?;

        info!(
            spreadsheet = %self.config.spreadsheet_id,
            tab = %self.config.tab_name,
            "Appending job row"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(&json!({ "values": [record.to_row()] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let appended: AppendResponse = response.json().await.unwrap_or_default();
        debug!(
            "Row appended: range={}",
            appended
                .updates
                .and_then(|u| u.updated_range)
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(())
    }
}
