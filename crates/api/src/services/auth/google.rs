//! Google ID token verification.
//!
//! Tokens are verified by Google's token-info endpoint rather than locally:
//! `GET <tokeninfo_url>?id_token=<token>` answers 200 with the token's claims
//! when the token is valid and unexpired, and a 4xx otherwise. The request is
//! bounded by the configured timeout.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::GoogleConfig;

/// Errors that can occur while verifying a Google ID token.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Transport failure or timeout talking to the identity provider.
    #[error("token-info request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The identity provider refused the token.
    #[error("token rejected by identity provider (status {0})")]
    Rejected(StatusCode),

    /// The identity provider answered with an unusable payload.
    #[error("invalid token-info response: {0}")]
    ParseError(String),

    /// The token was issued for a different OAuth client.
    #[error("token audience mismatch")]
    AudienceMismatch,
}

impl GoogleError {
    /// Whether the failure means the token itself is bad, as opposed to the
    /// identity provider being unreachable.
    #[must_use]
    pub const fn is_invalid_token(&self) -> bool {
        !matches!(self, Self::HttpRequest(_))
    }
}

/// Claims of a verified token that the API uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    /// Stable Google account id (`sub`).
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    aud: Option<String>,
}

/// Client for the token-info endpoint.
#[derive(Debug, Clone)]
pub struct GoogleVerifier {
    http_client: reqwest::Client,
    tokeninfo_url: Url,
    client_id: Option<String>,
}

impl GoogleVerifier {
    /// Build a verifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::HttpRequest` if the HTTP client cannot be built.
    pub fn new(config: &GoogleConfig) -> Result<Self, GoogleError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("comparebuddy-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            tokeninfo_url: config.tokeninfo_url.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// Verify an ID token and return the identity it carries.
    ///
    /// # Errors
    ///
    /// - [`GoogleError::HttpRequest`]: network error or timeout.
    /// - [`GoogleError::Rejected`]: the provider answered with a non-2xx status.
    /// - [`GoogleError::ParseError`]: the payload lacks `sub` or `email`.
    /// - [`GoogleError::AudienceMismatch`]: `aud` differs from the configured client id.
    #[tracing::instrument(skip(self, id_token))]
    pub async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, GoogleError> {
        let mut url = self.tokeninfo_url.clone();
        url.query_pairs_mut().append_pair("id_token", id_token);

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "Identity provider rejected token");
            return Err(GoogleError::Rejected(status));
        }

        let body = response.text().await?;
        let info: TokenInfo = serde_json::from_str(&body)
            .map_err(|e| GoogleError::ParseError(format!("failed to parse token info: {e}")))?;

        if let Some(expected) = &self.client_id
            && info.aud.as_deref() != Some(expected.as_str())
        {
            return Err(GoogleError::AudienceMismatch);
        }

        let subject = non_empty(info.sub)
            .ok_or_else(|| GoogleError::ParseError("token info has no subject".to_string()))?;
        let email = non_empty(info.email)
            .ok_or_else(|| GoogleError::ParseError("token info has no email".to_string()))?;

        Ok(GoogleIdentity {
            subject,
            email,
            name: non_empty(info.name),
            picture: non_empty(info.picture),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
