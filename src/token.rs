//! OAuth2 client-credentials token acquisition.

use std::time::Duration;

use serde_json::Value;
use tracing::error;

use crate::error::AuthError;
use crate::status;

/// Client credentials for the OAuth2 token endpoint. Loaded once from
/// configuration and immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
}

/// A minted bearer token, stored as the full `Authorization` header value.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw server-provided token as `Bearer <token>`.
    pub fn new(raw: &str) -> Self {
        Self(format!("Bearer {raw}"))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

/// Exchanges client credentials for a bearer token.
///
/// A session acquires exactly one token and reuses it for every call; there
/// is no refresh.
pub struct TokenProvider {
    http: reqwest::Client,
    credentials: Credentials,
}

impl TokenProvider {
    pub fn new(credentials: Credentials) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http, credentials })
    }

    /// Sends the form-encoded client-credentials POST and returns the token.
    ///
    /// Failures are logged and returned; callers must check the result
    /// before issuing authenticated requests.
    pub async fn acquire(&self) -> Result<BearerToken, AuthError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.credentials.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Token request failed");
                AuthError::Request(e)
            })?;

        let code = response.status().as_u16();
        if code != 200 {
            match status::describe(code) {
                Some(description) => error!(code, description, "Token request rejected"),
                None => error!(code, "Token request rejected"),
            }
            return Err(AuthError::HttpStatus { code });
        }

        let body: Value = response.json().await.map_err(|e| {
            error!(error = %e, "Token response body is not valid JSON");
            AuthError::Request(e)
        })?;

        match body.get("access_token").and_then(Value::as_str) {
            Some(raw) => Ok(BearerToken::new(raw)),
            None => {
                error!("Token response is missing 'access_token'");
                Err(AuthError::MissingAccessToken)
            }
        }
    }
}
