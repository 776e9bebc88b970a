//! Configuration loading and pre-session validation.
//!
//! The YAML document is read once at startup and treated as immutable; no
//! component reaches for ambient config afterwards.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{error, info};

use crate::fetch::{self, HttpClient};
use crate::token::Credentials;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub access_token: AccessTokenConfig,
    pub api_urls: ApiUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenConfig {
    pub url: String,
    pub payload: TokenPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPayload {
    pub client_id: String,
    pub client_secret: String,
}

/// The named endpoints this tool talks to. Read-only after load.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUrls {
    pub beaver_bus: String,
    pub terms: String,
    pub routes: String,
    pub arrivals: String,
    pub vehicles: String,
    pub textbooks: String,
}

impl ApiUrls {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("beaver_bus", self.beaver_bus.as_str()),
            ("terms", self.terms.as_str()),
            ("routes", self.routes.as_str()),
            ("arrivals", self.arrivals.as_str()),
            ("vehicles", self.vehicles.as_str()),
            ("textbooks", self.textbooks.as_str()),
        ]
    }
}

impl AppConfig {
    /// Loads and parses the YAML configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("config file '{}' not found", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in '{}'", path.display()))?;
        Ok(config)
    }

    /// Client credentials for the token endpoint.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.access_token.payload.client_id.clone(),
            client_secret: self.access_token.payload.client_secret.clone(),
            token_url: self.access_token.url.clone(),
        }
    }
}

/// HEAD-probes every configured API URL with the session's auth in place.
/// Run once before the session starts; any unreachable endpoint fails the
/// whole validation.
pub async fn verify_endpoints<C: HttpClient>(client: &C, urls: &ApiUrls) -> Result<()> {
    for (name, url) in urls.entries() {
        if !fetch::probe(client, url).await {
            error!(name, url, "API URL is not reachable");
            bail!("invalid API URL '{name}': {url}");
        }
    }
    info!("All configured API URLs are reachable");
    Ok(())
}
