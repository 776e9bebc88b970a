//! Single-attempt JSON GETs against the OSU endpoints.
//!
//! One request per call, 10-second budget, no retries and no backoff; the
//! workflow layer decides what to do with a failed call.

mod auth;
mod client;

pub use auth::BearerAuth;
pub use client::{BasicClient, HttpClient};

use reqwest::{Method, Request, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::FetchError;
use crate::status;

fn build_url(url: &str, query: &[(&str, &str)]) -> Result<Url, FetchError> {
    let mut url: Url = url
        .parse()
        .map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    for (name, value) in query {
        url.query_pairs_mut().append_pair(name, value);
    }
    Ok(url)
}

/// Issues a GET and returns the parsed JSON body.
///
/// A non-200 status and an undecodable 200 body are distinct failures; both
/// are logged here (stderr and the log file) and reported to the caller,
/// never panicked on.
pub async fn fetch_json<C: HttpClient>(
    client: &C,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Value, FetchError> {
    let url = build_url(url, query)?;
    debug!(%url, "GET");

    let req = Request::new(Method::GET, url);
    let response = client.execute(req).await.map_err(|e| {
        error!(error = %e, "Request failed");
        FetchError::Request(e)
    })?;

    let code = response.status().as_u16();
    if code != 200 {
        match status::describe(code) {
            Some(description) => error!(code, description, "Request rejected"),
            None => error!(code, "Request rejected"),
        }
        return Err(FetchError::HttpStatus { code });
    }

    response.json().await.map_err(|e| {
        error!("Invalid JSON response");
        FetchError::InvalidJson(e)
    })
}

/// HEAD-probes `url`, returning whether it answered 200. Transport errors
/// count as unreachable rather than propagating.
pub async fn probe<C: HttpClient>(client: &C, url: &str) -> bool {
    let Ok(url) = url.parse() else {
        return false;
    };

    let req = Request::new(Method::HEAD, url);
    match client.execute(req).await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            debug!(error = %e, "Probe failed");
            false
        }
    }
}
