//! Error taxonomy for the OSU API client.
//!
//! HTTP- and JSON-level failures are terminal for a single call but never
//! fatal for a workflow; callers substitute empty values and continue. Only
//! an unresolvable route aborts a route lookup.

use thiserror::Error;

/// Failure to mint a bearer token from the OAuth2 client-credentials endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request could not be sent or its body could not be read.
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The token endpoint answered with a non-200 status.
    #[error("token endpoint returned status {code}")]
    HttpStatus { code: u16 },

    /// The token endpoint answered 200 but the body had no `access_token`.
    #[error("token response is missing 'access_token'")]
    MissingAccessToken,

    /// The minted token cannot be encoded as an `Authorization` header, so
    /// no authenticated request could ever carry it.
    #[error("token cannot be encoded as an Authorization header")]
    InvalidTokenValue,
}

/// Failure of a single authenticated GET request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be parsed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The request could not be sent (connect failure, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-200 status.
    #[error("HTTP status {code}")]
    HttpStatus { code: u16 },

    /// The server answered 200 but the body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    InvalidJson(#[source] reqwest::Error),
}

/// The response body did not match the `data`/`attributes` envelope shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("empty response")]
    EmptyResponse,

    #[error("'data' key is missing in the response")]
    MissingData,

    #[error("'attributes' key is missing in data")]
    MissingAttributes,
}

/// Fatal failure of the route/arrivals/vehicle workflow. Only the initial
/// route lookup can fail this way; everything downstream degrades to a
/// partial record instead.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("route {route_id} could not be fetched: {source}")]
    RouteFetch {
        route_id: String,
        #[source]
        source: FetchError,
    },

    #[error("route {route_id} response is malformed: {source}")]
    RouteShape {
        route_id: String,
        #[source]
        source: ShapeError,
    },
}
