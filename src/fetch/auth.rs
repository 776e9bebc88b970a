use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::AuthError;
use crate::fetch::client::HttpClient;
use crate::token::BearerToken;

/// An [`HttpClient`] decorator that stamps the session's bearer token onto
/// every outgoing request as the `Authorization` header.
pub struct BearerAuth<C> {
    inner: C,
    header: HeaderValue,
}

impl<C> BearerAuth<C> {
    /// Encodes the token as a header value up front; a token that cannot be
    /// sent must fail here rather than let requests go out unauthenticated.
    pub fn new(inner: C, token: BearerToken) -> Result<Self, AuthError> {
        let header = HeaderValue::from_str(token.header_value())
            .map_err(|_| AuthError::InvalidTokenValue)?;
        Ok(Self { inner, header })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for BearerAuth<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.header.clone());
        self.inner.execute(req).await
    }
}
