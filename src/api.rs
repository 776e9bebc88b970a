//! The OSU API surface, split into a trait for the route workflow (so tests
//! can fake the wire) and a concrete client carrying the endpoint set.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiUrls;
use crate::error::FetchError;
use crate::fetch::{self, HttpClient};

/// The three causally-chained lookups the route workflow depends on.
#[async_trait]
pub trait RouteApi: Send + Sync {
    /// `GET {routes}/{route_id}` — route description plus its stop list.
    async fn route_detail(&self, route_id: &str) -> Result<Value, FetchError>;

    /// `GET {arrivals}?stopID=..&routeID=..` — upcoming arrivals at a stop.
    async fn stop_arrivals(&self, stop_id: &str, route_id: &str) -> Result<Value, FetchError>;

    /// `GET {vehicles}/{vehicle_id}` — vehicle name and heading.
    async fn vehicle_detail(&self, vehicle_id: &str) -> Result<Value, FetchError>;
}

/// Authenticated client over the configured OSU endpoints. The caller wraps
/// its transport in [`crate::fetch::BearerAuth`] so every request carries
/// the session token.
pub struct OsuApiClient<C> {
    client: C,
    urls: ApiUrls,
}

impl<C: HttpClient> OsuApiClient<C> {
    pub fn new(client: C, urls: ApiUrls) -> Self {
        Self { client, urls }
    }

    /// Current Beaver Bus system overview.
    pub async fn beaver_bus(&self) -> Result<Value, FetchError> {
        fetch::fetch_json(&self.client, &self.urls.beaver_bus, &[]).await
    }

    /// Academic terms, optionally filtered to the term containing `date`
    /// (`yyyy-mm-dd`).
    pub async fn terms(&self, date: Option<&str>) -> Result<Value, FetchError> {
        match date {
            Some(date) => fetch::fetch_json(&self.client, &self.urls.terms, &[("date", date)]).await,
            None => fetch::fetch_json(&self.client, &self.urls.terms, &[]).await,
        }
    }
}

#[async_trait]
impl<C: HttpClient> RouteApi for OsuApiClient<C> {
    async fn route_detail(&self, route_id: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.urls.routes, route_id);
        fetch::fetch_json(&self.client, &url, &[]).await
    }

    async fn stop_arrivals(&self, stop_id: &str, route_id: &str) -> Result<Value, FetchError> {
        fetch::fetch_json(
            &self.client,
            &self.urls.arrivals,
            &[("stopID", stop_id), ("routeID", route_id)],
        )
        .await
    }

    async fn vehicle_detail(&self, vehicle_id: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.urls.vehicles, vehicle_id);
        fetch::fetch_json(&self.client, &url, &[]).await
    }
}
