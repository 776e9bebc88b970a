//! The stops-and-vehicles-on-a-route workflow.
//!
//! Chains three dependent lookups (route detail, per-stop arrivals, vehicle
//! detail) and flattens them into one record per stop. Missing keys at any
//! layer are reported individually and leave their fields empty; only a
//! route that cannot be resolved at all aborts the lookup.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::RouteApi;
use crate::envelope::{extract_attributes, field_text};
use crate::error::WorkflowError;

/// One flattened row per stop on a route. Fields whose source JSON lacked
/// the expected key stay empty; a partial record is still emitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StopArrivalRecord {
    pub route_id: String,
    pub route_name: String,
    pub stop_id: String,
    pub stop_description: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub vehicle_heading: String,
    pub eta: String,
}

impl fmt::Display for StopArrivalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route ID: {}, Route Name: {}, Stop ID: {}, Stop Name: {}, \
             Vehicle Name: {}, Vehicle Number: {}, Heading: {}, \
             ETA for arrival to Stop: {}",
            self.route_id,
            self.route_name,
            self.stop_id,
            self.stop_description,
            self.vehicle_name,
            self.vehicle_id,
            self.vehicle_heading,
            self.eta,
        )
    }
}

/// Walks every stop on `route_id`, emitting one [`StopArrivalRecord`] per
/// stop as soon as it is computed. Returns the number of records emitted.
///
/// Stops are visited in the API's array order and never re-sorted; the
/// earliest-listed arrival at each stop is the vehicle/ETA source.
pub async fn stops_and_vehicles<A: RouteApi + ?Sized>(
    api: &A,
    route_id: &str,
    mut emit: impl FnMut(StopArrivalRecord),
) -> Result<usize, WorkflowError> {
    let route = api
        .route_detail(route_id)
        .await
        .map_err(|source| WorkflowError::RouteFetch {
            route_id: route_id.to_string(),
            source,
        })?;
    let route_attrs =
        extract_attributes(&route).map_err(|source| WorkflowError::RouteShape {
            route_id: route_id.to_string(),
            source,
        })?;

    let route_name = match route_attrs.get("description") {
        Some(name) => field_text(name),
        None => {
            warn!(route_id, "'description' key is missing in route attributes");
            String::new()
        }
    };

    let stops = match route_attrs.get("stops").and_then(Value::as_array) {
        Some(stops) => stops.as_slice(),
        None => {
            debug!(route_id, "Route has no 'stops' key; nothing to report");
            &[]
        }
    };

    let mut emitted = 0;
    for stop in stops {
        let (Some(stop_id), Some(stop_description)) = (
            stop.get("stopID").map(field_text),
            stop.get("description").map(field_text),
        ) else {
            warn!(route_id, "'stopID' or 'description' key is missing in stop object");
            continue;
        };

        let mut record = StopArrivalRecord {
            route_id: route_id.to_string(),
            route_name: route_name.clone(),
            stop_id,
            stop_description,
            ..Default::default()
        };

        fill_vehicle_fields(api, route_id, &mut record).await;

        emit(record);
        emitted += 1;
    }

    Ok(emitted)
}

/// Resolves the first upcoming arrival at `record.stop_id` and the vehicle
/// behind it, leaving fields empty wherever a call or key falls through.
async fn fill_vehicle_fields<A: RouteApi + ?Sized>(
    api: &A,
    route_id: &str,
    record: &mut StopArrivalRecord,
) {
    let stop_id = record.stop_id.clone();

    let arrivals = match api.stop_arrivals(&stop_id, route_id).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%stop_id, error = %e, "Arrivals lookup failed for stop");
            return;
        }
    };
    let arrival_attrs = match extract_attributes(&arrivals) {
        Ok(attrs) => attrs,
        Err(e) => {
            warn!(%stop_id, error = %e, "Arrivals response is malformed");
            return;
        }
    };

    let first_arrival = match arrival_attrs
        .get("arrivals")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
    {
        Some(first) => first,
        None => {
            warn!(%stop_id, "'arrivals' key is missing or empty in arrivals attributes");
            return;
        }
    };

    let (Some(vehicle_id), Some(eta)) =
        (first_arrival.get("vehicleID"), first_arrival.get("eta"))
    else {
        warn!(%stop_id, "'vehicleID' or 'eta' key is missing in the first arrival object");
        return;
    };
    record.vehicle_id = field_text(vehicle_id);
    record.eta = field_text(eta);

    let vehicle = match api.vehicle_detail(&record.vehicle_id).await {
        Ok(body) => body,
        Err(e) => {
            warn!(vehicle_id = %record.vehicle_id, error = %e, "Vehicle lookup failed");
            return;
        }
    };
    let vehicle_attrs = match extract_attributes(&vehicle) {
        Ok(attrs) => attrs,
        Err(e) => {
            warn!(vehicle_id = %record.vehicle_id, error = %e, "Vehicle response is malformed");
            return;
        }
    };

    match (vehicle_attrs.get("name"), vehicle_attrs.get("heading")) {
        (Some(name), Some(heading)) => {
            record.vehicle_name = field_text(name);
            record.vehicle_heading = field_text(heading);
        }
        _ => {
            warn!(
                vehicle_id = %record.vehicle_id,
                "'name' or 'heading' key is missing in vehicles attributes"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_console_format() {
        let record = StopArrivalRecord {
            route_id: "12".into(),
            route_name: "West Loop".into(),
            stop_id: "A".into(),
            stop_description: "Main St".into(),
            vehicle_id: "7".into(),
            vehicle_name: "Bus 7".into(),
            vehicle_heading: "North".into(),
            eta: "3 min".into(),
        };

        assert_eq!(
            record.to_string(),
            "Route ID: 12, Route Name: West Loop, Stop ID: A, Stop Name: Main St, \
             Vehicle Name: Bus 7, Vehicle Number: 7, Heading: North, \
             ETA for arrival to Stop: 3 min"
        );
    }

    #[test]
    fn test_display_with_empty_fields() {
        let record = StopArrivalRecord {
            route_id: "12".into(),
            stop_id: "A".into(),
            stop_description: "Main St".into(),
            ..Default::default()
        };

        assert_eq!(
            record.to_string(),
            "Route ID: 12, Route Name: , Stop ID: A, Stop Name: Main St, \
             Vehicle Name: , Vehicle Number: , Heading: , \
             ETA for arrival to Stop: "
        );
    }
}
