//! Flight lookup for a validated [`FlightSearch`].
//!
//! Flights are stored between countries, so each requested airport is
//! resolved to its country before matching.

use serde::Serialize;
use tracing::debug;

use crate::db::{DataResult, Store};
use crate::entities::flights;
use crate::validation::FlightSearch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightOptions {
    pub outbound: Vec<flights::Model>,
    /// Empty for one-way searches.
    pub inbound: Vec<flights::Model>,
}

/// Fails with `NotFound` when either airport is unknown.
pub async fn find_flights(store: &Store, search: &FlightSearch) -> DataResult<FlightOptions> {
    let airports = store.airports();
    let origin = airports.get_by_iata(&search.origin).await?;
    let destination = airports.get_by_iata(&search.destination).await?;

    let flights = store.flights();
    let outbound = flights
        .departing_on(origin.country_id, destination.country_id, search.departure_date)
        .await?;

    let inbound = match search.return_date {
        Some(date) => {
            flights
                .departing_on(destination.country_id, origin.country_id, date)
                .await?
        }
        None => Vec::new(),
    };

    debug!(
        "Flights {} -> {}: {} outbound, {} inbound",
        search.origin,
        search.destination,
        outbound.len(),
        inbound.len()
    );
    Ok(FlightOptions { outbound, inbound })
}
