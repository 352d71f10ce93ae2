//! Flight search command handler

use chrono::NaiveDate;

use crate::config::Config;
use crate::db::Store;
use crate::entities::flights;
use crate::services::find_flights;
use crate::validation::FlightSearch;

pub async fn cmd_search_flights(
    config: &Config,
    origin: &str,
    destination: &str,
    departure: NaiveDate,
    return_date: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let search = FlightSearch::new(origin, destination, departure, return_date)?;

    let store = Store::connect(&config.database).await?;
    let result = show(&store, &search, json).await;
    store.finish(result).await
}

async fn show(store: &Store, search: &FlightSearch, json: bool) -> anyhow::Result<()> {
    let options = find_flights(store, search).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    print_leg(
        &format!("{} -> {}", search.origin, search.destination),
        search.departure_date,
        &options.outbound,
    );
    if let Some(date) = search.return_date {
        println!();
        print_leg(
            &format!("{} -> {}", search.destination, search.origin),
            date,
            &options.inbound,
        );
    }

    Ok(())
}

fn print_leg(route: &str, date: NaiveDate, rows: &[flights::Model]) {
    println!("{route} on {date} ({} flights)", rows.len());
    println!("{:-<60}", "");
    for flight in rows {
        println!(
            "#{:<6} departs {}  lands {}  {} seats left",
            flight.id, flight.departure_time, flight.landing_time, flight.remaining_tickets
        );
    }
}
