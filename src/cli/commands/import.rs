//! Import command handlers

use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::services::ourairports;

pub async fn cmd_import_countries(config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let path = file.unwrap_or(config.ourairports.countries_csv.as_path());
    let store = Store::connect(&config.database).await?;

    let result = ourairports::import_countries(&store, path).await;
    if let Ok(report) = &result {
        println!("Countries: {report}");
        println!("Airports were cleared, run `jormungand import airports` next.");
    }

    store.finish(result.map(drop).map_err(Into::into)).await
}

pub async fn cmd_import_airports(config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let path = file.unwrap_or(config.ourairports.airports_csv.as_path());
    let store = Store::connect(&config.database).await?;

    let result =
        ourairports::import_airports(&store, path, &config.ourairports.accepted_airport_types)
            .await;
    if let Ok(report) = &result {
        println!("Airports: {report}");
    }

    store.finish(result.map(drop).map_err(Into::into)).await
}

pub async fn cmd_import_all(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database).await?;

    let result = ourairports::import_all(&store, &config.ourairports).await;
    if let Ok(summary) = &result {
        println!("Countries: {}", summary.countries);
        println!("Airports:  {}", summary.airports);
    }

    store.finish(result.map(drop).map_err(Into::into)).await
}
