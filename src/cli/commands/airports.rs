//! Airport search command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_search_airports(
    config: &Config,
    query: &str,
    limit: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let limit = config.search.effective_limit(limit);
    let store = Store::connect(&config.database).await?;
    let result = search(&store, query, limit, json).await;
    store.finish(result).await
}

async fn search(store: &Store, query: &str, limit: u64, json: bool) -> anyhow::Result<()> {
    let matches = store.airports().search(query, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        println!("No airports match '{query}'.");
    } else {
        println!("Airports matching '{}' ({} shown)", query, matches.len());
        println!("{:-<70}", "");
        for airport in &matches {
            println!(
                "{} {} ({}, {} [{}])",
                airport.iata_code,
                airport.name,
                airport.municipality,
                airport.country_name,
                airport.country_code
            );
        }
    }

    Ok(())
}
