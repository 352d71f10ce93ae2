//! Migrate command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database).await?;
    let result = report_tables(&store, config).await;
    store.finish(result).await
}

async fn report_tables(store: &Store, config: &Config) -> anyhow::Result<()> {
    store.ping().await?;

    println!("Migrations applied to {}", config.database.url);
    println!("{:-<40}", "");

    let counts = [
        ("user_roles", store.user_roles().count().await?),
        ("users", store.users().count().await?),
        ("countries", store.countries().count().await?),
        ("airports", store.airports().count().await?),
        ("customers", store.customers().count().await?),
        ("administrators", store.administrators().count().await?),
        ("airline_companies", store.airline_companies().count().await?),
        ("flights", store.flights().count().await?),
        ("tickets", store.tickets().count().await?),
    ];

    for (table, count) in counts {
        println!("{table:<20} {count:>10}");
    }

    Ok(())
}
