//! List countries command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_countries(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database).await?;
    let result = list(&store).await;
    store.finish(result).await
}

async fn list(store: &Store) -> anyhow::Result<()> {
    let countries = store.countries().get_all().await?;

    if countries.is_empty() {
        println!("No countries stored.");
        println!();
        println!("Import them with: jormungand import countries");
    } else {
        println!("Countries ({} total)", countries.len());
        println!("{:-<40}", "");
        for country in &countries {
            println!("{:>5}  {}  {}", country.id, country.code, country.name);
        }
    }

    Ok(())
}
