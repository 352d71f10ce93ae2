pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod logging;
pub mod services;
pub mod validation;

use clap::Parser;

use cli::{AirportCommands, Cli, Commands, CountryCommands, FlightCommands, ImportCommands};
pub use config::Config;
pub use db::{DataError, DataResult, Repository, Store, Table};

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { path } = &cli.command {
        return cli::cmd_init(path.as_deref());
    }

    let config = Config::load()?;
    config.validate()?;
    logging::init(&config.general)?;

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Migrate => cli::cmd_migrate(&config).await,
        Commands::Import { command } => match command {
            ImportCommands::Countries { file } => {
                cli::cmd_import_countries(&config, file.as_deref()).await
            }
            ImportCommands::Airports { file } => {
                cli::cmd_import_airports(&config, file.as_deref()).await
            }
            ImportCommands::All => cli::cmd_import_all(&config).await,
        },
        Commands::Airports { command } => match command {
            AirportCommands::Search { query, limit, json } => {
                cli::cmd_search_airports(&config, &query.join(" "), limit, json).await
            }
        },
        Commands::Countries { command } => match command {
            CountryCommands::List => cli::cmd_list_countries(&config).await,
        },
        Commands::Flights { command } => match command {
            FlightCommands::Search {
                origin,
                destination,
                departure,
                return_date,
                json,
            } => {
                cli::cmd_search_flights(
                    &config,
                    &origin,
                    &destination,
                    departure,
                    return_date,
                    json,
                )
                .await
            }
        },
    }
}
