//! CLI module - Command-line interface for Jormungand
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Jormungand - flight booking data layer
/// Schema management, `OurAirports` reference data import and airport lookup
#[derive(Parser)]
#[command(name = "jormungand")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init {
        /// Where to write the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Apply migrations and seed data, then report table sizes
    Migrate,

    /// Import OurAirports reference data
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },

    /// Query airports
    Airports {
        #[command(subcommand)]
        command: AirportCommands,
    },

    /// Query countries
    Countries {
        #[command(subcommand)]
        command: CountryCommands,
    },

    /// Query flights
    Flights {
        #[command(subcommand)]
        command: FlightCommands,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Replace the country table (empties airports)
    Countries {
        /// CSV file to read instead of the configured one
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Replace the airport table
    Airports {
        /// CSV file to read instead of the configured one
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Import countries, then airports, from the configured files
    All,
}

#[derive(Subcommand)]
pub enum AirportCommands {
    /// Ranked substring search
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<u64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum CountryCommands {
    /// List all countries
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum FlightCommands {
    /// Flights between two airports' countries on the given dates
    #[command(alias = "s")]
    Search {
        /// Origin IATA code
        origin: String,
        /// Destination IATA code
        destination: String,
        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        departure: NaiveDate,
        /// Return date (YYYY-MM-DD) for round trips
        #[arg(long = "return")]
        return_date: Option<NaiveDate>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

pub use commands::*;
