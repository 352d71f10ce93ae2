//! Reference data import from the OurAirports CSV datasets.
//!
//! Rows are decoded, validated and cleaned, then the destination table is
//! replaced wholesale. Rows that fail any rule are dropped and logged; only
//! file level problems and database failures are returned as errors.
//!
//! Countries must be imported before airports, because airports resolve
//! their `iso_country` column against the stored country codes.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::OurAirportsConfig;
use crate::db::{DataError, Store};
use crate::entities::{airports, countries};
use crate::validation::{has_min_chars, is_country_code, is_iata_code};

const MIN_NAME_CHARS: usize = 2;

const COUNTRY_COLUMNS: &[&str] = &["code", "name"];
const AIRPORT_COLUMNS: &[&str] = &["iso_country", "type", "iata_code", "name", "municipality"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Countries,
    Airports,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Countries => f.write_str("countries"),
            Self::Airports => f.write_str("airports"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("The {dataset} file has no '{column}' column")]
    MissingColumn {
        dataset: Dataset,
        column: &'static str,
    },

    #[error("No valid {dataset} rows to import")]
    NoValidRows { dataset: Dataset },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Why a single row was left out of an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("row could not be decoded: {0}")]
    Undecodable(String),

    #[error("country code '{0}' is not two uppercase letters")]
    CountryCode(String),

    #[error("IATA code '{0}' is not three uppercase letters")]
    IataCode(String),

    #[error("{field} '{value}' is too short")]
    TooShort { field: &'static str, value: String },

    #[error("airport type '{0}' is not accepted")]
    AirportType(String),

    #[error("unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("'{0}' repeats an earlier row")]
    Duplicate(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows_read: usize,
    pub imported: usize,
    pub dropped: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} imported, {} dropped",
            self.rows_read, self.imported, self.dropped
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub countries: ImportReport,
    pub airports: ImportReport,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AirportRow {
    #[serde(rename = "iso_country")]
    country_code: String,
    #[serde(rename = "type")]
    airport_type: String,
    iata_code: String,
    name: String,
    municipality: String,
}

/// Decoded rows keyed by the line they start on.
struct Decoded<T> {
    rows: Vec<(u64, T)>,
    rows_read: usize,
}

pub async fn import_countries(store: &Store, path: &Path) -> Result<ImportReport, ImportError> {
    info!("Importing countries from {}", path.display());
    import_countries_from_reader(store, open(path)?).await
}

/// Replaces the country table with the valid rows of `reader`.
///
/// Airports reference country ids, so the airport table is emptied in the
/// same transaction and must be imported again afterwards.
pub async fn import_countries_from_reader<R: Read>(
    store: &Store,
    reader: R,
) -> Result<ImportReport, ImportError> {
    let decoded = decode::<CountryRow, _>(reader, Dataset::Countries, COUNTRY_COLUMNS)?;
    let rows_read = decoded.rows_read;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (line, row) in decoded.rows {
        match clean_country(row, &mut seen) {
            Ok(record) => records.push(record),
            Err(reason) => reject(Dataset::Countries, line, &reason),
        }
    }

    if records.is_empty() {
        return Err(ImportError::NoValidRows {
            dataset: Dataset::Countries,
        });
    }

    let imported = store
        .countries()
        .replace_all_clearing::<airports::Entity>(records)
        .await?;

    let report = summarize(rows_read, imported);
    info!("Countries import finished: {}", report);
    Ok(report)
}

pub async fn import_airports(
    store: &Store,
    path: &Path,
    accepted_types: &[String],
) -> Result<ImportReport, ImportError> {
    info!("Importing airports from {}", path.display());
    import_airports_from_reader(store, open(path)?, accepted_types).await
}

/// Replaces the airport table with the valid rows of `reader` whose type is
/// one of `accepted_types` and whose country is already stored.
pub async fn import_airports_from_reader<R: Read>(
    store: &Store,
    reader: R,
    accepted_types: &[String],
) -> Result<ImportReport, ImportError> {
    let decoded = decode::<AirportRow, _>(reader, Dataset::Airports, AIRPORT_COLUMNS)?;
    let rows_read = decoded.rows_read;

    let accepted: HashSet<&str> = accepted_types.iter().map(String::as_str).collect();
    let country_ids = store.countries().code_to_id_map().await?;
    if country_ids.is_empty() {
        warn!("No countries stored yet, every airport row will be dropped");
    }

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (line, row) in decoded.rows {
        match clean_airport(row, &accepted, &country_ids, &mut seen) {
            Ok(record) => records.push(record),
            Err(reason) => reject(Dataset::Airports, line, &reason),
        }
    }

    if records.is_empty() {
        return Err(ImportError::NoValidRows {
            dataset: Dataset::Airports,
        });
    }

    let imported = store.airports().replace_all(records).await?;

    let report = summarize(rows_read, imported);
    info!("Airports import finished: {}", report);
    Ok(report)
}

/// Imports countries, then airports, from the configured files.
pub async fn import_all(
    store: &Store,
    config: &OurAirportsConfig,
) -> Result<ImportSummary, ImportError> {
    let countries = import_countries(store, &config.countries_csv).await?;
    let airports =
        import_airports(store, &config.airports_csv, &config.accepted_airport_types).await?;

    Ok(ImportSummary {
        countries,
        airports,
    })
}

fn open(path: &Path) -> Result<File, ImportError> {
    File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode<T, R>(
    reader: R,
    dataset: Dataset,
    required: &[&'static str],
) -> Result<Decoded<T>, ImportError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(ImportError::MissingColumn { dataset, column });
        }
    }

    let mut rows = Vec::new();
    let mut rows_read = 0;
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                rows_read += 1;
                let line = record.position().map_or(0, csv::Position::line);
                match record.deserialize::<T>(Some(&headers)) {
                    Ok(row) => rows.push((line, row)),
                    Err(err) => reject(dataset, line, &RowRejection::Undecodable(err.to_string())),
                }
            }
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                rows_read += 1;
                let line = err.position().map_or(0, csv::Position::line);
                reject(dataset, line, &RowRejection::Undecodable(err.to_string()));
            }
        }
    }

    Ok(Decoded { rows, rows_read })
}

fn clean_country(
    row: CountryRow,
    seen: &mut HashSet<String>,
) -> Result<countries::ActiveModel, RowRejection> {
    if !is_country_code(&row.code) {
        return Err(RowRejection::CountryCode(row.code));
    }
    if !has_min_chars(&row.name, MIN_NAME_CHARS) {
        return Err(RowRejection::TooShort {
            field: "name",
            value: row.name,
        });
    }
    if !seen.insert(row.code.clone()) {
        return Err(RowRejection::Duplicate(row.code));
    }

    Ok(countries::ActiveModel {
        id: NotSet,
        code: Set(row.code),
        name: Set(row.name),
    })
}

fn clean_airport(
    row: AirportRow,
    accepted_types: &HashSet<&str>,
    country_ids: &HashMap<String, i32>,
    seen: &mut HashSet<String>,
) -> Result<airports::ActiveModel, RowRejection> {
    if !accepted_types.contains(row.airport_type.as_str()) {
        return Err(RowRejection::AirportType(row.airport_type));
    }
    if !is_iata_code(&row.iata_code) {
        return Err(RowRejection::IataCode(row.iata_code));
    }
    if !has_min_chars(&row.municipality, MIN_NAME_CHARS) {
        return Err(RowRejection::TooShort {
            field: "municipality",
            value: row.municipality,
        });
    }
    if !has_min_chars(&row.name, MIN_NAME_CHARS) {
        return Err(RowRejection::TooShort {
            field: "name",
            value: row.name,
        });
    }
    let Some(&country_id) = country_ids.get(&row.country_code) else {
        return Err(RowRejection::UnknownCountry(row.country_code));
    };
    if !seen.insert(row.iata_code.clone()) {
        return Err(RowRejection::Duplicate(row.iata_code));
    }

    Ok(airports::ActiveModel {
        id: NotSet,
        iata_code: Set(row.iata_code),
        country_id: Set(country_id),
        municipality: Set(row.municipality),
        name: Set(row.name),
    })
}

fn reject(dataset: Dataset, line: u64, reason: &RowRejection) {
    debug!("Dropping {} row at line {}: {}", dataset, line, reason);
}

const fn summarize(rows_read: usize, imported: usize) -> ImportReport {
    ImportReport {
        rows_read,
        imported,
        dropped: rows_read.saturating_sub(imported),
    }
}
