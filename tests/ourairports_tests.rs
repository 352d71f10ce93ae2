//! OurAirports import pipeline against the sample datasets in
//! `tests/assets/ourairports`.

use std::path::PathBuf;

use jormungand::config::OurAirportsConfig;
use jormungand::db::{DataError, Store};
use jormungand::entities::user_roles::UserRole;
use jormungand::entities::{airline_companies, users};
use jormungand::services::ourairports::{self, Dataset};
use jormungand::services::{ImportError, ImportReport};
use sea_orm::ActiveValue::{NotSet, Set};

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("assets")
        .join("ourairports")
        .join(name)
}

fn large_only() -> Vec<String> {
    vec!["large_airport".to_string()]
}

async fn store_with_countries() -> Store {
    let store = Store::in_memory().await.unwrap();
    ourairports::import_countries(&store, &asset("countries_sample.csv"))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_import_countries_keeps_valid_rows() {
    let store = Store::in_memory().await.unwrap();
    let report = ourairports::import_countries(&store, &asset("countries_sample.csv"))
        .await
        .unwrap();

    assert_eq!(
        report,
        ImportReport {
            rows_read: 5,
            imported: 2,
            dropped: 3,
        }
    );

    let stored: Vec<(String, String)> = store
        .countries()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.code, c.name))
        .collect();
    assert_eq!(
        stored,
        vec![
            ("AA".to_string(), "valid country a".to_string()),
            ("BB".to_string(), "valid country b".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_import_airports_keeps_valid_large_airports() {
    let store = store_with_countries().await;
    let report =
        ourairports::import_airports(&store, &asset("airports_sample.csv"), &large_only())
            .await
            .unwrap();

    assert_eq!(report.rows_read, 8);
    assert_eq!(report.imported, 2);
    assert_eq!(report.dropped, 6);

    let countries = store.countries().code_to_id_map().await.unwrap();
    let airports = store.airports().get_all().await.unwrap();
    assert_eq!(airports.len(), 2);

    assert_eq!(airports[0].iata_code, "AAA");
    assert_eq!(airports[0].country_id, countries["AA"]);
    assert_eq!(airports[0].municipality, "valid municipality a");
    assert_eq!(airports[0].name, "valid airport a");

    assert_eq!(airports[1].iata_code, "BBB");
    assert_eq!(airports[1].country_id, countries["BB"]);
}

#[tokio::test]
async fn test_accepted_airport_types_are_configurable() {
    let store = store_with_countries().await;
    let types = vec!["large_airport".to_string(), "small_airport".to_string()];
    let report = ourairports::import_airports(&store, &asset("airports_sample.csv"), &types)
        .await
        .unwrap();

    assert_eq!(report.imported, 3);
    let codes: Vec<String> = store
        .airports()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.iata_code)
        .collect();
    assert_eq!(codes, vec!["AAA", "BBB", "CCC"]);
}

#[tokio::test]
async fn test_airports_before_countries_import_nothing() {
    let store = Store::in_memory().await.unwrap();
    let err = ourairports::import_airports(&store, &asset("airports_sample.csv"), &large_only())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::NoValidRows {
            dataset: Dataset::Airports
        }
    ));
    assert_eq!(store.airports().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reimporting_countries_clears_airports() {
    let store = store_with_countries().await;
    ourairports::import_airports(&store, &asset("airports_sample.csv"), &large_only())
        .await
        .unwrap();

    let report = ourairports::import_countries(&store, &asset("countries_sample.csv"))
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(store.countries().count().await.unwrap(), 2);
    assert_eq!(store.airports().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reimporting_referenced_countries_changes_nothing() {
    let store = store_with_countries().await;
    ourairports::import_airports(&store, &asset("airports_sample.csv"), &large_only())
        .await
        .unwrap();

    let owner = store
        .users()
        .add_one(users::ActiveModel {
            id: NotSet,
            user_role: Set(UserRole::AirlineCompany),
            username: Set("aa_air".to_string()),
            password: Set("secret".to_string()),
            email: Set("ops@aa-air.example".to_string()),
            avatar_url: Set(None),
        })
        .await
        .unwrap();
    let country = store.countries().get_by_code("AA").await.unwrap();
    store
        .airline_companies()
        .add_one(airline_companies::ActiveModel {
            id: NotSet,
            user_id: Set(owner.id),
            country_id: Set(country.id),
            name: Set("AA Air".to_string()),
        })
        .await
        .unwrap();

    let err = ourairports::import_countries(&store, &asset("countries_sample.csv"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::Data(DataError::InvalidData { .. })
    ));
    assert_eq!(store.airports().count().await.unwrap(), 2);
    assert_eq!(
        store.countries().get_by_code("AA").await.unwrap(),
        country
    );
}

#[tokio::test]
async fn test_empty_dataset_leaves_table_untouched() {
    let store = store_with_countries().await;
    let err = ourairports::import_countries_from_reader(&store, "code,name\n".as_bytes())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::NoValidRows {
            dataset: Dataset::Countries
        }
    ));
    assert_eq!(store.countries().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_all_invalid_rows_leave_table_untouched() {
    let store = store_with_countries().await;
    let data = "code,name\nxx,lowercase\nYY,y\n";
    let err = ourairports::import_countries_from_reader(&store, data.as_bytes())
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::NoValidRows { .. }));
    assert_eq!(store.countries().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let store = Store::in_memory().await.unwrap();
    let err = ourairports::import_countries(&store, &asset("does_not_exist.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Io { .. }));
}

#[tokio::test]
async fn test_import_all_runs_countries_then_airports() {
    let store = Store::in_memory().await.unwrap();
    let config = OurAirportsConfig {
        countries_csv: asset("countries_sample.csv"),
        airports_csv: asset("airports_sample.csv"),
        accepted_airport_types: large_only(),
    };

    let summary = ourairports::import_all(&store, &config).await.unwrap();

    assert_eq!(summary.countries.imported, 2);
    assert_eq!(summary.airports.imported, 2);

    let matches = store.airports().search("valid", 10).await.unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].country_code, "AA");
    assert_eq!(matches[0].country_name, "valid country a");
}
