//! Ranking behaviour of the airport substring search.

use jormungand::db::{DataError, Store};
use jormungand::entities::{airports, countries};
use sea_orm::ActiveValue::{NotSet, Set};

fn country(code: &str, name: &str) -> countries::ActiveModel {
    countries::ActiveModel {
        id: NotSet,
        code: Set(code.to_string()),
        name: Set(name.to_string()),
    }
}

fn airport(iata: &str, country_id: i32, municipality: &str, name: &str) -> airports::ActiveModel {
    airports::ActiveModel {
        id: NotSet,
        iata_code: Set(iata.to_string()),
        country_id: Set(country_id),
        municipality: Set(municipality.to_string()),
        name: Set(name.to_string()),
    }
}

/// Six airports, each matching "aa" through a different field.
async fn ranked_store() -> Store {
    let store = Store::in_memory().await.unwrap();

    store
        .countries()
        .add_many(vec![
            country("AA", "---"),
            country("BB", "aaz"),
            country("ZZ", "zzz"),
        ])
        .await
        .unwrap();

    store
        .airports()
        .add_many(vec![
            airport("ZZZ", 1, "---", "should be 1st match due to country code"),
            airport("AAZ", 2, "---", "should be 2nd match due to IATA code"),
            airport("BBB", 2, "---", "should be 3rd match due to country name"),
            airport("NNN", 3, "aaz", "should be 4th match due to municipality"),
            airport("PPP", 3, "---", "aay should be 5th match due to airport name"),
            airport("TTT", 3, "---", "aaz should be excluded from matches due to limit"),
        ])
        .await
        .unwrap();

    store
}

fn ids(matches: &[jormungand::db::AirportMatch]) -> Vec<i32> {
    matches.iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn test_search_ranks_by_matching_field() {
    let store = ranked_store().await;
    let matches = store.airports().search("AA", 5).await.unwrap();
    assert_eq!(ids(&matches), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let store = ranked_store().await;
    let upper = store.airports().search("AA", 10).await.unwrap();
    let lower = store.airports().search("aa", 10).await.unwrap();

    assert_eq!(ids(&upper), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(upper, lower);
}

#[tokio::test]
async fn test_search_returns_joined_country() {
    let store = ranked_store().await;
    let matches = store.airports().search("municipality", 10).await.unwrap();

    assert_eq!(matches.len(), 1);
    let hit = &matches[0];
    assert_eq!(hit.iata_code, "NNN");
    assert_eq!(hit.country_code, "ZZ");
    assert_eq!(hit.country_name, "zzz");
    assert_eq!(hit.municipality, "aaz");
}

#[tokio::test]
async fn test_search_ties_break_by_id() {
    let store = ranked_store().await;
    let matches = store.airports().search("should", 3).await.unwrap();
    assert_eq!(ids(&matches), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_search_matches_underscore_literally() {
    let store = ranked_store().await;
    let matches = store.airports().search("a_z", 10).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_search_zero_limit_is_empty() {
    let store = ranked_store().await;
    assert!(store.airports().search("AA", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_rejects_malformed_queries() {
    let store = ranked_store().await;
    for query in ["a", "100%", "o'hare", ""] {
        let err = store.airports().search(query, 5).await.unwrap_err();
        assert!(
            matches!(err, DataError::InvalidData { .. }),
            "query {query:?} should be rejected"
        );
    }
}
