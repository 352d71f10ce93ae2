use sea_orm::sea_query::{Condition, Expr, LikeExpr, Order, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;
use tracing::debug;

use crate::db::{DataError, DataResult, Repository, Table};
use crate::entities::{airports, countries};
use crate::validation::is_search_query;

/// An airport joined with its country, as returned by [`Repository::search`].
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct AirportMatch {
    pub id: i32,
    pub iata_code: String,
    pub country_code: String,
    pub country_name: String,
    pub municipality: String,
    pub name: String,
}

impl Repository<airports::Entity> {
    pub async fn get_by_iata(&self, iata_code: &str) -> DataResult<airports::Model> {
        airports::Entity::find()
            .filter(airports::Column::IataCode.eq(iata_code))
            .one(&self.conn)
            .await?
            .ok_or_else(|| DataError::not_found(&airports::Entity::table(), iata_code))
    }

    /// Case-insensitive substring search over airports.
    ///
    /// Matches are ranked by the first field that contains `query`, in this
    /// order: country code, IATA code, country name, municipality, airport
    /// name. Rows sharing a rank are ordered by id. At most `limit` rows are
    /// returned.
    pub async fn search(&self, query: &str, limit: u64) -> DataResult<Vec<AirportMatch>> {
        if !is_search_query(query) {
            return Err(DataError::invalid(
                &airports::Entity::table(),
                format!(
                    "search query must be 2 to 64 letters, digits or spaces, got '{query}'"
                ),
            ));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(query));
        let contains = |column: SimpleExpr| -> SimpleExpr {
            Expr::expr(column).like(LikeExpr::new(pattern.clone()).escape('\\'))
        };

        let fields: [SimpleExpr; 5] = [
            Expr::col((countries::Entity, countries::Column::Code)).into(),
            Expr::col((airports::Entity, airports::Column::IataCode)).into(),
            Expr::col((countries::Entity, countries::Column::Name)).into(),
            Expr::col((airports::Entity, airports::Column::Municipality)).into(),
            Expr::col((airports::Entity, airports::Column::Name)).into(),
        ];
        let [code, iata, country_name, municipality, name] = fields.map(contains);

        let rank = Expr::case(code.clone(), 1)
            .case(iata.clone(), 2)
            .case(country_name.clone(), 3)
            .case(municipality.clone(), 4)
            .finally(5);

        let matches = airports::Entity::find()
            .select_only()
            .column(airports::Column::Id)
            .column(airports::Column::IataCode)
            .column_as(countries::Column::Code, "country_code")
            .column_as(countries::Column::Name, "country_name")
            .column(airports::Column::Municipality)
            .column(airports::Column::Name)
            .join(JoinType::InnerJoin, airports::Relation::Countries.def())
            .filter(
                Condition::any()
                    .add(code)
                    .add(iata)
                    .add(country_name)
                    .add(municipality)
                    .add(name),
            )
            .order_by(SimpleExpr::Case(Box::new(rank)), Order::Asc)
            .order_by_asc(airports::Column::Id)
            .limit(limit)
            .into_model::<AirportMatch>()
            .all(&self.conn)
            .await?;

        debug!("Airport search '{}' matched {} rows", query, matches.len());
        Ok(matches)
    }
}

/// Escapes LIKE wildcards so they match literally under `ESCAPE '\'`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
