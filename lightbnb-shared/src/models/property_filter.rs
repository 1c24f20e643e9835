/// Property search filters
///
/// Builds the parameterized statement behind [`Property::search`]. Each
/// filter that is present contributes exactly one predicate and one
/// positional parameter, in a fixed order:
///
/// | Filter                | Clause   | Parameter               |
/// |-----------------------|----------|-------------------------|
/// | `city`                | `WHERE`  | `%city%` (ILIKE)        |
/// | `owner_id`            | `WHERE`  | owner UUID              |
/// | `min_cost_per_night`  | `WHERE`  | cents, inclusive        |
/// | `max_cost_per_night`  | `WHERE`  | cents, inclusive        |
/// | `min_rating`          | `HAVING` | average rating, inclusive |
/// | (always)              | `LIMIT`  | row limit               |
///
/// Row predicates are joined with `AND` under a single `WHERE`. The rating
/// filter compares an aggregate, so it lands in `HAVING` after the
/// `GROUP BY`. `LIMIT` is always the last parameter.
///
/// # Example
///
/// ```
/// use lightbnb_shared::models::property_filter::{PropertyFilter, SearchParam};
///
/// let filter = PropertyFilter {
///     city: Some("Vancouver".to_string()),
///     min_rating: Some(4.0),
///     ..Default::default()
/// };
///
/// let query = filter.to_query(10);
/// assert!(query.sql.contains("WHERE properties.city ILIKE $1"));
/// assert!(query.sql.contains(">= $2"));
/// assert!(query.sql.ends_with("LIMIT $3"));
/// assert_eq!(query.params.last(), Some(&SearchParam::Limit(10)));
/// ```
///
/// [`Property::search`]: crate::models::property::Property::search

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::property::PROPERTY_COLUMNS;

/// Row limit used when the caller doesn't give one
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on rows returned by a single search
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Optional filters for property search
///
/// All fields are optional; an empty filter matches every property.
/// Prices are in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the city name
    pub city: Option<String>,

    /// Only properties owned by this user
    pub owner_id: Option<Uuid>,

    /// Minimum nightly cost in cents (inclusive)
    pub min_cost_per_night: Option<i64>,

    /// Maximum nightly cost in cents (inclusive)
    pub max_cost_per_night: Option<i64>,

    /// Minimum average review rating (inclusive)
    ///
    /// Properties without reviews have no average and never match.
    pub min_rating: Option<f64>,
}

/// A positional parameter of a search statement
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParam {
    /// LIKE pattern, already wrapped in `%` and escaped
    Text(String),

    /// Owner ID
    Id(Uuid),

    /// Amount in cents
    Cents(i64),

    /// Average rating bound
    Rating(f64),

    /// Row limit
    Limit(i64),
}

/// A search statement and its parameters, in `$1..$n` order
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<SearchParam>,
}

impl PropertyFilter {
    /// Returns true if no filter is set
    pub fn is_empty(&self) -> bool {
        self.city_pattern().is_none()
            && self.owner_id.is_none()
            && self.min_cost_per_night.is_none()
            && self.max_cost_per_night.is_none()
            && self.min_rating.is_none()
    }

    /// Builds the search statement for this filter
    ///
    /// `limit` is clamped to `0..=MAX_SEARCH_LIMIT`.
    pub fn to_query(&self, limit: i64) -> SearchQuery {
        let mut params = Vec::new();
        let mut predicates: Vec<String> = Vec::new();
        let mut bind_count = 0;

        if let Some(pattern) = self.city_pattern() {
            bind_count += 1;
            predicates.push(format!("properties.city ILIKE ${}", bind_count));
            params.push(SearchParam::Text(pattern));
        }
        if let Some(owner_id) = self.owner_id {
            bind_count += 1;
            predicates.push(format!("properties.owner_id = ${}", bind_count));
            params.push(SearchParam::Id(owner_id));
        }
        if let Some(min_cost) = self.min_cost_per_night {
            bind_count += 1;
            predicates.push(format!("properties.cost_per_night >= ${}", bind_count));
            params.push(SearchParam::Cents(min_cost));
        }
        if let Some(max_cost) = self.max_cost_per_night {
            bind_count += 1;
            predicates.push(format!("properties.cost_per_night <= ${}", bind_count));
            params.push(SearchParam::Cents(max_cost));
        }

        let mut sql = format!(
            "SELECT {}, avg(property_reviews.rating)::float8 AS average_rating \
             FROM properties \
             LEFT JOIN property_reviews ON property_reviews.property_id = properties.id",
            PROPERTY_COLUMNS
        );

        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        sql.push_str(" GROUP BY properties.id");

        if let Some(min_rating) = self.min_rating {
            bind_count += 1;
            sql.push_str(&format!(
                " HAVING avg(property_reviews.rating)::float8 >= ${}",
                bind_count
            ));
            params.push(SearchParam::Rating(min_rating));
        }

        bind_count += 1;
        sql.push_str(&format!(
            " ORDER BY properties.cost_per_night, properties.id LIMIT ${}",
            bind_count
        ));
        params.push(SearchParam::Limit(limit.clamp(0, MAX_SEARCH_LIMIT)));

        SearchQuery { sql, params }
    }

    /// The ILIKE pattern for the city filter; blank cities count as absent
    fn city_pattern(&self) -> Option<String> {
        let city = self.city.as_deref()?.trim();
        if city.is_empty() {
            return None;
        }
        Some(format!("%{}%", escape_like(city)))
    }
}

/// Escapes LIKE metacharacters so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
