/// Property model and database operations
///
/// A property is a rentable listing owned by exactly one user. Nightly cost
/// is stored in cents.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE properties (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     thumbnail_photo_url VARCHAR(512) NOT NULL DEFAULT '',
///     cover_photo_url VARCHAR(512) NOT NULL DEFAULT '',
///     cost_per_night BIGINT NOT NULL DEFAULT 0 CHECK (cost_per_night >= 0),
///     parking_spaces INTEGER NOT NULL DEFAULT 0 CHECK (parking_spaces >= 0),
///     number_of_bathrooms INTEGER NOT NULL DEFAULT 0 CHECK (number_of_bathrooms >= 0),
///     number_of_bedrooms INTEGER NOT NULL DEFAULT 0 CHECK (number_of_bedrooms >= 0),
///     country VARCHAR(255) NOT NULL,
///     street VARCHAR(255) NOT NULL,
///     city VARCHAR(255) NOT NULL,
///     province VARCHAR(255) NOT NULL,
///     post_code VARCHAR(255) NOT NULL,
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use lightbnb_shared::models::property::Property;
/// use lightbnb_shared::models::property_filter::{PropertyFilter, DEFAULT_LIMIT};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let filter = PropertyFilter {
///     city: Some("vancouver".to_string()),
///     max_cost_per_night: Some(20_000),
///     ..Default::default()
/// };
///
/// for listing in Property::search(&pool, &filter, DEFAULT_LIMIT).await? {
///     println!("{} ({:?})", listing.property.title, listing.average_rating);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::property_filter::{PropertyFilter, SearchParam};
use crate::db::query_failed;

/// Column list for selecting a full property row
pub(crate) const PROPERTY_COLUMNS: &str = "properties.id, properties.owner_id, properties.title, \
    properties.description, properties.thumbnail_photo_url, properties.cover_photo_url, \
    properties.cost_per_night, properties.parking_spaces, properties.number_of_bathrooms, \
    properties.number_of_bedrooms, properties.country, properties.street, properties.city, \
    properties.province, properties.post_code, properties.active, properties.created_at";

/// A rentable property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,

    /// Nightly cost in cents
    pub cost_per_night: i64,

    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,

    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,

    /// Whether the property is currently listed
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

/// A property together with its average review rating
///
/// `average_rating` is `None` when the property has no reviews.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub property: Property,

    pub average_rating: Option<f64>,
}

/// Input for creating a new property
///
/// Counts default to zero and photo URLs to empty when built with
/// `..Default::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProperty {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,

    /// Nightly cost in cents
    pub cost_per_night: i64,

    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,

    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl Property {
    /// Creates a new property
    ///
    /// # Errors
    ///
    /// Returns an error if `owner_id` doesn't reference a user (foreign key),
    /// a count or the cost is negative (check constraints), or the database
    /// is unreachable.
    pub async fn create(pool: &PgPool, data: CreateProperty) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        );

        let property = sqlx::query_as::<_, Property>(&query)
            .bind(data.owner_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.thumbnail_photo_url)
            .bind(data.cover_photo_url)
            .bind(data.cost_per_night)
            .bind(data.parking_spaces)
            .bind(data.number_of_bathrooms)
            .bind(data.number_of_bedrooms)
            .bind(data.country)
            .bind(data.street)
            .bind(data.city)
            .bind(data.province)
            .bind(data.post_code)
            .fetch_one(pool)
            .await
            .map_err(query_failed("property.create"))?;

        Ok(property)
    }

    /// Finds a property by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM properties WHERE properties.id = $1", PROPERTY_COLUMNS);

        let property = sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(query_failed("property.find_by_id"))?;

        Ok(property)
    }

    /// Searches properties matching `filter`
    ///
    /// Results carry their average rating and are ordered by nightly cost,
    /// cheapest first. At most `limit` rows are returned (clamped to
    /// `MAX_SEARCH_LIMIT`). No match yields an empty vector.
    pub async fn search(
        pool: &PgPool,
        filter: &PropertyFilter,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let search = filter.to_query(limit);
        debug!(params = search.params.len(), "Searching properties");

        let mut q = sqlx::query_as::<_, PropertyListing>(&search.sql);
        for param in search.params {
            q = match param {
                SearchParam::Text(text) => q.bind(text),
                SearchParam::Id(id) => q.bind(id),
                SearchParam::Cents(cents) => q.bind(cents),
                SearchParam::Rating(rating) => q.bind(rating),
                SearchParam::Limit(limit) => q.bind(limit),
            };
        }

        let listings = q
            .fetch_all(pool)
            .await
            .map_err(query_failed("property.search"))?;

        Ok(listings)
    }

    /// Deletes a property by ID
    ///
    /// Cascades to its reservations and reviews. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(query_failed("property.delete"))?;

        Ok(result.rows_affected() > 0)
    }
}
