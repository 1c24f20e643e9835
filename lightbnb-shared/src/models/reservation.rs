/// Reservation model and database operations
///
/// A reservation books one property for one guest over a date range.
/// `end_date` is exclusive of the stay and must fall after `start_date`;
/// the database enforces this with `reservations_dates_ordered`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE reservations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     start_date DATE NOT NULL,
///     end_date DATE NOT NULL,
///     property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
///     guest_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     total_cost BIGINT NOT NULL DEFAULT 0 CHECK (total_cost >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT reservations_dates_ordered CHECK (end_date > start_date)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::query_failed;

/// A booking of a property by a guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: Uuid,
    pub guest_id: Uuid,

    /// Total cost of the stay in cents
    pub total_cost: i64,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: Uuid,
    pub guest_id: Uuid,

    /// Total cost in cents
    pub total_cost: i64,
}

/// A guest's reservation joined with the reserved property
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GuestReservation {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub reservation: Reservation,

    pub title: String,
    pub thumbnail_photo_url: String,

    /// Nightly cost of the property in cents
    pub cost_per_night: i64,

    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub city: String,

    /// Average review rating of the property, `None` if unreviewed
    pub average_rating: Option<f64>,
}

impl Reservation {
    /// Creates a reservation
    ///
    /// # Errors
    ///
    /// Returns an error if the property or guest doesn't exist, the dates
    /// are not ordered, or the cost is negative.
    pub async fn create(pool: &PgPool, data: CreateReservation) -> Result<Self, sqlx::Error> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (start_date, end_date, property_id, guest_id, total_cost)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, start_date, end_date, property_id, guest_id, total_cost, created_at
            "#,
        )
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.property_id)
        .bind(data.guest_id)
        .bind(data.total_cost)
        .fetch_one(pool)
        .await
        .map_err(query_failed("reservation.create"))?;

        Ok(reservation)
    }

    /// Lists a guest's reservations, earliest stay first
    ///
    /// Each row carries the reserved property's details and average rating.
    /// Returns at most `limit` rows; a guest without reservations yields an
    /// empty vector.
    pub async fn list_for_guest(
        pool: &PgPool,
        guest_id: Uuid,
        limit: i64,
    ) -> Result<Vec<GuestReservation>, sqlx::Error> {
        let reservations = sqlx::query_as::<_, GuestReservation>(
            r#"
            SELECT reservations.id, reservations.start_date, reservations.end_date,
                   reservations.property_id, reservations.guest_id, reservations.total_cost,
                   reservations.created_at,
                   properties.title, properties.thumbnail_photo_url, properties.cost_per_night,
                   properties.parking_spaces, properties.number_of_bathrooms,
                   properties.number_of_bedrooms, properties.city,
                   avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON properties.id = reservations.property_id
            LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.max(0))
        .fetch_all(pool)
        .await
        .map_err(query_failed("reservation.list_for_guest"))?;

        Ok(reservations)
    }
}
