/// Property review model
///
/// Guests rate a property 1 to 5 after a reservation. Ratings feed the
/// `min_rating` search filter and the average shown with listings and
/// reservations.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE property_reviews (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     guest_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
///     reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
///     rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
///     message TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::query_failed;

/// A guest's review of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyReview {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub property_id: Uuid,
    pub reservation_id: Uuid,

    /// 1 to 5
    pub rating: i16,

    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyReview {
    pub guest_id: Uuid,
    pub property_id: Uuid,
    pub reservation_id: Uuid,
    pub rating: i16,
    pub message: Option<String>,
}

impl PropertyReview {
    /// Creates a review
    ///
    /// # Errors
    ///
    /// Returns an error if the rating is outside 1..=5 or a referenced row
    /// doesn't exist.
    pub async fn create(pool: &PgPool, data: CreatePropertyReview) -> Result<Self, sqlx::Error> {
        let review = sqlx::query_as::<_, PropertyReview>(
            r#"
            INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, guest_id, property_id, reservation_id, rating, message, created_at
            "#,
        )
        .bind(data.guest_id)
        .bind(data.property_id)
        .bind(data.reservation_id)
        .bind(data.rating)
        .bind(data.message)
        .fetch_one(pool)
        .await
        .map_err(query_failed("review.create"))?;

        Ok(review)
    }

    /// Average rating of a property, `None` if it has no reviews
    pub async fn average_rating(pool: &PgPool, property_id: Uuid) -> Result<Option<f64>, sqlx::Error> {
        let (average,): (Option<f64>,) = sqlx::query_as(
            "SELECT avg(rating)::float8 FROM property_reviews WHERE property_id = $1",
        )
        .bind(property_id)
        .fetch_one(pool)
        .await
        .map_err(query_failed("review.average_rating"))?;

        Ok(average)
    }
}
