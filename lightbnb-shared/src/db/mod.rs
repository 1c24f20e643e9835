/// Database layer for LightBnB
///
/// This module provides the connection pool and the schema the models run against.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `schema`: Embedded DDL for users, properties, reservations and reviews
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use lightbnb_shared::db::pool::{create_pool, DatabaseConfig};
/// use lightbnb_shared::db::schema::apply_schema;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     apply_schema(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;

/// Logs a failed query and hands the error back for propagation.
///
/// Used as `.map_err(query_failed("user.find_by_email"))` so every data
/// operation reports driver rejections the same way.
pub(crate) fn query_failed(operation: &'static str) -> impl Fn(sqlx::Error) -> sqlx::Error {
    move |err| {
        tracing::error!(operation, error = %err, "Query failed");
        err
    }
}
