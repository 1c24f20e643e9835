/// Schema definition
///
/// The DDL for users, properties, reservations and property reviews lives in
/// `sql/schema.sql` and is embedded at compile time. It is written with
/// `IF NOT EXISTS` throughout, so applying it is idempotent. There is no
/// version tracking; changing the schema means editing that file.
///
/// # Example
///
/// ```no_run
/// use lightbnb_shared::db::pool::{create_pool, DatabaseConfig};
/// use lightbnb_shared::db::schema::apply_schema;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_env()?).await?;
/// apply_schema(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{postgres::PgPool, Executor};
use tracing::{debug, info, warn};

use crate::db::query_failed;

/// The full schema DDL
pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Tables created by [`SCHEMA_SQL`], children before parents
///
/// This is the order tables must be dropped in.
pub const TABLES: [&str; 4] = ["property_reviews", "reservations", "properties", "users"];

/// Applies the schema to the database
///
/// Existing tables are left untouched.
///
/// # Errors
///
/// Returns an error if any statement in the DDL fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Applying database schema");

    pool.execute(SCHEMA_SQL)
        .await
        .map_err(query_failed("schema.apply"))?;

    info!("Database schema applied");
    Ok(())
}

/// Drops every LightBnB table and re-creates the schema
///
/// ⚠️  **WARNING**: This permanently deletes all users, properties,
/// reservations and reviews. Development and test databases only.
///
/// # Errors
///
/// Returns an error if a drop or the re-application fails.
pub async fn reset_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    warn!("⚠️  Resetting database schema, all data will be lost");

    for table in TABLES {
        debug!(table, "Dropping table");
        pool.execute(format!("DROP TABLE IF EXISTS {} CASCADE", table).as_str())
            .await
            .map_err(query_failed("schema.reset"))?;
    }

    apply_schema(pool).await
}

/// Returns true if every schema table exists in the `public` schema
pub async fn schema_present(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM information_schema.tables
         WHERE table_schema = 'public'
         AND table_name::text = ANY($1)",
    )
    .bind(TABLES.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    .fetch_one(pool)
    .await
    .map_err(query_failed("schema.present"))?;

    Ok(count as usize == TABLES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_every_table() {
        for table in TABLES {
            let statement = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            assert!(
                SCHEMA_SQL.contains(&statement),
                "schema is missing table {}",
                table
            );
        }
    }

    #[test]
    fn test_schema_cascades_from_parents() {
        assert!(SCHEMA_SQL.contains("owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE"));
        assert!(SCHEMA_SQL.contains("guest_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE"));
        assert!(SCHEMA_SQL
            .contains("property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE"));
    }

    #[test]
    fn test_schema_is_idempotent() {
        // Every CREATE must be guarded so apply_schema can run on every boot.
        for line in SCHEMA_SQL.lines().filter(|l| l.starts_with("CREATE")) {
            assert!(line.contains("IF NOT EXISTS"), "unguarded statement: {}", line);
        }
    }
}
