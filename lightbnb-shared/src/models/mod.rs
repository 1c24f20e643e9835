/// Database models for LightBnB
///
/// Each model owns its query functions. Every function is a single
/// parameterized statement; property search is the only one whose SQL is
/// assembled at runtime (see `property_filter`).
///
/// # Models
///
/// - `user`: Accounts (guests and owners)
/// - `property`: Rentable listings
/// - `property_filter`: Search filters and statement builder
/// - `reservation`: Bookings of a property by a guest
/// - `review`: Guest ratings of properties
///
/// # Example
///
/// ```no_run
/// use lightbnb_shared::models::user::{User, CreateUser};
/// use lightbnb_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_env()?).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Kent Cook".to_string(),
///     email: "kent@example.com".to_string(),
///     password: "$argon2id$...".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod property;
pub mod property_filter;
pub mod reservation;
pub mod review;
pub mod user;
