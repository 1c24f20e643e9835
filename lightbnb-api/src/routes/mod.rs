/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: Signup, login, current user
/// - `properties`: Property search and creation
/// - `reservations`: The current user's reservations

pub mod health;
pub mod properties;
pub mod reservations;
pub mod users;
