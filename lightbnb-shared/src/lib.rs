//! # LightBnB Shared Library
//!
//! Data access for the LightBnB rental booking application: users,
//! properties, reservations and reviews stored in PostgreSQL, plus the
//! authentication helpers the API server builds on.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and schema definition
//! - `models`: Database models and their query functions
//! - `auth`: Password hashing and session tokens

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the LightBnB shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
