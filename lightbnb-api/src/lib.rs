//! # LightBnB API Server Library
//!
//! HTTP surface over the LightBnB data layer.
//!
//! ## Modules
//!
//! - `app`: Application state, session layer and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
