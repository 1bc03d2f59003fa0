//! # VoltPort Reservation Service
//!
//! Backend for reserving EV charging ports by date and hourly time slot.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities, estimate math and repository traits
//! - **application**: Availability resolution and the booking workflow
//! - **infrastructure**: SeaORM persistence (SQLite) and migrations
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing
//! - **server**: Reusable startup/shutdown runtime

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::create_api_router;
