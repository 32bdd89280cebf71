//! # Taskboard
//!
//! Task tracking service: users with profile avatars, projects, and tasks
//! assigned to users.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, write DTOs and repository traits
//! - **application**: Use-case services (validation, password hashing, avatars)
//! - **infrastructure**: SeaORM persistence, bcrypt, local media storage
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Errors, pagination, graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
