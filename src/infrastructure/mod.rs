//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod media;

pub use database::{init_database, DatabaseConfig};
