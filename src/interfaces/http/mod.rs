//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, extractors
//! - `modules`: DTOs and handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
