//! Projects module: projects with their nested, read-only task list

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
