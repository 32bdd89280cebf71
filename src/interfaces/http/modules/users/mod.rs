//! Users module: accounts with profile avatars

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
