//! User aggregate
//!
//! Contains the User entity with its Profile, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

// Re-export model types
pub use model::{Profile, User};

// Re-export DTOs
pub use dto_create::{CreateUserDto, NewUser};
pub use dto_get::GetUserDto;
pub use dto_update::{UpdateUserDto, UserChanges};

// Re-export repository trait
pub use repository::UserRepositoryInterface;
