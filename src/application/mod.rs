//! Application layer: use-case services over the domain ports.
//!
//! HTTP handlers stay thin and delegate here.

pub mod projects;
pub mod tasks;
pub mod users;

pub mod rules;

pub use projects::ProjectService;
pub use tasks::TaskService;
pub use users::UserService;
