//! Users module: account creation and updates, password hashing, avatars.

pub mod service;

pub use service::UserService;
