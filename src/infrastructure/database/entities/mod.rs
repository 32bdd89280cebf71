//! Database entities module

pub mod profile;
pub mod project;
pub mod task;
pub mod user;

pub use profile::Entity as Profile;
pub use project::Entity as Project;
pub use task::Entity as Task;
pub use user::Entity as User;
