//! Project aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateProjectDto, GetProjectDto, UpdateProjectDto};
pub use model::{Project, ProjectWithTasks};
pub use repository::ProjectRepositoryInterface;
