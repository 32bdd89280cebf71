//! Task aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateTaskDto, GetTaskDto, UpdateTaskDto};
pub use model::{Task, TaskWithRelations};
pub use repository::TaskRepositoryInterface;
