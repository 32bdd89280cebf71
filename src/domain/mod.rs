//! Domain layer: entities, write DTOs and repository ports.

pub mod media;
pub mod project;
pub mod task;
pub mod user;

pub use media::{MediaStorage, UploadedFile};
pub use project::{
    CreateProjectDto, GetProjectDto, Project, ProjectRepositoryInterface, ProjectWithTasks,
    UpdateProjectDto,
};
pub use task::{
    CreateTaskDto, GetTaskDto, Task, TaskRepositoryInterface, TaskWithRelations, UpdateTaskDto,
};
pub use user::{
    CreateUserDto, GetUserDto, NewUser, Profile, UpdateUserDto, User, UserChanges,
    UserRepositoryInterface,
};

pub use crate::support::errors::{AppError, AppResult, DomainError, FieldErrors};
