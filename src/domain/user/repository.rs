use async_trait::async_trait;

use super::{GetUserDto, NewUser, User, UserChanges};
use crate::support::errors::AppResult;
use crate::support::pagination::PaginatedResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert the user and its profile together; both rows or neither.
    async fn create_user(&self, user: NewUser, avatar: Option<String>) -> AppResult<User>;

    async fn list_users(&self, dto: GetUserDto) -> AppResult<PaginatedResult<User>>;
    async fn get_user_by_id(&self, id: i32) -> AppResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn user_exists(&self, id: i32) -> AppResult<bool>;

    /// Apply `changes` and, when `avatar` is set, replace the profile avatar
    /// (creating the profile if missing). Returns `None` for an unknown id.
    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
        avatar: Option<String>,
    ) -> AppResult<Option<User>>;

    async fn delete_user(&self, id: i32) -> AppResult<()>;
}
