//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::rules::REQUIRED;
use crate::domain::{CreateUserDto, FieldErrors, GetUserDto, UpdateUserDto, User};
use crate::interfaces::http::common::RequestContext;
use crate::support::pagination::PageRequest;

/// User API representation. The password is never emitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Absolute URL of the profile avatar, `null` when there is none
    pub avatar: Option<String>,
}

impl UserDto {
    pub fn render(user: &User, ctx: &RequestContext) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar().map(|name| ctx.file_url(name)),
        }
    }
}

/// Create user request. Sent as JSON, or as multipart with an `avatar` file part.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub username: Option<String>,
    #[validate(length(max = 254, message = "Ensure this field has no more than 254 characters."))]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
    /// Write-only
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn into_dto(self) -> Result<CreateUserDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.is_none() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_none() {
            errors.add("password", REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateUserDto {
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Update user request; absent fields are left unchanged.
/// A blank `password` keeps the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub username: Option<String>,
    #[validate(length(max = 254, message = "Ensure this field has no more than 254 characters."))]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            password: r.password,
        }
    }
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Search by username or email
    pub search: Option<String>,
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size (1-100, default 50)
    pub limit: Option<u32>,
}

impl From<ListUsersParams> for GetUserDto {
    fn from(p: ListUsersParams) -> Self {
        Self {
            search: p.search.filter(|s| !s.is_empty()),
            page: PageRequest::new(p.page, p.limit),
        }
    }
}
