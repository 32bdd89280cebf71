//! User management service, application-layer orchestration
//!
//! Creation and update rules for accounts live here: password hashing,
//! profile provisioning and avatar storage. HTTP handlers are thin
//! wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::rules::{
    check_email, check_len, check_username, BLANK, NAME_MAX, REQUIRED, USERNAME_TAKEN,
};
use crate::domain::{
    AppError, AppResult, CreateUserDto, DomainError, FieldErrors, GetUserDto, MediaStorage,
    NewUser, UpdateUserDto, UploadedFile, User, UserChanges, UserRepositoryInterface,
};
use crate::infrastructure::crypto::PasswordHasher;
use crate::support::pagination::PaginatedResult;

/// Directory, relative to the media root, that avatars are written to.
pub const AVATAR_DIR: &str = "avatars";

/// User service, generic over `R: UserRepositoryInterface` so it stays
/// decoupled from the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    media: Arc<dyn MediaStorage>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, hasher: Arc<dyn PasswordHasher>, media: Arc<dyn MediaStorage>) -> Self {
        Self { repo, hasher, media }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Create a user and its profile. The password is hashed before it
    /// reaches the repository; the optional avatar is stored first and
    /// removed again if the database write fails.
    pub async fn create_user(
        &self,
        dto: CreateUserDto,
        avatar: Option<UploadedFile>,
    ) -> AppResult<User> {
        let mut errors = FieldErrors::new();
        check_username(&mut errors, &dto.username);
        check_email(&mut errors, &dto.email);
        check_len(&mut errors, "first_name", &dto.first_name, NAME_MAX);
        check_len(&mut errors, "last_name", &dto.last_name, NAME_MAX);
        if dto.password.trim().is_empty() {
            errors.add("password", BLANK);
        }
        errors.into_result()?;

        if self.repo.get_user_by_username(&dto.username).await?.is_some() {
            return Err(username_taken());
        }

        let password_hash = self.hasher.hash(&dto.password)?;
        let stored_avatar = self.store_avatar(avatar).await?;

        let new_user = NewUser {
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password_hash,
        };

        match self.repo.create_user(new_user, stored_avatar.clone()).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "User created");
                Ok(user)
            }
            Err(e) => {
                self.discard_avatar(stored_avatar).await;
                Err(conflict_as_field_error(e))
            }
        }
    }

    /// Apply an update. With `partial == false` (a full replace) the
    /// username must be present. A blank or absent password keeps the
    /// current hash. A new avatar replaces the profile's file reference;
    /// the previous file stays on disk.
    pub async fn update_user(
        &self,
        id: i32,
        dto: UpdateUserDto,
        avatar: Option<UploadedFile>,
        partial: bool,
    ) -> AppResult<User> {
        if !self.repo.user_exists(id).await? {
            return Err(DomainError::not_found("User", id).into());
        }

        let mut errors = FieldErrors::new();
        match dto.username.as_deref() {
            Some(username) => check_username(&mut errors, username),
            None if !partial => errors.add("username", REQUIRED),
            None => {}
        }
        if let Some(email) = dto.email.as_deref() {
            check_email(&mut errors, email);
        }
        if let Some(first_name) = dto.first_name.as_deref() {
            check_len(&mut errors, "first_name", first_name, NAME_MAX);
        }
        if let Some(last_name) = dto.last_name.as_deref() {
            check_len(&mut errors, "last_name", last_name, NAME_MAX);
        }
        errors.into_result()?;

        if let Some(username) = dto.username.as_deref() {
            if let Some(other) = self.repo.get_user_by_username(username).await? {
                if other.id != id {
                    return Err(username_taken());
                }
            }
        }

        let password_hash = match dto.password.as_deref() {
            Some(password) if !password.trim().is_empty() => Some(self.hasher.hash(password)?),
            _ => None,
        };
        let rehashed = password_hash.is_some();

        let changes = UserChanges {
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password_hash,
        };

        let stored_avatar = self.store_avatar(avatar).await?;

        match self.repo.update_user(id, changes, stored_avatar.clone()).await {
            Ok(Some(user)) => {
                info!(user_id = id, password_changed = rehashed, "User updated");
                Ok(user)
            }
            Ok(None) => {
                self.discard_avatar(stored_avatar).await;
                Err(DomainError::not_found("User", id).into())
            }
            Err(e) => {
                self.discard_avatar(stored_avatar).await;
                Err(conflict_as_field_error(e))
            }
        }
    }

    /// Delete a user; its profile and assigned tasks go with it.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repo.delete_user(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, dto: GetUserDto) -> AppResult<PaginatedResult<User>> {
        self.repo.list_users(dto).await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id).into())
    }

    /// Check a plaintext password against the stored hash.
    pub fn check_password(&self, user: &User, password: &str) -> AppResult<bool> {
        Ok(self.hasher.verify(password, &user.password_hash)?)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn store_avatar(&self, avatar: Option<UploadedFile>) -> AppResult<Option<String>> {
        match avatar {
            Some(file) => Ok(Some(self.media.save(AVATAR_DIR, &file).await?)),
            None => Ok(None),
        }
    }

    async fn discard_avatar(&self, stored: Option<String>) {
        let Some(name) = stored else { return };
        if let Err(e) = self.media.delete(&name).await {
            warn!(file = %name, error = %e, "Failed to remove orphaned avatar");
        }
    }
}

fn username_taken() -> AppError {
    DomainError::Validation(FieldErrors::single("username", USERNAME_TAKEN)).into()
}

/// A unique-constraint race surfaces from the repository as a conflict;
/// clients see it as the same field error the pre-check produces.
fn conflict_as_field_error(e: AppError) -> AppError {
    match e {
        AppError::Domain(DomainError::Conflict(_)) => username_taken(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::MigratorTrait;
    use tempfile::TempDir;

    use super::*;
    use crate::infrastructure::crypto::BcryptHasher;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::infrastructure::media::LocalMediaStorage;

    struct Fixture {
        service: UserService<UserRepository>,
        media_root: TempDir,
    }

    async fn fixture() -> Fixture {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let media_root = TempDir::new().unwrap();
        let media = LocalMediaStorage::new(media_root.path(), "/media/");
        let service = UserService::new(
            Arc::new(UserRepository::new(db)),
            Arc::new(BcryptHasher::new(bcrypt::MIN_COST)),
            Arc::new(media),
        );
        Fixture { service, media_root }
    }

    fn alice() -> CreateUserDto {
        CreateUserDto {
            username: "alice".into(),
            email: "a@x.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            password: "secret123".into(),
        }
    }

    fn png() -> UploadedFile {
        UploadedFile {
            file_name: Some("me.png".into()),
            content_type: Some("image/png".into()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn create_hashes_password_and_provisions_profile() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        assert_ne!(user.password_hash, "secret123");
        assert!(f.service.check_password(&user, "secret123").unwrap());
        assert!(!f.service.check_password(&user, "wrong").unwrap());
        assert!(user.profile.is_some());
        assert_eq!(user.avatar(), None);
    }

    #[tokio::test]
    async fn create_stores_avatar_file() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), Some(png())).await.unwrap();

        let avatar = user.avatar().unwrap();
        assert!(avatar.starts_with("avatars/"));
        assert!(avatar.ends_with(".png"));
        assert!(f.media_root.path().join(avatar).exists());
    }

    #[tokio::test]
    async fn create_rejects_blank_password_and_bad_email() {
        let f = fixture().await;
        let dto = CreateUserDto {
            email: "nope".into(),
            password: "".into(),
            ..alice()
        };

        let err = f.service.create_user(dto, None).await.unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert_eq!(fields.get("password"), Some(&[BLANK.to_string()][..]));
        assert!(fields.get("email").is_some());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_field_error_and_leaves_no_file() {
        let f = fixture().await;
        f.service.create_user(alice(), None).await.unwrap();

        let err = f.service.create_user(alice(), Some(png())).await.unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert_eq!(fields.get("username"), Some(&[USERNAME_TAKEN.to_string()][..]));

        let avatars = f.media_root.path().join(AVATAR_DIR);
        let leftover = std::fs::read_dir(&avatars).map(|d| d.count()).unwrap_or(0);
        assert_eq!(leftover, 0);
    }

    #[tokio::test]
    async fn blank_password_on_update_keeps_credential() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        let updated = f
            .service
            .update_user(
                user.id,
                UpdateUserDto {
                    first_name: Some("Alice".into()),
                    password: Some("".into()),
                    ..Default::default()
                },
                None,
                true,
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Alice");
        assert_eq!(updated.password_hash, user.password_hash);
        assert!(f.service.check_password(&updated, "secret123").unwrap());
    }

    #[tokio::test]
    async fn new_password_on_update_is_rehashed() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        let updated = f
            .service
            .update_user(
                user.id,
                UpdateUserDto {
                    password: Some("n3w-secret".into()),
                    ..Default::default()
                },
                None,
                true,
            )
            .await
            .unwrap();

        assert!(f.service.check_password(&updated, "n3w-secret").unwrap());
        assert!(!f.service.check_password(&updated, "secret123").unwrap());
    }

    #[tokio::test]
    async fn update_replaces_avatar() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        let updated = f
            .service
            .update_user(user.id, UpdateUserDto::default(), Some(png()), true)
            .await
            .unwrap();

        assert!(updated.avatar().is_some());
        assert_eq!(updated.username, "alice");
    }

    #[tokio::test]
    async fn full_update_requires_username() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        let err = f
            .service
            .update_user(user.id, UpdateUserDto::default(), None, false)
            .await
            .unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert_eq!(fields.get("username"), Some(&[REQUIRED.to_string()][..]));
    }

    #[tokio::test]
    async fn update_may_keep_own_username() {
        let f = fixture().await;
        let user = f.service.create_user(alice(), None).await.unwrap();

        let updated = f
            .service
            .update_user(
                user.id,
                UpdateUserDto {
                    username: Some("alice".into()),
                    email: Some("alice@x.com".into()),
                    ..Default::default()
                },
                None,
                false,
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "alice@x.com");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = fixture().await;
        let err = f.service.get_user(41).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::NotFound { entity: "User", .. })
        ));

        let err = f
            .service
            .update_user(41, UpdateUserDto::default(), None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
    }
}
