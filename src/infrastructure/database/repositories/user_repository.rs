use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::{
    AppError, AppResult, DomainError, GetUserDto, NewUser, Profile, User, UserChanges,
    UserRepositoryInterface,
};
use crate::infrastructure::database::entities::{profile, user};
use crate::support::pagination::PaginatedResult;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn profile_model_to_domain(model: profile::Model) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        avatar: model.avatar,
    }
}

fn user_model_to_domain(model: user::Model, profile: Option<profile::Model>) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        date_joined: model.date_joined,
        profile: profile.map(profile_model_to_domain),
    }
}

fn write_err(e: DbErr) -> AppError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict("Username already exists".to_string()).into()
    } else {
        e.into()
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, new_user: NewUser, avatar: Option<String>) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let user = user::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(new_user.password_hash),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(write_err)?;

        let profile = profile::ActiveModel {
            user_id: Set(user.id),
            avatar: Set(avatar),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(user_model_to_domain(user, Some(profile)))
    }

    async fn list_users(&self, dto: GetUserDto) -> AppResult<PaginatedResult<User>> {
        let mut query = user::Entity::find();

        // Apply search filter (username or email)
        if let Some(ref search) = dto.search {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Username.contains(search.as_str()))
                    .add(user::Column::Email.contains(search.as_str())),
            );
        }

        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_asc(user::Column::Id)
            .offset(dto.page.offset())
            .limit(dto.page.limit as u64)
            .find_also_related(profile::Entity)
            .all(&self.db)
            .await?;

        let items: Vec<User> = rows
            .into_iter()
            .map(|(user, profile)| user_model_to_domain(user, profile))
            .collect();

        Ok(PaginatedResult::new(items, total, dto.page.page, dto.page.limit))
    }

    async fn get_user_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let row = user::Entity::find_by_id(id)
            .find_also_related(profile::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(user, profile)| user_model_to_domain(user, profile)))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .find_also_related(profile::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(user, profile)| user_model_to_domain(user, profile)))
    }

    async fn user_exists(&self, id: i32) -> AppResult<bool> {
        let count = user::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
        avatar: Option<String>,
    ) -> AppResult<Option<User>> {
        let txn = self.db.begin().await?;

        let Some(existing) = user::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.clone().into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }

        let user = if active.is_changed() {
            active.update(&txn).await.map_err(write_err)?
        } else {
            existing
        };

        let mut profile = profile::Entity::find()
            .filter(profile::Column::UserId.eq(id))
            .one(&txn)
            .await?;

        if let Some(avatar) = avatar {
            let saved = match profile {
                Some(current) => {
                    let mut active: profile::ActiveModel = current.into();
                    active.avatar = Set(Some(avatar));
                    active.update(&txn).await?
                }
                // accounts created before profiles existed
                None => {
                    profile::ActiveModel {
                        user_id: Set(id),
                        avatar: Set(Some(avatar)),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                }
            };
            profile = Some(saved);
        }

        txn.commit().await?;

        Ok(Some(user_model_to_domain(user, profile)))
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id).into());
        }

        Ok(())
    }
}
