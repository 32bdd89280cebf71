//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ProjectService, TaskService, UserService};
use crate::config::AppConfig;
use crate::domain::MediaStorage;
use crate::infrastructure::crypto::{BcryptHasher, PasswordHasher};
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::media::LocalMediaStorage;
use crate::interfaces::http::common::{ApiResponse, MediaContext};

use super::modules::{health, projects, tasks, users};

/// Unified state for every route. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub users: users::UserHandlerState,
    pub projects: projects::ProjectHandlerState,
    pub tasks: tasks::TaskHandlerState,
    pub health: health::HealthState,
    pub media: MediaContext,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.users.clone()
    }
}

impl FromRef<ApiState> for projects::ProjectHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.projects.clone()
    }
}

impl FromRef<ApiState> for tasks::TaskHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.tasks.clone()
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

impl FromRef<ApiState> for MediaContext {
    fn from_ref(s: &ApiState) -> Self {
        s.media.clone()
    }
}

impl ApiState {
    /// Wire repositories, the password hasher and media storage into the
    /// services behind each route group.
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let repos = SeaOrmRepositoryProvider::new(db.clone());
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(
            config.media.root.clone(),
            config.media.url_prefix.clone(),
        ));
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptHasher::new(config.security.password_hash_cost));

        let user_service = UserService::new(repos.users(), hasher, Arc::clone(&media));
        let project_service = ProjectService::new(repos.projects(), repos.tasks());
        let task_service = TaskService::new(repos.tasks(), repos.projects(), repos.users());

        Self {
            users: users::UserHandlerState {
                user_service: Arc::new(user_service),
            },
            projects: projects::ProjectHandlerState {
                project_service: Arc::new(project_service),
            },
            tasks: tasks::TaskHandlerState {
                task_service: Arc::new(task_service),
            },
            health: health::HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
            media: MediaContext {
                storage: media,
                public_url: config.server.public_url.clone(),
            },
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::replace_user,
        users::update_user,
        users::delete_user,
        // Projects
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::replace_project,
        projects::update_project,
        projects::delete_project,
        // Tasks
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::replace_task,
        tasks::update_task,
        tasks::delete_task,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            projects::ProjectDto,
            projects::CreateProjectRequest,
            projects::UpdateProjectRequest,
            tasks::TaskDto,
            tasks::RelatedRef,
            tasks::CreateTaskRequest,
            tasks::UpdateTaskRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Users", description = "Accounts with profile avatars; create and update accept multipart uploads"),
        (name = "Projects", description = "Projects with their nested, read-only task list"),
        (name = "Tasks", description = "Tasks; project and assignee are written as ids and read as names"),
    ),
    info(
        title = "Taskboard API",
        version = "1.0.0",
        description = "REST API for users, projects and tasks",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, config: &AppConfig) -> Router {
    let state = ApiState::new(db, config);

    let user_routes: Router<ApiState> = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::replace_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        );

    let project_routes: Router<ApiState> = Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::replace_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        );

    let task_routes: Router<ApiState> = Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::replace_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/projects", project_routes)
        .nest("/api/v1/tasks", task_routes)
        .nest_service(&config.media.mount_path(), ServeDir::new(&config.media.root))
        .layer(DefaultBodyLimit::max(config.media.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
