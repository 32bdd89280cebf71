use crate::support::pagination::PageRequest;

#[derive(Debug, Clone)]
pub struct CreateProjectDto {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectDto {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetProjectDto {
    /// Substring match on the project name
    pub search: Option<String>,
    pub page: PageRequest,
}
