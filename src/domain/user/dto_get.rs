use crate::support::pagination::PageRequest;

#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    /// Matches username or email
    pub search: Option<String>,
    pub page: PageRequest,
}
