use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub project_id: i32,
    pub assigned_to_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task plus the display names of the rows it references.
///
/// The names are `None` when the referenced row could not be loaded.
#[derive(Clone, Debug)]
pub struct TaskWithRelations {
    pub task: Task,
    pub assignee_username: Option<String>,
    pub project_name: Option<String>,
}
