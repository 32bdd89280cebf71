use chrono::{DateTime, Utc};

use crate::domain::task::TaskWithRelations;

#[derive(Clone, Debug)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project together with every task that belongs to it.
#[derive(Clone, Debug)]
pub struct ProjectWithTasks {
    pub project: Project,
    pub tasks: Vec<TaskWithRelations>,
}
