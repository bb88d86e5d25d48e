//! Models
//!
//! Data structures matching backend entities. The server owns these
//! records; optional fields default so partial payloads still decode.

use serde::{Deserialize, Serialize};

/// Reference to a user as embedded in projects and tasks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Member,
    Manager,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Member => "member",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "owner" => Role::Owner,
            "member" => Role::Member,
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "Project owner",
            Role::Member => "Member",
            Role::Manager => "Manager",
            Role::Admin => "Administrator",
            Role::Unknown => "Unknown",
        }
    }
}

/// Roles an admin may assign from the profile editor
pub const ASSIGNABLE_ROLES: &[Role] = &[Role::Admin, Role::Owner, Role::Member];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
            TaskStatus::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "blocked" => Some(TaskStatus::Blocked),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task as returned by `/tasks/{id}` and embedded in projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub project_id: Option<u32>,
}

/// Project with members and tasks (`/projects/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dub_date: Option<String>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub members: Vec<UserRef>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Minimal project reference (owned projects on a profile)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u32,
    #[serde(default)]
    pub title: String,
}

/// Full user profile (`/users/me`, `/users/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserRef,
    #[serde(default)]
    pub tasks_count: Option<u32>,
    #[serde(default, alias = "tasks")]
    pub assigned_tasks: Vec<Task>,
    #[serde(default)]
    pub owned_projects: Vec<ProjectRef>,
}

/// `/users/token` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_decodes_with_missing_fields() {
        let project: Project = serde_json::from_str(
            r#"{"id": 3, "title": "Roadmap", "owner": {"id": 1, "first_name": "Ann"}}"#,
        )
        .unwrap();
        assert_eq!(project.owner.as_ref().map(|o| o.id), Some(1));
        assert!(project.members.is_empty());
        assert!(project.tasks.is_empty());
        assert_eq!(project.dub_date, None);
    }

    #[test]
    fn test_unknown_status_and_role_decode() {
        let task: Task = serde_json::from_str(
            r#"{"id": 1, "title": "t", "status": "archived", "priority": "high"}"#,
        )
        .unwrap();
        assert_eq!(task.status, Some(TaskStatus::Unknown));
        assert_eq!(task.priority, Some(TaskPriority::High));

        let user: UserRef = serde_json::from_str(r#"{"id": 2, "email": "x@y.z", "role": "auditor"}"#).unwrap();
        assert_eq!(user.role, Some(Role::Unknown));
    }

    #[test]
    fn test_profile_accepts_tasks_alias() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 7, "email": "a@b.com", "role": "member", "tasks": [{"id": 1, "title": "Fix"}]}"#,
        )
        .unwrap();
        assert_eq!(profile.user.id, 7);
        assert_eq!(profile.assigned_tasks.len(), 1);
        assert_eq!(profile.tasks_count, None);
    }

    #[test]
    fn test_enum_string_forms() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::from_str("blocked"), Some(TaskStatus::Blocked));
        assert_eq!(TaskPriority::from_str("urgent"), None);
        assert_eq!(Role::from_str("admin"), Role::Admin);
    }
}
