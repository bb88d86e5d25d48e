//! View Models
//!
//! Pure entity -> display transforms. Components only bind these to DOM.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{Project, ProjectRef, Role, Task, TaskPriority, TaskStatus, UserProfile, UserRef};
use crate::session::AuthIdentity;

pub const NO_DESCRIPTION: &str = "No description.";
pub const NOT_SET: &str = "Not set";
pub const UNASSIGNED: &str = "— Unassigned —";
pub const EMPTY_CELL: &str = "—";
pub const OWNER_TAG: &str = "Owner";

// ========================
// Names & Dates
// ========================

/// "Ann L." style short name, falling back to the email
pub fn display_name(user: &UserRef) -> String {
    let first = user.first_name.as_deref().map(str::trim).unwrap_or_default();
    let last = user.last_name.as_deref().map(str::trim).unwrap_or_default();
    match (first.is_empty(), last.chars().next()) {
        (false, Some(initial)) => format!("{} {}.", first, initial.to_uppercase()),
        (false, None) => first.to_string(),
        (true, _) if !user.email.is_empty() => user.email.clone(),
        (true, _) => format!("User #{}", user.id),
    }
}

pub fn full_name(user: &UserRef) -> String {
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        display_name(user)
    } else {
        name
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// `31.12.2025`; unparseable values are shown as sent
pub fn format_date(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    Some(match parse_date(raw) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    })
}

/// Value for an `<input type="date">`, empty when unset or unparseable
pub fn date_input_value(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ========================
// Badges
// ========================

pub fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "Low",
        TaskPriority::Medium => "Medium",
        TaskPriority::High => "High",
    }
}

pub fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "priority priority-low",
        TaskPriority::Medium => "priority priority-medium",
        TaskPriority::High => "priority priority-high",
    }
}

pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To do",
        TaskStatus::InProgress => "In progress",
        TaskStatus::Blocked => "Blocked",
        TaskStatus::Done => "Done",
        TaskStatus::Unknown => "Unknown",
    }
}

pub fn role_label(role: Option<Role>) -> &'static str {
    role.map(|r| r.label()).unwrap_or(EMPTY_CELL)
}

// ========================
// Projects
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub is_owner: bool,
}

impl MemberEntry {
    pub fn tag(&self) -> Option<&'static str> {
        self.is_owner.then_some(OWNER_TAG)
    }

    /// The owner cannot be removed from their own project
    pub fn removable(&self) -> bool {
        !self.is_owner
    }
}

/// Owner plus members, de-duplicated by id, sorted by first name or email
pub fn member_entries(project: &Project) -> Vec<MemberEntry> {
    let owner_id = project.owner.as_ref().map(|o| o.id);
    let mut seen = Vec::new();
    let mut users: Vec<&UserRef> = Vec::new();
    for user in project.owner.iter().chain(project.members.iter()) {
        if !seen.contains(&user.id) {
            seen.push(user.id);
            users.push(user);
        }
    }
    users.sort_by_key(|u| {
        u.first_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(u.email.as_str())
            .to_lowercase()
    });
    users
        .into_iter()
        .map(|u| MemberEntry {
            id: u.id,
            name: display_name(u),
            email: u.email.clone(),
            is_owner: Some(u.id) == owner_id,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Assignee `<select>` options; the value is the member's email
pub fn assignee_options(project: &Project) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: String::new(),
        label: UNASSIGNED.to_string(),
    }];
    options.extend(
        member_entries(project)
            .into_iter()
            .filter(|m| !m.email.is_empty())
            .map(|m| SelectOption {
                label: format!("{} ({})", m.name, m.email),
                value: m.email,
            }),
    );
    options
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub due: String,
    pub owner: String,
}

impl ProjectCard {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            due: format_date(project.dub_date.as_deref()).unwrap_or_else(|| NOT_SET.to_string()),
            owner: project
                .owner
                .as_ref()
                .map(display_name)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub card: ProjectCard,
    pub members: Vec<MemberEntry>,
    pub tasks: Vec<TaskRow>,
}

impl ProjectView {
    pub fn from_project(project: &Project) -> Self {
        Self {
            card: ProjectCard::from_project(project),
            members: member_entries(project),
            tasks: project.tasks.iter().map(TaskRow::from_task).collect(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: u32,
    pub title: String,
    pub priority: &'static str,
    pub priority_class: &'static str,
    pub status: &'static str,
    pub created: String,
    pub due: String,
    pub assignee: String,
}

impl TaskRow {
    pub fn from_task(task: &Task) -> Self {
        let priority = task.priority.unwrap_or_default();
        Self {
            id: task.id,
            title: task.title.clone(),
            priority: priority_label(priority),
            priority_class: priority_class(priority),
            status: status_label(task.status.unwrap_or_default()),
            created: format_date(task.created_at.as_deref()).unwrap_or_else(|| EMPTY_CELL.to_string()),
            due: format_date(task.due_date.as_deref()).unwrap_or_else(|| NOT_SET.to_string()),
            assignee: task
                .assigned_to
                .as_ref()
                .map(display_name)
                .unwrap_or_else(|| "Unassigned".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub row: TaskRow,
    pub description: String,
    pub author: String,
    pub project_id: Option<u32>,
}

impl TaskView {
    pub fn from_task(task: &Task) -> Self {
        Self {
            row: TaskRow::from_task(task),
            description: if task.description.trim().is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                task.description.clone()
            },
            author: task
                .author
                .as_ref()
                .map(display_name)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            project_id: task.project_id,
        }
    }
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub position: String,
    pub active: bool,
    pub task_count: usize,
    pub owned_projects: Vec<ProjectRef>,
    pub tasks: Vec<TaskRow>,
}

impl ProfileView {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let user = &profile.user;
        Self {
            id: user.id,
            name: full_name(user),
            email: user.email.clone(),
            role: role_label(user.role),
            position: user
                .position
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            active: user.is_active.unwrap_or(true),
            task_count: profile
                .tasks_count
                .map(|n| n as usize)
                .unwrap_or(profile.assigned_tasks.len()),
            owned_projects: profile.owned_projects.clone(),
            tasks: profile.assigned_tasks.iter().map(TaskRow::from_task).collect(),
        }
    }
}

/// Users may edit their own profile; admins may edit anyone's
pub fn can_edit_profile(viewer: &AuthIdentity, profile_id: u32) -> bool {
    viewer.is_admin() || viewer.id == Some(profile_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub position: String,
}

impl UserRow {
    pub fn from_user(user: &UserRef) -> Self {
        Self {
            id: user.id,
            name: full_name(user),
            email: user.email.clone(),
            role: role_label(user.role),
            position: user
                .position
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: u32, first: Option<&str>, last: Option<&str>, email: &str) -> UserRef {
        UserRef {
            id,
            email: email.to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            ..UserRef::default()
        }
    }

    #[test]
    fn test_owner_only_project_has_single_entry() {
        let project: Project = serde_json::from_value(json!({
            "id": 1, "title": "Solo", "members": [],
            "owner": {"id": 1, "first_name": "Ann"}
        }))
        .unwrap();

        let members = member_entries(&project);

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Ann");
        assert_eq!(members[0].tag(), Some("Owner"));
        assert!(!members[0].removable());
    }

    #[test]
    fn test_members_deduplicated_and_sorted() {
        let project = Project {
            id: 1,
            title: "P".into(),
            description: None,
            dub_date: None,
            owner: Some(user(1, Some("zoe"), Some("Ng"), "zoe@x.io")),
            members: vec![
                user(2, None, None, "Bob@x.io"),
                user(1, Some("zoe"), Some("Ng"), "zoe@x.io"),
                user(3, Some("alice"), None, "al@x.io"),
            ],
            tasks: vec![],
        };

        let names: Vec<_> = member_entries(&project).into_iter().map(|m| m.name).collect();

        assert_eq!(names, vec!["alice", "Bob@x.io", "zoe N."]);
    }

    #[test]
    fn test_assignee_options_start_unassigned() {
        let project: Project = serde_json::from_value(json!({
            "id": 1, "title": "P",
            "owner": {"id": 1, "first_name": "Ann", "last_name": "Lee", "email": "ann@x.io"}
        }))
        .unwrap();

        let options = assignee_options(&project);

        assert_eq!(options[0], SelectOption { value: String::new(), label: UNASSIGNED.into() });
        assert_eq!(options[1].value, "ann@x.io");
        assert_eq!(options[1].label, "Ann L. (ann@x.io)");
    }

    #[test]
    fn test_card_fallbacks() {
        let project: Project = serde_json::from_value(json!({"id": 9, "title": "Bare"})).unwrap();
        let card = ProjectCard::from_project(&project);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.due, NOT_SET);
        assert_eq!(card.owner, EMPTY_CELL);
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date(Some("2025-12-31")).as_deref(), Some("31.12.2025"));
        assert_eq!(format_date(Some("2025-01-02T10:30:00.123456")).as_deref(), Some("02.01.2025"));
        assert_eq!(format_date(Some("2025-01-02T10:30:00Z")).as_deref(), Some("02.01.2025"));
        assert_eq!(format_date(Some("soon")).as_deref(), Some("soon"));
        assert_eq!(format_date(None), None);
        assert_eq!(date_input_value(Some("2025-01-02T10:30:00")), "2025-01-02");
        assert_eq!(date_input_value(None), "");
    }

    #[test]
    fn test_task_row_defaults() {
        let task: Task = serde_json::from_value(json!({"id": 3, "title": "Fix"})).unwrap();
        let row = TaskRow::from_task(&task);
        assert_eq!(row.status, "To do");
        assert_eq!(row.priority, "Medium");
        assert_eq!(row.assignee, "Unassigned");
        assert_eq!(row.due, NOT_SET);
    }

    #[test]
    fn test_profile_task_count_prefers_server_value() {
        let mut profile: UserProfile = serde_json::from_value(json!({
            "id": 7, "email": "a@b.com",
            "assigned_tasks": [{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]
        }))
        .unwrap();
        assert_eq!(ProfileView::from_profile(&profile).task_count, 2);

        profile.tasks_count = Some(5);
        assert_eq!(ProfileView::from_profile(&profile).task_count, 5);
    }

    #[test]
    fn test_edit_permission() {
        let me = AuthIdentity { id: Some(7), role: "member".into() };
        assert!(can_edit_profile(&me, 7));
        assert!(!can_edit_profile(&me, 8));

        let admin = AuthIdentity { id: Some(1), role: "admin".into() };
        assert!(can_edit_profile(&admin, 8));
        assert!(!can_edit_profile(&AuthIdentity::guest(), 7));
    }

    #[test]
    fn test_user_row_position_placeholder() {
        let row = UserRow::from_user(&user(4, Some("Ann"), Some("Lee"), "ann@x.io"));
        assert_eq!(row.name, "Ann Lee");
        assert_eq!(row.position, EMPTY_CELL);
        assert_eq!(row.role, EMPTY_CELL);
    }
}
