//! Form Drafts
//!
//! Raw form input, its client-side validation, and the request bodies it
//! turns into. Validation runs before any request is built.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{Project, Role, Task, TaskPriority, TaskStatus, UserRef};
use crate::view::date_input_value;

pub const TASK_DESCRIPTION_MIN: usize = 10;
pub const TASK_DESCRIPTION_MAX: usize = 500;
pub const TASK_TITLE_MAX: usize = 80;
pub const PROJECT_TITLE_MAX: usize = 50;
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 8;
pub const POSITION_MAX: usize = 50;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Trimmed email, or why it is unusable
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_string())
}

/// `YYYY-MM-DD` from a date input; blank means no date
pub fn parse_date_input(value: &str) -> Result<Option<String>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| Some(date.format("%Y-%m-%d").to_string()))
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

fn check_len(value: &str, field: &'static str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        Err(ValidationError::TooShort { field, min })
    } else if len > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ========================
// Projects
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub dub_date: Option<String>,
}

/// Partial project update; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` clears the due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dub_date: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.dub_date.is_none()
    }
}

/// Create/edit project form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone().unwrap_or_default(),
            due_date: date_input_value(project.dub_date.as_deref()),
        }
    }

    pub fn to_new_project(&self) -> Result<NewProject, ValidationError> {
        let title = required(&self.title, "Title")?;
        check_len(&title, "Title", 1, PROJECT_TITLE_MAX)?;
        Ok(NewProject {
            title,
            description: non_blank(&self.description),
            dub_date: parse_date_input(&self.due_date)?,
        })
    }

    /// Only the fields that differ from `current`
    pub fn diff(&self, current: &Project) -> Result<ProjectPatch, ValidationError> {
        let title = required(&self.title, "Title")?;
        check_len(&title, "Title", 1, PROJECT_TITLE_MAX)?;
        let description = self.description.trim().to_string();
        let due_date = parse_date_input(&self.due_date)?;

        let mut patch = ProjectPatch::default();
        if title != current.title {
            patch.title = Some(title);
        }
        if description != current.description.clone().unwrap_or_default() {
            patch.description = Some(description);
        }
        let current_due = non_blank(&date_input_value(current.dub_date.as_deref()));
        if due_date != current_due {
            patch.dub_date = Some(due_date);
        }
        Ok(patch)
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
    pub assigned_to_email: Option<String>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.title, "Title")?;
        check_len(self.title.trim(), "Title", 1, TASK_TITLE_MAX)?;
        check_len(
            self.description.trim(),
            "Description",
            TASK_DESCRIPTION_MIN,
            TASK_DESCRIPTION_MAX,
        )
    }
}

/// New task form on the project page
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    /// Email of the assignee, blank for none
    pub assignee: String,
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::Medium.as_str().to_string(),
            assignee: String::new(),
            due_date: String::new(),
        }
    }
}

impl TaskForm {
    pub fn to_new_task(&self) -> Result<NewTask, ValidationError> {
        let task = NewTask {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: TaskPriority::from_str(&self.priority).unwrap_or_default(),
            due_date: parse_date_input(&self.due_date)?,
            assigned_to_email: non_blank(&self.assignee),
        };
        task.validate()?;
        Ok(task)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// Edit form on the task page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskEditForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub due_date: String,
}

impl TaskEditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority.unwrap_or_default().as_str().to_string(),
            status: task.status.unwrap_or_default().as_str().to_string(),
            due_date: date_input_value(task.due_date.as_deref()),
        }
    }

    pub fn diff(&self, current: &Task) -> Result<TaskPatch, ValidationError> {
        let title = required(&self.title, "Title")?;
        check_len(&title, "Title", 1, TASK_TITLE_MAX)?;
        let description = self.description.trim().to_string();
        check_len(&description, "Description", TASK_DESCRIPTION_MIN, TASK_DESCRIPTION_MAX)?;
        let due_date = parse_date_input(&self.due_date)?;

        let mut patch = TaskPatch::default();
        if title != current.title {
            patch.title = Some(title);
        }
        if description != current.description {
            patch.description = Some(description);
        }
        if let Some(priority) = TaskPriority::from_str(&self.priority) {
            if Some(priority) != current.priority {
                patch.priority = Some(priority);
            }
        }
        if let Some(status) = TaskStatus::from_str(&self.status) {
            if Some(status) != current.status {
                patch.status = Some(status);
            }
        }
        if due_date != non_blank(&date_input_value(current.due_date.as_deref())) {
            patch.due_date = Some(due_date);
        }
        Ok(patch)
    }
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn to_registration(&self) -> Result<Registration, ValidationError> {
        let first_name = required(&self.first_name, "First name")?;
        check_len(&first_name, "First name", NAME_MIN, NAME_MAX)?;
        let last_name = required(&self.last_name, "Last name")?;
        check_len(&last_name, "Last name", NAME_MIN, NAME_MAX)?;
        let email = validate_email(&self.email)?;
        let position = non_blank(&self.position);
        if let Some(position) = &position {
            check_len(position, "Position", 0, POSITION_MAX)?;
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(ValidationError::TooShort {
                field: "Password",
                min: PASSWORD_MIN,
            });
        }
        Ok(Registration {
            first_name,
            last_name,
            email,
            position,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BasicUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// `PATCH /users/{id}` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPatch {
    pub user: BasicUserUpdate,
    pub user_admin_data: Option<AdminUserUpdate>,
}

/// Profile edit modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub role: String,
}

impl ProfileForm {
    pub fn from_user(user: &UserRef) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            position: user.position.clone().unwrap_or_default(),
            role: user.role.map(|r| r.as_str().to_string()).unwrap_or_default(),
        }
    }

    /// Blank fields are left out; admin fields are only sent by admins
    pub fn to_patch(&self, is_admin: bool) -> Result<UserPatch, ValidationError> {
        let first_name = non_blank(&self.first_name);
        let last_name = non_blank(&self.last_name);
        for (value, field) in [(&first_name, "First name"), (&last_name, "Last name")] {
            if let Some(value) = value {
                check_len(value, field, NAME_MIN, NAME_MAX)?;
            }
        }

        let admin = AdminUserUpdate {
            position: non_blank(&self.position),
            role: non_blank(&self.role).map(|r| Role::from_str(&r)),
        };
        if let Some(position) = &admin.position {
            check_len(position, "Position", 0, POSITION_MAX)?;
        }
        let admin_changed = admin.position.is_some() || admin.role.is_some();

        if first_name.is_none() && last_name.is_none() && !(is_admin && admin_changed) {
            return Err(ValidationError::NothingToUpdate);
        }

        Ok(UserPatch {
            user: BasicUserUpdate { first_name, last_name },
            user_admin_data: (is_admin && admin_changed).then_some(admin),
        })
    }
}
