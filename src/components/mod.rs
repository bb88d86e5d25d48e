//! UI Components
//!
//! Reusable Leptos components.

mod add_member_form;
mod auth_forms;
mod delete_confirm_button;
mod edit_user_modal;
mod member_list;
mod new_project_modal;
mod new_task_form;
mod project_edit_form;
mod status_bar;
mod task_edit_form;
mod task_list;

pub use add_member_form::AddMemberForm;
pub use auth_forms::AuthPanel;
pub use delete_confirm_button::{DeleteConfirmButton, DeleteHandle};
pub use edit_user_modal::EditUserModal;
pub use member_list::MemberList;
pub use new_project_modal::NewProjectModal;
pub use new_task_form::NewTaskForm;
pub use project_edit_form::ProjectEditForm;
pub use status_bar::StatusBar;
pub use task_edit_form::TaskEditForm;
pub use task_list::TaskList;
