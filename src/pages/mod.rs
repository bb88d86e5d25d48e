//! Pages
//!
//! One component per HTML entry point.

mod project_detail;
mod projects;
mod task_detail;
mod user_detail;
mod users;

pub use project_detail::ProjectDetailPage;
pub use projects::ProjectsPage;
pub use task_detail::TaskDetailPage;
pub use user_detail::UserDetailPage;
pub use users::UsersPage;
