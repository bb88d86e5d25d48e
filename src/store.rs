//! Page State Stores
//!
//! One reactive_stores store per page, holding the last fetched entity
//! and the page's view mode.

use leptos::prelude::*;
use reactive_stores::Store;
use taskboard_core::models::{Project, Task, UserProfile, UserRef};
use taskboard_core::page::ViewMode;

/// Index page: the signed-in user's projects
#[derive(Clone, Debug, Default, Store)]
pub struct ProjectsState {
    pub projects: Vec<Project>,
    pub signed_in: bool,
    pub loading: bool,
}

#[derive(Clone, Debug, Default, Store)]
pub struct ProjectState {
    pub project: Option<Project>,
    pub mode: ViewMode,
}

#[derive(Clone, Debug, Default, Store)]
pub struct TaskState {
    pub task: Option<Task>,
    pub mode: ViewMode,
}

#[derive(Clone, Debug, Default, Store)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub mode: ViewMode,
}

#[derive(Clone, Debug, Default, Store)]
pub struct UsersState {
    pub users: Vec<UserRef>,
    pub mode: ViewMode,
}

pub type ProjectsStore = Store<ProjectsState>;
pub type ProjectStore = Store<ProjectState>;
pub type TaskStore = Store<TaskState>;
pub type ProfileStore = Store<ProfileState>;
pub type UsersStore = Store<UsersState>;

// ========================
// Store Helper Functions
// ========================

/// Show a freshly fetched or saved project
pub fn store_set_project(store: &ProjectStore, project: Project) {
    store.project().set(Some(project));
    store.mode().set(ViewMode::Viewing);
}

pub fn store_set_task(store: &TaskStore, task: Task) {
    store.task().set(Some(task));
    store.mode().set(ViewMode::Viewing);
}

pub fn store_set_profile(store: &ProfileStore, profile: UserProfile) {
    store.profile().set(Some(profile));
    store.mode().set(ViewMode::Viewing);
}

/// Add a created project to the index list
pub fn store_add_project(store: &ProjectsStore, project: Project) {
    store.projects().write().push(project);
}

pub fn use_projects_store() -> ProjectsStore {
    expect_context::<ProjectsStore>()
}

pub fn use_project_store() -> ProjectStore {
    expect_context::<ProjectStore>()
}

pub fn use_task_store() -> TaskStore {
    expect_context::<TaskStore>()
}

pub fn use_profile_store() -> ProfileStore {
    expect_context::<ProfileStore>()
}
