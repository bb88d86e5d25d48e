//! Page Controllers
//!
//! Page-level state shared by every view:
//! - `ViewMode`: Loading -> Viewing <-> Editing, Viewing -> Removed, Loading -> Failed;
//!   a failed reload keeps whatever was last shown
//! - `DeleteGuard`: two-click delete with an expiring confirmation
//! - `load_page` / `resolve_error`: initial fetch and error routing

use crate::client::ApiClient;
use crate::config::DELETE_CONFIRM_WINDOW_MS;
use crate::error::{ApiError, ValidationError};
use crate::models::{Project, Task, UserProfile, UserRef};
use crate::retry::Sleep;
use crate::routes::Route;
use crate::session::{KeyValueStore, SessionStore};
use crate::transport::Transport;

pub const ACTION_CANCELLED: &str = "Action cancelled.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Loading,
    Viewing,
    Editing,
    Failed(String),
    Removed,
}

impl ViewMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, ViewMode::Editing)
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, ViewMode::Viewing)
    }

    /// Only a viewed entity can be edited
    pub fn begin_edit(&mut self) -> bool {
        if self.is_viewing() {
            *self = ViewMode::Editing;
            true
        } else {
            false
        }
    }

    /// Cancel or successful save
    pub fn end_edit(&mut self) {
        if self.is_editing() {
            *self = ViewMode::Viewing;
        }
    }

    /// A failed load replaces the page only if nothing was loaded yet.
    /// Returns true when the page switched to `Failed`.
    pub fn load_failed(&mut self, message: impl Into<String>) -> bool {
        match self {
            ViewMode::Loading | ViewMode::Failed(_) => {
                *self = ViewMode::Failed(message.into());
                true
            }
            _ => false,
        }
    }
}

// ========================
// Delete confirmation
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteClick {
    /// First click: ask again within the window
    Armed,
    /// Second click inside the window: perform the delete
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteGuard {
    armed_at: Option<u64>,
    window_ms: u64,
    busy: bool,
}

impl Default for DeleteGuard {
    fn default() -> Self {
        Self::new(DELETE_CONFIRM_WINDOW_MS as u64)
    }
}

impl DeleteGuard {
    pub fn new(window_ms: u64) -> Self {
        Self {
            armed_at: None,
            window_ms,
            busy: false,
        }
    }

    fn armed_within(&self, now_ms: u64) -> bool {
        self.armed_at
            .is_some_and(|at| now_ms.saturating_sub(at) < self.window_ms)
    }

    pub fn is_armed(&self, now_ms: u64) -> bool {
        self.armed_within(now_ms)
    }

    /// Controls are disabled while the delete request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// `None` while a delete is already running
    pub fn click(&mut self, now_ms: u64) -> Option<DeleteClick> {
        if self.busy {
            return None;
        }
        if self.armed_within(now_ms) {
            self.armed_at = None;
            self.busy = true;
            Some(DeleteClick::Confirmed)
        } else {
            self.armed_at = Some(now_ms);
            Some(DeleteClick::Armed)
        }
    }

    /// Disarm an expired confirmation; true means "Action cancelled."
    /// should be shown
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.armed_at {
            Some(_) if !self.armed_within(now_ms) => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }

    /// The delete request failed; controls come back
    pub fn failed(&mut self) {
        self.busy = false;
        self.armed_at = None;
    }
}

// ========================
// Loading
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorAction {
    /// Session was cleared; go to the login page
    RedirectToLogin,
    Show(String),
}

/// Route an error: a 401 ends the session, anything else is shown
pub fn resolve_error<K: KeyValueStore>(error: &ApiError, session: &SessionStore<K>) -> ErrorAction {
    if error.is_unauthorized() {
        log::info!("[PAGE] unauthorized, clearing session");
        session.clear_session();
        ErrorAction::RedirectToLogin
    } else {
        ErrorAction::Show(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Projects(Vec<Project>),
    Project(Project),
    Task(Task),
    User(UserProfile),
    Users(Vec<UserRef>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready(PageData),
    RedirectToLogin,
    Failed(String),
}

impl LoadOutcome {
    fn from_result(result: Result<PageData, ApiError>, session: &SessionStore<impl KeyValueStore>) -> Self {
        match result {
            Ok(data) => LoadOutcome::Ready(data),
            Err(e) => match resolve_error(&e, session) {
                ErrorAction::RedirectToLogin => LoadOutcome::RedirectToLogin,
                ErrorAction::Show(message) => LoadOutcome::Failed(message),
            },
        }
    }
}

/// Initial fetch for a page. Without a token nothing is requested.
pub async fn load_page<T, K, S>(client: &ApiClient<T, K, S>, route: Route) -> LoadOutcome
where
    T: Transport,
    K: KeyValueStore,
    S: Sleep,
{
    if !client.session().is_signed_in() {
        return LoadOutcome::RedirectToLogin;
    }
    let result = match route {
        Route::Index => client.list_projects().await.map(PageData::Projects),
        Route::Project(id) => match id {
            Some(id) => client.get_project(id).await.map(PageData::Project),
            None => Err(ValidationError::MissingId("project").into()),
        },
        Route::Task(id) => match id {
            Some(id) => client.get_task(id).await.map(PageData::Task),
            None => Err(ValidationError::MissingId("task").into()),
        },
        Route::User(id) => client.fetch_profile(id).await.map(PageData::User),
        Route::Users => client.list_users().await.map(PageData::Users),
        Route::InvalidId(entity) => Err(ValidationError::InvalidId(entity).into()),
    };
    LoadOutcome::from_result(result, client.session())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use crate::testing::{client, signed_in_storage, MockTransport, RecordingSleep};
    use futures::executor::block_on;

    const PAGES: [Route; 5] = [
        Route::Index,
        Route::Project(Some(1)),
        Route::Task(Some(2)),
        Route::User(Some(7)),
        Route::Users,
    ];

    #[test]
    fn test_401_redirects_every_page() {
        for route in PAGES {
            let transport = MockTransport::default();
            transport.reply(401, r#"{"detail": "Not authenticated"}"#);
            let storage = signed_in_storage();
            let sleeper = RecordingSleep::default();
            let api = client(&transport, &storage, &sleeper);

            let outcome = block_on(load_page(&api, route));

            assert_eq!(outcome, LoadOutcome::RedirectToLogin, "{:?}", route);
            assert!(!api.session().is_signed_in(), "{:?}", route);
            assert_eq!(api.session().session(), None);
            assert_eq!(transport.request_count(), 1);
        }
    }

    #[test]
    fn test_no_token_redirects_without_request() {
        for route in PAGES {
            let transport = MockTransport::default();
            let storage = MemoryStore::default();
            let sleeper = RecordingSleep::default();
            let api = client(&transport, &storage, &sleeper);

            assert_eq!(block_on(load_page(&api, route)), LoadOutcome::RedirectToLogin);
            assert_eq!(transport.request_count(), 0);
        }
    }

    #[test]
    fn test_not_found_and_missing_id() {
        let transport = MockTransport::default();
        transport.reply(404, "");
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        assert_eq!(
            block_on(load_page(&api, Route::Project(Some(5)))),
            LoadOutcome::Failed("Project not found.".into())
        );
        assert_eq!(
            block_on(load_page(&api, Route::Task(None))),
            LoadOutcome::Failed("Missing task id in the address.".into())
        );
        assert!(api.session().is_signed_in());
    }

    #[test]
    fn test_server_detail_is_shown() {
        let transport = MockTransport::default();
        transport.reply(403, r#"{"detail": "Forbidden"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        assert_eq!(
            block_on(load_page(&api, Route::Users)),
            LoadOutcome::Failed("Forbidden".into())
        );
    }

    #[test]
    fn test_delete_confirmed_inside_window() {
        let mut guard = DeleteGuard::default();
        assert_eq!(guard.click(0), Some(DeleteClick::Armed));
        assert_eq!(guard.click(2_999), Some(DeleteClick::Confirmed));
        assert!(guard.is_busy());
        assert_eq!(guard.click(3_100), None);
    }

    #[test]
    fn test_delete_after_window_is_fresh_first_click() {
        let mut guard = DeleteGuard::default();
        assert_eq!(guard.click(0), Some(DeleteClick::Armed));
        assert_eq!(guard.click(3_000), Some(DeleteClick::Armed));
        assert!(guard.is_armed(3_000));
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_expiry_reports_cancellation_once() {
        let mut guard = DeleteGuard::default();
        guard.click(0);
        assert!(!guard.expire(1_000));
        assert!(guard.expire(3_000));
        assert!(!guard.expire(3_001));
        assert!(!guard.is_armed(3_001));
    }

    #[test]
    fn test_stale_expiry_does_not_disarm_new_click() {
        let mut guard = DeleteGuard::default();
        guard.click(0);
        guard.click(1_000);
        guard.failed();
        guard.click(2_000);

        // timer scheduled by the first click
        assert!(!guard.expire(3_000));
        assert!(guard.is_armed(3_000));
    }

    #[test]
    fn test_confirmed_delete_is_not_cancelled_by_timer() {
        let mut guard = DeleteGuard::default();
        guard.click(0);
        guard.click(500);
        assert!(!guard.expire(3_000));
    }

    #[test]
    fn test_view_mode_transitions() {
        let mut mode = ViewMode::Loading;
        assert!(!mode.begin_edit());

        mode = ViewMode::Viewing;
        assert!(mode.begin_edit());
        assert!(mode.is_editing());
        mode.end_edit();
        assert_eq!(mode, ViewMode::Viewing);
    }

    #[test]
    fn test_load_failure_before_first_load() {
        let mut mode = ViewMode::Loading;
        assert!(mode.load_failed("Project not found."));
        assert_eq!(mode, ViewMode::Failed("Project not found.".into()));

        assert!(mode.load_failed("Network error: offline"));
        assert_eq!(mode, ViewMode::Failed("Network error: offline".into()));
    }

    #[test]
    fn test_failed_reload_keeps_loaded_view() {
        for before in [ViewMode::Viewing, ViewMode::Editing, ViewMode::Removed] {
            let mut mode = before.clone();
            assert!(!mode.load_failed("Internal Server Error"));
            assert_eq!(mode, before);
        }
    }

    #[test]
    fn test_reload_after_server_error_keeps_project() {
        let transport = MockTransport::default();
        transport.reply(200, r#"{"id": 3, "title": "Roadmap", "members": []}"#);
        transport.reply(500, r#"{"detail": "Internal Server Error"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let shown = match block_on(load_page(&api, Route::Project(Some(3)))) {
            LoadOutcome::Ready(PageData::Project(project)) => project,
            other => panic!("unexpected {:?}", other),
        };
        let mut mode = ViewMode::Viewing;

        match block_on(load_page(&api, Route::Project(Some(3)))) {
            LoadOutcome::Failed(message) => {
                assert_eq!(message, "Internal Server Error");
                assert!(!mode.load_failed(message));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(mode, ViewMode::Viewing);
        assert_eq!(shown.title, "Roadmap");
        assert!(api.session().is_signed_in());
    }

    #[test]
    fn test_invalid_id_fails_without_request() {
        let transport = MockTransport::default();
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        assert_eq!(
            block_on(load_page(&api, Route::InvalidId("user"))),
            LoadOutcome::Failed("Invalid user id in the address.".into())
        );
        assert_eq!(transport.request_count(), 0);
    }
}
