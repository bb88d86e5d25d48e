//! API Client
//!
//! Typed wrappers over every backend endpoint. The token is read from the
//! session store on each call; reads and add-member go through the
//! retrying path, other writes are sent once.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::forms::{validate_email, NewProject, NewTask, ProjectPatch, Registration, TaskPatch, UserPatch};
use crate::models::{Project, Task, TokenResponse, UserProfile, UserRef};
use crate::retry::{with_backoff, RetryPolicy, Sleep};
use crate::session::{KeyValueStore, Session, SessionStore};
use crate::transport::{ApiRequest, Body, Method, RawResponse, Transport};

/// Characters left as-is in an email path segment
const EMAIL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

const BAD_CREDENTIALS: &str = "Incorrect email or password.";

pub struct ApiClient<T, K, S> {
    config: ApiConfig,
    transport: T,
    session: SessionStore<K>,
    sleeper: S,
    retry: RetryPolicy,
}

impl<T, K, S> ApiClient<T, K, S>
where
    T: Transport,
    K: KeyValueStore,
    S: Sleep,
{
    pub fn new(config: ApiConfig, transport: T, storage: K, sleeper: S) -> Self {
        Self {
            config,
            transport,
            session: SessionStore::new(storage),
            sleeper,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn session(&self) -> &SessionStore<K> {
        &self.session
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ========================
    // Plumbing
    // ========================

    /// Request carrying the current bearer token; no token, no request
    fn authed(&self, method: Method, path: &str) -> Result<ApiRequest, ApiError> {
        let token = self.session.token().ok_or_else(|| {
            log::info!("[HTTP] {} {} skipped: not signed in", method.as_str(), path);
            ApiError::Unauthorized
        })?;
        Ok(ApiRequest::new(method, self.config.url(path)).with_bearer(token))
    }

    async fn send(&self, request: &ApiRequest, retry: bool) -> Result<RawResponse, ApiError> {
        let policy = if retry { self.retry } else { RetryPolicy::single() };
        log::debug!("[HTTP] {} {}", request.method.as_str(), request.url);
        let response = with_backoff(policy, &self.sleeper, || self.transport.send(request)).await?;
        if !response.is_success() {
            log::warn!(
                "[HTTP] {} {} -> {}",
                request.method.as_str(),
                request.url,
                response.status
            );
        }
        Ok(response)
    }

    /// Send and classify non-2xx statuses
    async fn fetch(&self, request: &ApiRequest, retry: bool, entity: &str) -> Result<RawResponse, ApiError> {
        let response = self.send(request, retry).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response_for(&response, entity))
        }
    }

    async fn fetch_json<D: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        retry: bool,
        entity: &str,
    ) -> Result<D, ApiError> {
        let response = self.fetch(request, retry, entity).await?;
        decode(&response)
    }

    // ========================
    // Projects
    // ========================

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let request = self.authed(Method::Get, "/projects/")?;
        self.fetch_json(&request, true, "Project").await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        let request = self.authed(Method::Post, "/projects/")?.with_body(json_body(project)?);
        let created: Project = self.fetch_json(&request, false, "Project").await?;
        log::info!("[PROJECT] created {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn get_project(&self, id: u32) -> Result<Project, ApiError> {
        let request = self.authed(Method::Get, &format!("/projects/{}", id))?;
        self.fetch_json(&request, true, "Project").await
    }

    /// Returns the project as stored by the server
    pub async fn update_project(&self, id: u32, patch: &ProjectPatch) -> Result<Project, ApiError> {
        let request = self
            .authed(Method::Patch, &format!("/projects/{}", id))?
            .with_body(json_body(patch)?);
        self.fetch_json(&request, false, "Project").await
    }

    pub async fn delete_project(&self, id: u32) -> Result<(), ApiError> {
        let request = self.authed(Method::Delete, &format!("/projects/{}", id))?;
        self.fetch(&request, false, "Project").await?;
        log::info!("[PROJECT] deleted {}", id);
        Ok(())
    }

    // ========================
    // Members
    // ========================

    /// Validates the email before anything is sent
    pub async fn add_member(&self, project_id: u32, email: &str) -> Result<Project, ApiError> {
        let email = validate_email(email)?;
        let path = format!(
            "/projects/{}/members/{}",
            project_id,
            utf8_percent_encode(&email, EMAIL_SEGMENT)
        );
        let request = self.authed(Method::Post, &path)?;
        self.fetch_json(&request, true, "Project").await
    }

    pub async fn remove_member(&self, project_id: u32, user_id: u32) -> Result<(), ApiError> {
        let path = format!("/projects/{}/members/{}", project_id, user_id);
        let request = self.authed(Method::Delete, &path)?;
        self.fetch(&request, false, "Member").await?;
        Ok(())
    }

    // ========================
    // Tasks
    // ========================

    /// Validates the task before anything is sent
    pub async fn create_task(&self, project_id: u32, task: &NewTask) -> Result<Task, ApiError> {
        task.validate()?;
        let request = self
            .authed(Method::Post, &format!("/projects/{}/tasks", project_id))?
            .with_body(json_body(task)?);
        self.fetch_json(&request, false, "Project").await
    }

    pub async fn get_task(&self, id: u32) -> Result<Task, ApiError> {
        let request = self.authed(Method::Get, &format!("/tasks/{}", id))?;
        self.fetch_json(&request, true, "Task").await
    }

    pub async fn update_task(&self, id: u32, patch: &TaskPatch) -> Result<Task, ApiError> {
        let request = self
            .authed(Method::Patch, &format!("/tasks/{}", id))?
            .with_body(json_body(patch)?);
        self.fetch_json(&request, false, "Task").await
    }

    pub async fn delete_task(&self, id: u32) -> Result<(), ApiError> {
        let request = self.authed(Method::Delete, &format!("/tasks/{}", id))?;
        self.fetch(&request, false, "Task").await?;
        log::info!("[TASK] deleted {}", id);
        Ok(())
    }

    // ========================
    // Auth & Users
    // ========================

    /// Exchange credentials for a token, then cache the caller's identity.
    /// Any failure leaves no session behind.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        match self.try_login(email, password).await {
            Ok(session) => {
                log::info!("[AUTH] signed in as user {}", session.user_id);
                Ok(session)
            }
            Err(e) => {
                log::warn!("[AUTH] login failed: {}", e);
                self.session.clear_session();
                Err(e)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let form = format!(
            "username={}&password={}",
            utf8_percent_encode(email.trim(), NON_ALPHANUMERIC),
            utf8_percent_encode(password, NON_ALPHANUMERIC)
        );
        let request = ApiRequest::new(Method::Post, self.config.url("/users/token")).with_body(Body::Form(form));
        let response = self.send(&request, false).await?;
        if !response.is_success() {
            return Err(match ApiError::from_response(&response) {
                ApiError::Unauthorized => ApiError::Server {
                    status: response.status,
                    detail: Some(BAD_CREDENTIALS.to_string()),
                },
                other => other,
            });
        }
        let token: TokenResponse = decode(&response)?;
        self.session.set_token(&token.access_token);

        let me = self.fetch_profile(None).await?;
        let role = me.user.role.map(|r| r.as_str()).unwrap_or("guest");
        self.session.set_session(&token.access_token, me.user.id, role);
        self.session
            .session()
            .ok_or_else(|| ApiError::Decode("session was not stored".to_string()))
    }

    pub fn logout(&self) {
        self.session.clear_session();
        log::info!("[AUTH] signed out");
    }

    pub async fn register(&self, registration: &Registration) -> Result<UserRef, ApiError> {
        let request = ApiRequest::new(Method::Post, self.config.url("/users/")).with_body(json_body(registration)?);
        let user: UserRef = self.fetch_json(&request, false, "User").await?;
        log::info!("[AUTH] registered user {}", user.id);
        Ok(user)
    }

    /// `None` is the signed-in user
    pub async fn fetch_profile(&self, id: Option<u32>) -> Result<UserProfile, ApiError> {
        let path = match id {
            Some(id) => format!("/users/{}", id),
            None => "/users/me".to_string(),
        };
        let request = self.authed(Method::Get, &path)?;
        self.fetch_json(&request, true, "User").await
    }

    pub async fn update_user(&self, id: u32, patch: &UserPatch) -> Result<UserProfile, ApiError> {
        let request = self
            .authed(Method::Patch, &format!("/users/{}", id))?
            .with_body(json_body(patch)?);
        self.fetch_json(&request, false, "User").await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRef>, ApiError> {
        let request = self.authed(Method::Get, "/users/")?;
        self.fetch_json(&request, true, "User").await
    }
}

fn decode<D: DeserializeOwned>(response: &RawResponse) -> Result<D, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn json_body<B: Serialize>(body: &B) -> Result<Body, ApiError> {
    serde_json::to_string(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::session::{MemoryStore, IDENTITY_KEY, TOKEN_KEY};
    use crate::testing::{client, signed_in_storage, MockTransport, RecordingSleep};
    use futures::executor::block_on;

    #[test]
    fn test_login_stores_session() {
        let transport = MockTransport::default();
        transport
            .reply(200, r#"{"access_token": "tok123", "token_type": "bearer"}"#)
            .reply(200, r#"{"id": 7, "email": "a@b.com", "role": "member"}"#);
        let storage = MemoryStore::default();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let session = block_on(api.login("a@b.com", "x")).unwrap();

        assert_eq!(
            session,
            Session { token: "tok123".into(), user_id: 7, role: "member".into() }
        );
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok123"));

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://127.0.0.1:8000/users/token");
        assert_eq!(
            requests[0].body,
            Some(Body::Form("username=a%40b%2Ecom&password=x".into()))
        );
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].url, "http://127.0.0.1:8000/users/me");
        assert_eq!(requests[1].bearer.as_deref(), Some("tok123"));
    }

    #[test]
    fn test_failed_login_clears_everything() {
        let transport = MockTransport::default();
        transport
            .reply(200, r#"{"access_token": "tok123"}"#)
            .reply(500, "");
        let storage = MemoryStore::default();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        assert!(block_on(api.login("a@b.com", "x")).is_err());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(IDENTITY_KEY), None);
    }

    #[test]
    fn test_bad_credentials_message() {
        let transport = MockTransport::default();
        transport.reply(401, r#"{"detail": "Could not validate credentials"}"#);
        let storage = MemoryStore::default();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.login("a@b.com", "wrong")).unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), BAD_CREDENTIALS);
    }

    #[test]
    fn test_get_retries_transport_failures() {
        let transport = MockTransport::default();
        transport
            .fail("connection reset")
            .fail("connection reset")
            .reply(200, r#"{"id": 5, "title": "Apollo"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let project = block_on(api.get_project(5)).unwrap();

        assert_eq!(project.title, "Apollo");
        assert_eq!(transport.request_count(), 3);
        assert_eq!(sleeper.delays(), vec![1_000, 2_000]);
    }

    #[test]
    fn test_server_error_is_not_retried() {
        let transport = MockTransport::default();
        transport.reply(500, r#"{"detail": "db down"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.list_projects()).unwrap_err();

        assert_eq!(err, ApiError::Server { status: 500, detail: Some("db down".into()) });
        assert_eq!(transport.request_count(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[test]
    fn test_writes_are_sent_once() {
        let transport = MockTransport::default();
        transport.fail("offline");
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.delete_project(3)).unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_invalid_member_email_sends_nothing() {
        let transport = MockTransport::default();
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.add_member(1, "not-an-email")).unwrap_err();

        assert_eq!(err, ApiError::Invalid(ValidationError::InvalidEmail));
        assert_eq!(err.to_string(), "Please enter a valid email address.");
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_member_email_is_path_encoded() {
        let transport = MockTransport::default();
        transport.reply(201, r#"{"id": 1, "title": "Apollo"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        block_on(api.add_member(1, " dev+qa@corp.io ")).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://127.0.0.1:8000/projects/1/members/dev%2Bqa@corp.io");
    }

    #[test]
    fn test_short_task_description_sends_nothing() {
        let transport = MockTransport::default();
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);
        let task = NewTask {
            title: "Docs".into(),
            description: "  short   ".into(),
            priority: Default::default(),
            due_date: None,
            assigned_to_email: None,
        };

        let err = block_on(api.create_task(1, &task)).unwrap_err();

        assert!(matches!(err, ApiError::Invalid(ValidationError::TooShort { .. })));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_project_patch_returns_server_copy() {
        let transport = MockTransport::default();
        transport.reply(
            200,
            r#"{"id": 2, "title": "Server Title", "description": "server desc", "dub_date": "2025-09-01"}"#,
        );
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);
        let patch = ProjectPatch {
            title: Some("Form Title".into()),
            ..ProjectPatch::default()
        };

        let project = block_on(api.update_project(2, &patch)).unwrap();

        assert_eq!(project.title, "Server Title");
        assert_eq!(project.description.as_deref(), Some("server desc"));
        assert_eq!(project.dub_date.as_deref(), Some("2025-09-01"));
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.body, Some(Body::Json(r#"{"title":"Form Title"}"#.into())));
    }

    #[test]
    fn test_missing_token_sends_nothing() {
        let transport = MockTransport::default();
        let storage = MemoryStore::default();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.list_users()).unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_token_is_read_on_every_call() {
        let transport = MockTransport::default();
        transport.reply(200, "[]").reply(200, "[]");
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        block_on(api.list_projects()).unwrap();
        api.session().set_token("  rotated  ");
        block_on(api.list_projects()).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("tok123"));
        assert_eq!(requests[1].bearer.as_deref(), Some("rotated"));
    }

    #[test]
    fn test_profile_paths() {
        let transport = MockTransport::default();
        let profile = r#"{"id": 7, "email": "a@b.com"}"#;
        transport.reply(200, profile).reply(200, profile);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        block_on(api.fetch_profile(None)).unwrap();
        block_on(api.fetch_profile(Some(9))).unwrap();

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec!["http://127.0.0.1:8000/users/me", "http://127.0.0.1:8000/users/9"]
        );
    }

    #[test]
    fn test_task_not_found_message() {
        let transport = MockTransport::default();
        transport.reply(404, r#"{"detail": "Not Found"}"#);
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        let err = block_on(api.get_task(99)).unwrap_err();
        assert_eq!(err.to_string(), "Task not found.");
    }

    #[test]
    fn test_delete_task_accepts_empty_body() {
        let transport = MockTransport::default();
        transport.reply(204, "");
        let storage = signed_in_storage();
        let sleeper = RecordingSleep::default();
        let api = client(&transport, &storage, &sleeper);

        block_on(api.delete_task(4)).unwrap();
        assert_eq!(transport.requests()[0].method, Method::Delete);
        assert_eq!(transport.requests()[0].url, "http://127.0.0.1:8000/tasks/4");
    }
}
