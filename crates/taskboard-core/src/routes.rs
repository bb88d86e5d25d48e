//! Page Routes
//!
//! Every page is a separate HTML entry point served by the same bundle.
//! Entity ids travel as `?id=<integer>`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Projects list, or the login/register forms when signed out
    Index,
    Project(Option<u32>),
    Task(Option<u32>),
    /// `None` is the signed-in user
    User(Option<u32>),
    Users,
    /// An `id` was given but is not a number; names the entity
    InvalidId(&'static str),
}

impl Route {
    /// Where unauthenticated visitors are sent
    pub const LOGIN: Route = Route::Index;

    pub fn href(&self) -> String {
        match self {
            Route::Index => "index.html".to_string(),
            Route::Project(id) => with_id("project_detail.html", *id),
            Route::Task(id) => with_id("task_detail.html", *id),
            Route::User(id) => with_id("user_detail.html", *id),
            Route::Users => "users.html".to_string(),
            Route::InvalidId(_) => Route::Index.href(),
        }
    }

    /// `location.pathname` + `location.search` to a route; unknown pages
    /// fall back to the index
    pub fn from_location(path: &str, search: &str) -> Self {
        let page = path.rsplit('/').next().unwrap_or_default();
        let (entity, route): (&'static str, fn(Option<u32>) -> Route) = match page {
            "project_detail.html" => ("project", Route::Project),
            "task_detail.html" => ("task", Route::Task),
            "user_detail.html" => ("user", Route::User),
            "users.html" => return Route::Users,
            _ => return Route::Index,
        };
        match id_value(search) {
            None => route(None),
            Some(raw) => match raw.trim().parse() {
                Ok(id) => route(Some(id)),
                Err(_) => Route::InvalidId(entity),
            },
        }
    }
}

fn with_id(page: &str, id: Option<u32>) -> String {
    match id {
        Some(id) => format!("{}?id={}", page, id),
        None => page.to_string(),
    }
}

fn id_value(search: &str) -> Option<&str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| value)
}

/// `id` from a query string such as `?id=12&tab=tasks`
pub fn parse_id_param(search: &str) -> Option<u32> {
    id_value(search).and_then(|value| value.trim().parse().ok())
}
