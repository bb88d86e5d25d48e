//! API Access
//!
//! Client construction and browser navigation helpers shared by pages.

use taskboard_core::routes::Route;
use taskboard_core::{ApiClient, ApiConfig};

use crate::storage::LocalStorage;
use crate::transport::{GlooSleep, GlooTransport};

pub type Client = ApiClient<GlooTransport, LocalStorage, GlooSleep>;

/// Fresh client; the token is read from localStorage on every call anyway
pub fn client() -> Client {
    let config = ApiConfig::from_override(option_env!("TASKBOARD_API_BASE_URL"));
    ApiClient::new(config, GlooTransport, LocalStorage, GlooSleep)
}

/// Route of the page that is currently loaded
pub fn current_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::Index;
    };
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    Route::from_location(&path, &search)
}

pub fn navigate(route: Route) {
    let href = route.href();
    log::info!("[NAV] -> {}", href);
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(&href) {
        log::error!("[NAV] failed to open {}: {:?}", href, e);
    }
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
