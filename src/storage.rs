//! Browser Storage
//!
//! `window.localStorage` behind the session store. A missing window or
//! storage (private mode, sandboxed iframe) reads as empty.

use taskboard_core::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = storage() else {
            log::warn!("[STORAGE] localStorage unavailable, {} not saved", key);
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::error!("[STORAGE] failed to write {}", key);
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = storage() else {
            log::warn!("[STORAGE] localStorage unavailable, {} not removed", key);
            return;
        };
        if storage.remove_item(key).is_err() {
            log::error!("[STORAGE] failed to remove {}", key);
        }
    }
}
