//! JSON persistence in LocalStorage

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load a JSON value stored under `key` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable {}: {}", key, e);
            None
        }
    }
}

/// Store `value` as JSON under `key` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    let Some(storage) = storage else {
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}
