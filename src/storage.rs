use serde::{de::DeserializeOwned, Serialize};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn set_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("could not persist `{}` to localStorage", key);
        }
    }
}

pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_item(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring unreadable `{}` in localStorage: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) {
    if let Ok(raw) = serde_json::to_string(value) {
        set_item(key, &raw);
    }
}

pub fn access_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub fn refresh_token() -> Option<String> {
    get_item(REFRESH_TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub fn store_tokens(access: Option<&str>, refresh: Option<&str>) {
    if let Some(token) = access {
        set_item(ACCESS_TOKEN_KEY, token);
    }
    if let Some(token) = refresh {
        set_item(REFRESH_TOKEN_KEY, token);
    }
}

pub fn clear_tokens() {
    remove_item(ACCESS_TOKEN_KEY);
    remove_item(REFRESH_TOKEN_KEY);
}
