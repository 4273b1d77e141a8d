//! Browser-backed history provider (wasm only).
//!
//! Drives the real History API through web-sys. Path mode writes
//! base-joined URLs with `pushState`/`replaceState`; hash mode writes
//! fragment URLs shaped by the configured hash type and never persists
//! state payloads (the adapter has already dropped them by the time calls
//! reach this provider).

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsValue;

use crate::config::{HashType, HistoryMode};
use crate::core::history::provider::{HistoryProvider, random_key};
use crate::models::{HistoryAction, Location, State};

pub struct BrowserHistory {
    mode: HistoryMode,
    hash_type: HashType,
    base: String,
    force_refresh: bool,
    key_length: usize,
    action: Cell<HistoryAction>,
    current_key: RefCell<String>,
}

impl BrowserHistory {
    pub fn new(
        mode: HistoryMode,
        hash_type: HashType,
        base: impl Into<String>,
        force_refresh: bool,
        key_length: usize,
    ) -> Self {
        Self {
            mode,
            hash_type,
            base: base.into(),
            force_refresh,
            key_length,
            action: Cell::new(HistoryAction::Pop),
            current_key: RefCell::new(random_key(key_length)),
        }
    }

    /// The URL to hand the History API for a logical path.
    fn href_for(&self, path: &str) -> String {
        match self.mode {
            HistoryMode::History => {
                if self.base == "/" || self.base.is_empty() {
                    path.to_string()
                } else {
                    format!("{}{}", self.base.trim_end_matches('/'), path)
                }
            }
            HistoryMode::Hash => {
                let bare = path.trim_start_matches('/');
                match self.hash_type {
                    HashType::Slash => format!("#/{}", bare),
                    HashType::Noslash => format!("#{}", bare),
                    HashType::Hashbang => format!("#!/{}", bare),
                }
            }
        }
    }

    /// Strip the hash-type prefix from a raw fragment.
    fn logical_path_from_hash(&self, hash: &str) -> String {
        let fragment = hash.trim_start_matches('#');
        let bare = match self.hash_type {
            HashType::Slash => fragment.trim_start_matches('/'),
            HashType::Noslash => fragment,
            HashType::Hashbang => fragment.trim_start_matches('!').trim_start_matches('/'),
        };
        format!("/{}", bare)
    }

    fn js_state(state: Option<&State>) -> JsValue {
        state
            .and_then(|s| serde_wasm_bindgen::to_value(s).ok())
            .unwrap_or(JsValue::NULL)
    }
}

impl HistoryProvider for BrowserHistory {
    fn push(&mut self, path: &str, state: Option<State>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let href = self.href_for(path);
        if self.force_refresh && self.mode == HistoryMode::History {
            let _ = window.location().assign(&href);
            return;
        }
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&Self::js_state(state.as_ref()), "", Some(&href));
            self.action.set(HistoryAction::Push);
            *self.current_key.borrow_mut() = random_key(self.key_length);
        }
    }

    fn replace(&mut self, path: &str, state: Option<State>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let href = self.href_for(path);
        if self.force_refresh && self.mode == HistoryMode::History {
            let _ = window.location().replace(&href);
            return;
        }
        if let Ok(history) = window.history() {
            let _ =
                history.replace_state_with_url(&Self::js_state(state.as_ref()), "", Some(&href));
            self.action.set(HistoryAction::Replace);
            *self.current_key.borrow_mut() = random_key(self.key_length);
        }
    }

    fn go(&mut self, n: i32) {
        if let Some(window) = web_sys::window()
            && let Ok(history) = window.history()
        {
            let _ = history.go_with_delta(n as f64);
            self.action.set(HistoryAction::Pop);
        }
    }

    fn length(&self) -> usize {
        web_sys::window()
            .and_then(|w| w.history().ok())
            .and_then(|h| h.length().ok())
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    fn action(&self) -> HistoryAction {
        self.action.get()
    }

    fn location(&self) -> Location {
        let Some(window) = web_sys::window() else {
            return Location::default();
        };
        let raw = window.location();
        let state = window
            .history()
            .ok()
            .and_then(|h| h.state().ok())
            .filter(|v| !v.is_null() && !v.is_undefined())
            .and_then(|v| serde_wasm_bindgen::from_value(v).ok());

        let location = match self.mode {
            HistoryMode::History => {
                let pathname = raw.pathname().unwrap_or_default();
                let stripped = pathname
                    .strip_prefix(self.base.trim_end_matches('/'))
                    .filter(|_| self.base != "/" && !self.base.is_empty())
                    .unwrap_or(&pathname)
                    .to_string();
                Location {
                    pathname: if stripped.is_empty() {
                        "/".to_string()
                    } else {
                        stripped
                    },
                    search: raw.search().unwrap_or_default(),
                    hash: raw.hash().unwrap_or_default(),
                    key: String::new(),
                    state: None,
                }
            }
            HistoryMode::Hash => {
                let hash = raw.hash().unwrap_or_default();
                Location::from_path(&self.logical_path_from_hash(&hash))
            }
        };

        location
            .with_state(state)
            .with_key(self.current_key.borrow().clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn history(mode: HistoryMode, hash_type: HashType, base: &str) -> BrowserHistory {
        BrowserHistory::new(mode, hash_type, base, false, 6)
    }

    #[wasm_bindgen_test]
    fn test_href_for_path_mode_joins_base() {
        let h = history(HistoryMode::History, HashType::Slash, "/app");
        assert_eq!(h.href_for("/user/5"), "/app/user/5");
        let root = history(HistoryMode::History, HashType::Slash, "/");
        assert_eq!(root.href_for("/user/5"), "/user/5");
    }

    #[wasm_bindgen_test]
    fn test_href_for_hash_flavors() {
        let slash = history(HistoryMode::Hash, HashType::Slash, "/");
        assert_eq!(slash.href_for("/user"), "#/user");
        let noslash = history(HistoryMode::Hash, HashType::Noslash, "/");
        assert_eq!(noslash.href_for("/user"), "#user");
        let hashbang = history(HistoryMode::Hash, HashType::Hashbang, "/");
        assert_eq!(hashbang.href_for("/user"), "#!/user");
    }

    #[wasm_bindgen_test]
    fn test_logical_path_from_hash_flavors() {
        let slash = history(HistoryMode::Hash, HashType::Slash, "/");
        assert_eq!(slash.logical_path_from_hash("#/user"), "/user");
        let noslash = history(HistoryMode::Hash, HashType::Noslash, "/");
        assert_eq!(noslash.logical_path_from_hash("#user"), "/user");
        let hashbang = history(HistoryMode::Hash, HashType::Hashbang, "/");
        assert_eq!(hashbang.logical_path_from_hash("#!/user"), "/user");
    }
}
