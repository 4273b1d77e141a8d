//! Router configuration.
//!
//! Centralizes the construction options and their defaults. Options are
//! consumed once at engine construction; the route table they carry is
//! immutable afterwards.

use std::fmt;
use std::rc::Rc;

use crate::core::plugin::Plugin;
use crate::models::RouteDefinition;

// =============================================================================
// Defaults
// =============================================================================

/// Default base path for history mode.
pub const DEFAULT_BASE: &str = "/";

/// Default length of generated location keys.
pub const DEFAULT_KEY_LENGTH: usize = 6;

/// CSS class applied to links whose target is a prefix of the current path.
pub const DEFAULT_LINK_ACTIVE_CLASS: &str = "router-link-active";

/// CSS class applied to links whose target equals the current path.
pub const DEFAULT_LINK_EXACT_ACTIVE_CLASS: &str = "router-link-exact-active";

/// Bound on `redirect` chains followed during resolution.
pub const MAX_REDIRECTS: usize = 25;

// =============================================================================
// Modes
// =============================================================================

/// Which flavor of browsing history backs the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryMode {
    /// Real browser paths (`/user/5`).
    #[default]
    History,
    /// Fragment-based paths (`#/user/5`); state payloads are not persisted.
    Hash,
}

/// Hash URL flavor used in [`HistoryMode::Hash`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashType {
    /// `#/user/5`
    #[default]
    Slash,
    /// `#user/5`
    Noslash,
    /// `#!/user/5`
    Hashbang,
}

/// Confirmation predicate consulted when a navigation gate is installed.
pub type ConfirmationPrompt = Rc<dyn Fn(&str) -> bool>;

/// Default confirmation: `window.confirm` in the browser, always-allow
/// elsewhere.
pub fn default_confirmation() -> ConfirmationPrompt {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(|message: &str| {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(|_: &str| true)
    }
}

// =============================================================================
// RouterOptions
// =============================================================================

/// Construction options for the navigation engine.
#[derive(Clone)]
pub struct RouterOptions {
    /// The declarative route table.
    pub routes: Vec<RouteDefinition>,
    /// History flavor backing the adapter.
    pub mode: HistoryMode,
    /// Base path prepended to committed URLs in history mode.
    pub base: String,
    /// Commit history-mode navigations with a full page load.
    pub force_refresh: bool,
    /// Confirmation predicate for navigation gates.
    pub get_user_confirmation: ConfirmationPrompt,
    /// Hash URL flavor for hash mode.
    pub hash_type: HashType,
    /// Length of generated location keys.
    pub key_length: usize,
    /// CSS class for links matching the current path as a prefix.
    pub link_active_class: String,
    /// CSS class for links matching the current path exactly.
    pub link_exact_active_class: String,
    /// Plugins installed at configuration time, in order.
    pub plugins: Vec<Rc<dyn Plugin>>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            mode: HistoryMode::default(),
            base: DEFAULT_BASE.to_string(),
            force_refresh: false,
            get_user_confirmation: default_confirmation(),
            hash_type: HashType::default(),
            key_length: DEFAULT_KEY_LENGTH,
            link_active_class: DEFAULT_LINK_ACTIVE_CLASS.to_string(),
            link_exact_active_class: DEFAULT_LINK_EXACT_ACTIVE_CLASS.to_string(),
            plugins: Vec::new(),
        }
    }
}

impl RouterOptions {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }

    pub fn mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn confirmation(mut self, f: impl Fn(&str) -> bool + 'static) -> Self {
        self.get_user_confirmation = Rc::new(f);
        self
    }

    pub fn hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    pub fn key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    pub fn link_active_class(mut self, class: impl Into<String>) -> Self {
        self.link_active_class = class.into();
        self
    }

    pub fn link_exact_active_class(mut self, class: impl Into<String>) -> Self {
        self.link_exact_active_class = class.into();
        self
    }

    /// Queue a ready-made plugin instance for installation.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Rc::new(plugin));
        self
    }

    /// Queue a plugin factory; instantiated once, immediately.
    pub fn plugin_with<P: Plugin + 'static>(mut self, factory: impl FnOnce() -> P) -> Self {
        self.plugins.push(Rc::new(factory()));
        self
    }
}

impl fmt::Debug for RouterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterOptions")
            .field("routes", &self.routes.len())
            .field("mode", &self.mode)
            .field("base", &self.base)
            .field("force_refresh", &self.force_refresh)
            .field("hash_type", &self.hash_type)
            .field("key_length", &self.key_length)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let opts = RouterOptions::default();
        assert_eq!(opts.mode, HistoryMode::History);
        assert_eq!(opts.base, "/");
        assert_eq!(opts.hash_type, HashType::Slash);
        assert_eq!(opts.key_length, 6);
        assert_eq!(opts.link_active_class, "router-link-active");
        assert_eq!(opts.link_exact_active_class, "router-link-exact-active");
        assert!(!opts.force_refresh);
        assert!(opts.routes.is_empty());
        assert!(opts.plugins.is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let opts = RouterOptions::new(Vec::new())
            .mode(HistoryMode::Hash)
            .hash_type(HashType::Hashbang)
            .base("/app")
            .key_length(8);
        assert_eq!(opts.mode, HistoryMode::Hash);
        assert_eq!(opts.hash_type, HashType::Hashbang);
        assert_eq!(opts.base, "/app");
        assert_eq!(opts.key_length, 8);
    }
}
