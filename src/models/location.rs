//! Location snapshots and the published active-route state.

use std::fmt;

use serde::Serialize;

use crate::models::route::State;

// ============================================================================
// HistoryAction
// ============================================================================

/// The last navigation action reported by the history provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum HistoryAction {
    Push,
    Replace,
    /// Pointer movement through existing entries; also the initial load.
    #[default]
    Pop,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => write!(f, "PUSH"),
            Self::Replace => write!(f, "REPLACE"),
            Self::Pop => write!(f, "POP"),
        }
    }
}

// ============================================================================
// Location
// ============================================================================

/// A concrete location in the history stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Location {
    /// Path portion, always `/`-prefixed (e.g. `/user/5`).
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    /// Per-entry key generated by the provider.
    pub key: String,
    /// State payload committed with this entry.
    pub state: Option<State>,
}

impl Location {
    /// Split a full path (`/a/b?x=1#frag`) into its components.
    pub fn from_path(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(i) => (&path[..i], path[i..].to_string()),
            None => (path, String::new()),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (rest[..i].to_string(), rest[i..].to_string()),
            None => (rest.to_string(), String::new()),
        };
        Self {
            pathname,
            search,
            hash,
            key: String::new(),
            state: None,
        }
    }

    pub fn with_state(mut self, state: Option<State>) -> Self {
        self.state = state;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Reassemble the full path from its components.
    pub fn full_path(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

// ============================================================================
// RouteMatch
// ============================================================================

/// The outcome of matching a pathname against a route pattern.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RouteMatch {
    /// The pattern of the matched definition (e.g. `/user/:id`).
    pub pattern: String,
    /// Parameters captured from `:name` segments, in pattern order.
    pub params: Vec<(String, String)>,
    /// Whether the pattern consumed the full pathname.
    pub exact: bool,
}

// ============================================================================
// ActiveRouteState
// ============================================================================

/// The single-writer snapshot published after each committed navigation.
///
/// Created at first render, overwritten atomically on each successful
/// commit, never destroyed during the session. Consumers only ever observe
/// the latest snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActiveRouteState {
    /// Current location (pathname, search, hash, key, state).
    pub location: Location,
    /// Last navigation action.
    pub action: HistoryAction,
    /// Current route match, if any definition matched the pathname.
    pub route: Option<RouteMatch>,
}

// ============================================================================
// Tests
// ============================================================================
