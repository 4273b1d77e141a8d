//! Route table entries and navigation targets.

use std::fmt;
use std::rc::Rc;

use leptos::prelude::*;

use crate::core::middleware::Middleware;

/// Opaque history state payload attached to a navigation.
///
/// The engine never inspects it; it is handed to the history provider
/// unchanged (history mode) or dropped (hash mode).
pub type State = serde_json::Value;

/// Opaque view-producing reference carried by a route definition.
///
/// The core never inspects the produced view; it only invokes the closure
/// at the render dispatch point.
pub type ViewFn = Rc<dyn Fn() -> AnyView>;

/// Side-effect callback fired when a route's view becomes (in)active.
pub type RouteCallback = Rc<dyn Fn()>;

// ============================================================================
// Params
// ============================================================================

/// A single route parameter value: a string or a number.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Str(String),
    Num(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{}", s),
            Self::Num(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Num(n as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        Self::Num(n as i64)
    }
}

/// Ordered route parameters.
///
/// Insertion order is significant: named-route resolution appends each value
/// as an extra path segment in exactly this order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter, preserving insertion order.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Target
// ============================================================================

/// A navigation destination: a concrete path or a named route.
///
/// Raw strings convert via [`From`]: a leading `/` (or the `*` catch-all
/// sentinel) means a concrete path, anything else is a route name to be
/// looked up in the table.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// Concrete path, used verbatim.
    Path { path: String, state: Option<State> },
    /// Route name resolved through the table, with optional positional
    /// parameters.
    Named {
        name: String,
        params: Option<Params>,
        state: Option<State>,
    },
}

impl Target {
    /// Target a concrete path.
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            state: None,
        }
    }

    /// Target a route by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            params: None,
            state: None,
        }
    }

    /// Attach positional parameters (meaningful for named targets only).
    pub fn with_params(self, params: Params) -> Self {
        match self {
            Self::Named { name, state, .. } => Self::Named {
                name,
                params: Some(params),
                state,
            },
            other => other,
        }
    }

    /// Attach a history state payload.
    pub fn with_state(self, state: State) -> Self {
        match self {
            Self::Path { path, .. } => Self::Path {
                path,
                state: Some(state),
            },
            Self::Named { name, params, .. } => Self::Named {
                name,
                params,
                state: Some(state),
            },
        }
    }

    /// The state payload carried by this target, if any.
    pub fn state(&self) -> Option<&State> {
        match self {
            Self::Path { state, .. } | Self::Named { state, .. } => state.as_ref(),
        }
    }
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        if s.starts_with('/') || s == "*" {
            Self::path(s)
        } else {
            Self::named(s)
        }
    }
}

impl From<String> for Target {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

// ============================================================================
// RouteDefinition
// ============================================================================

/// One entry in the route table.
///
/// `path` is always present. `name`, if present, should be unique in the
/// table; on duplicates the first registration in table order wins.
#[derive(Clone, Default)]
pub struct RouteDefinition {
    /// Path pattern (e.g. `/user/:id`, `*`).
    pub path: String,
    /// Unique lookup key for named navigation.
    pub name: Option<String>,
    /// Arbitrary metadata, not interpreted by the core.
    pub meta: Option<serde_json::Value>,
    /// Resolution-time redirect target (path or name, string form).
    pub redirect: Option<String>,
    /// View producer, invoked only at the render dispatch point.
    pub view: Option<ViewFn>,
    /// Require the pattern to consume the full pathname.
    pub exact: bool,
    /// Case-sensitive segment comparison.
    pub sensitive: bool,
    /// Trailing-slash significance.
    pub strict: bool,
    /// Fired when this route's view becomes active.
    pub on_enter: Option<RouteCallback>,
    /// Fired when this route's view stops being active.
    pub on_leave: Option<RouteCallback>,
    /// Nested routes; flattened into the table with parent-joined paths.
    pub children: Vec<RouteDefinition>,
    /// Route-level interceptors, run between the `on_middleware` and
    /// `after_middleware` plugin hooks.
    pub middleware: Vec<Middleware>,
}

impl RouteDefinition {
    /// Create a definition for a path pattern.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a named definition.
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Attach the view producer.
    pub fn with_view<V: IntoView + 'static>(mut self, f: impl Fn() -> V + 'static) -> Self {
        self.view = Some(Rc::new(move || f().into_any()));
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDefinition>) -> Self {
        self.children = children;
        self
    }

    /// Register a route-level interceptor.
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn on_enter(mut self, f: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Rc::new(f));
        self
    }

    pub fn on_leave(mut self, f: impl Fn() + 'static) -> Self {
        self.on_leave = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("redirect", &self.redirect)
            .field("exact", &self.exact)
            .field("sensitive", &self.sensitive)
            .field("strict", &self.strict)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
