//! Vue-style client-side navigation engine for Leptos single-page
//! applications.
//!
//! The engine keeps a declarative route table, resolves navigation requests
//! (by path or by name + parameters) to concrete locations, drives an
//! abstract browsing-history object, and runs an ordered interception
//! pipeline (middleware + lifecycle plugin hooks) around every navigation.
//!
//! # Example
//!
//! ```ignore
//! use webnav::{Decision, RouteDefinition, Router, RouterOptions};
//!
//! let router = Router::new(RouterOptions::new(vec![
//!     RouteDefinition::named("/", "home")
//!         .exact()
//!         .with_view(|| view! { <Home /> }),
//!     RouteDefinition::named("/user", "user")
//!         .with_view(|| view! { <User /> }),
//! ]))?;
//!
//! router.before_each(|cx| {
//!     if cx.to_path.starts_with("/admin") {
//!         Decision::Redirect("/login".into())
//!     } else {
//!         Decision::Proceed
//!     }
//! });
//!
//! // In the app component tree:
//! // view! { <main>{router.render()}</main> }
//! ```

mod components;
mod config;
mod core;
mod error;
mod models;
mod state;

pub use crate::components::{Link, RouterView};
pub use crate::config::{
    ConfirmationPrompt, DEFAULT_KEY_LENGTH, HashType, HistoryMode, MAX_REDIRECTS, RouterOptions,
};
pub use crate::core::RouteTable;
pub use crate::core::engine::{NavOutcome, Router, use_router};
#[cfg(target_arch = "wasm32")]
pub use crate::core::history::BrowserHistory;
pub use crate::core::history::{
    BlockGate, BlockHandle, HistoryAdapter, HistoryProvider, MemoryHistory,
};
pub use crate::core::matcher::{MatchOptions, match_path};
pub use crate::core::middleware::{
    Decision, HookHandle, Middleware, MiddlewareContext, MiddlewarePipeline,
};
pub use crate::core::plugin::{
    HookPayload, HookPoint, HookResult, Plugin, PluginHandle, PluginHookDispatcher,
};
pub use crate::error::RouterError;
pub use crate::models::{
    ActiveRouteState, HistoryAction, Location, ParamValue, Params, RouteCallback, RouteDefinition,
    RouteMatch, State, Target, ViewFn,
};
pub use crate::state::ActiveRoute;
