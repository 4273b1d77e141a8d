//! Error taxonomy for the navigation engine.
//!
//! Resolution and navigation failures are local, immediate, and never
//! swallowed: a failed navigation performs no commit and leaves the active
//! route state untouched. Middleware and plugin failures propagate to the
//! navigation caller.

use thiserror::Error;

use crate::core::plugin::HookPoint;

/// Everything the router can fail with.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A named target could not be resolved to a registered path.
    #[error("no route registered for `{0}`")]
    RouteNotFound(String),

    /// Navigation was attempted before a history provider was installed.
    #[error("history has not been initialized")]
    HistoryNotInitialized,

    /// A redirect chain exceeded the configured limit.
    #[error("redirect loop while resolving `{0}`")]
    RedirectLoop(String),

    /// A lifecycle plugin hook returned an error mid-navigation.
    #[error("plugin hook {hook:?} failed: {message}")]
    Plugin {
        /// The lifecycle point at which the failure occurred.
        hook: HookPoint,
        /// The failure detail reported by the plugin.
        message: String,
    },
}

impl RouterError {
    /// Construct a [`RouterError::Plugin`] from a hook point and a message.
    pub fn plugin(hook: HookPoint, message: impl Into<String>) -> Self {
        RouterError::Plugin {
            hook,
            message: message.into(),
        }
    }
}
