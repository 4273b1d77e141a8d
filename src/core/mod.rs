//! Core engine logic.
//!
//! This module provides:
//! - [`RouteTable`] route registration and name/path resolution
//! - [`HistoryAdapter`](history::HistoryAdapter) and the
//!   [`HistoryProvider`](history::HistoryProvider) storage boundary
//! - [`MiddlewarePipeline`](middleware::MiddlewarePipeline) before-navigation
//!   interception
//! - [`PluginHookDispatcher`](plugin::PluginHookDispatcher) lifecycle hooks
//! - [`Router`](engine::Router), the façade driving one navigation cycle

pub mod engine;
pub mod history;
pub mod matcher;
pub mod middleware;
pub mod plugin;
mod table;

pub use table::RouteTable;
