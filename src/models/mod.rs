//! Data models for the navigation engine.
//!
//! Contains domain types for:
//! - [`RouteDefinition`], [`Target`], [`Params`] - Route table entries and
//!   navigation destinations
//! - [`Location`], [`HistoryAction`], [`RouteMatch`] - History snapshots
//! - [`ActiveRouteState`] - The published single-writer route state

mod location;
mod route;

pub use location::{ActiveRouteState, HistoryAction, Location, RouteMatch};
pub use route::{ParamValue, Params, RouteCallback, RouteDefinition, State, Target, ViewFn};
