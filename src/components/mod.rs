//! Leptos components at the engine's view boundary.
//!
//! - [`Link`] - Anchor that resolves its `href` through the table and
//!   pushes on activation-equivalent clicks
//! - [`RouterView`] - Render dispatch for the matched route's view

mod link;
mod view;

pub use link::Link;
pub use view::RouterView;
