//! The render dispatch point.
//!
//! [`RouterView`] looks up the matched definition in the (static) route
//! table per navigation and invokes its view closure. The router itself
//! decides what is active; this component only renders the decision.

use leptos::prelude::*;

use crate::core::engine::RouterContext;

/// Renders the view of the route matching the published active location.
///
/// Re-renders whenever the active-route state is republished. Locations
/// with no matching definition (or a definition without a view) render
/// nothing.
#[component]
pub fn RouterView() -> impl IntoView {
    let ctx = expect_context::<RouterContext>();

    move || {
        let router = ctx.router();
        let state = router.active_route().get();
        router
            .view_for(&state.location.pathname)
            .unwrap_or_else(|| ().into_any())
    }
}
